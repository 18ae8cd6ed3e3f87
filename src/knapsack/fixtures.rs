//! Shared test instances.

use super::{Item, ItemCatalogue, Knapsack};

/// Items `(1,10,60) (2,20,100) (3,30,120)`.
pub(crate) fn three_items(capacity: u64) -> Knapsack {
    from_pairs(&[(10, 60), (20, 100), (30, 120)], capacity)
}

/// Builds an instance from `(weight, value)` pairs.
pub(crate) fn from_pairs(pairs: &[(u64, u64)], capacity: u64) -> Knapsack {
    let items = pairs
        .iter()
        .enumerate()
        .map(|(i, &(w, v))| Item::new(i + 1, w, v))
        .collect();
    Knapsack::new(ItemCatalogue::from_items(items).unwrap(), capacity).unwrap()
}

/// `n` items with scattered weights (5..=27) and values (10..=46), every
/// one of which fits on its own.
pub(crate) fn scattered(n: usize, capacity: u64) -> Knapsack {
    let pairs: Vec<(u64, u64)> = (0..n as u64)
        .map(|i| (5 + (i * 7) % 23, 10 + (i * 13) % 37))
        .collect();
    from_pairs(&pairs, capacity)
}

/// Exhaustive optimum; only for small `n`.
pub(crate) fn brute_force_optimum(knapsack: &Knapsack) -> u64 {
    let n = knapsack.len();
    assert!(n <= 20, "brute force is exponential");
    (0u32..(1 << n))
        .map(|mask| {
            let selection = (0..n).map(|i| mask & (1 << i) != 0).collect();
            knapsack.evaluate(selection).fitness()
        })
        .max()
        .unwrap_or(0)
}
