//! Candidate solutions and the feasibility model.
//!
//! A [`Candidate`] is a fixed-length selection over the catalogue with its
//! weight, value and fitness computed at construction. The selection is
//! private, so the cached fitness can never go stale: every change to a
//! selection goes through [`Knapsack::evaluate`] and yields a new candidate.

use super::item::ItemCatalogue;
use crate::error::KnapsackError;
use rand::Rng;
use std::fmt;

/// Fitness assigned to an overweight selection.
///
/// Nonzero so that fitness-proportionate selection never divides by zero
/// on a population of infeasible candidates.
pub const INFEASIBLE_FITNESS: u64 = 1;

/// A knapsack instance: the shared catalogue plus a weight capacity.
///
/// Cheap to clone; the catalogue is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knapsack {
    catalogue: ItemCatalogue,
    capacity: u64,
}

impl Knapsack {
    /// Creates an instance. The catalogue must hold at least one item.
    pub fn new(catalogue: ItemCatalogue, capacity: u64) -> Result<Self, KnapsackError> {
        if catalogue.is_empty() {
            return Err(KnapsackError::EmptyCatalogue);
        }
        Ok(Self {
            catalogue,
            capacity,
        })
    }

    pub fn catalogue(&self) -> &ItemCatalogue {
        &self.catalogue
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of items, i.e. the required selection length.
    pub fn len(&self) -> usize {
        self.catalogue.len()
    }

    /// Always `false`: construction rejects empty catalogues.
    pub fn is_empty(&self) -> bool {
        self.catalogue.is_empty()
    }

    /// Builds a candidate from a selection, computing weight, value and fitness.
    ///
    /// Positions beyond the catalogue length carry no items; such a
    /// candidate still fails [`is_valid`](Self::is_valid) on length.
    pub fn evaluate(&self, selection: Vec<bool>) -> Candidate {
        let (weight, value) = selection
            .iter()
            .zip(self.catalogue.iter())
            .filter(|&(&selected, _)| selected)
            .fold((0u64, 0u64), |(w, v), (_, item)| {
                (w + item.weight, v + item.value)
            });

        let fitness = if weight > self.capacity {
            INFEASIBLE_FITNESS
        } else {
            value
        };

        Candidate {
            selection,
            weight,
            value,
            fitness,
        }
    }

    /// A candidate with nothing selected.
    pub fn empty_candidate(&self) -> Candidate {
        self.evaluate(vec![false; self.len()])
    }

    /// A candidate is valid when it is feasible, has a fitness above the
    /// infeasibility sentinel, and covers exactly the catalogue.
    pub fn is_valid(&self, candidate: &Candidate) -> bool {
        candidate.fitness > INFEASIBLE_FITNESS && candidate.len() == self.len()
    }

    /// Builds a random feasible candidate.
    ///
    /// Items are drawn uniformly without replacement from a working list.
    /// An item that fits is added; one that does not fit is dropped from
    /// the list, since the running weight only grows. Filling stops when
    /// the list is empty or, after each addition, with probability
    /// `exit_probability` so that some candidates are deliberately
    /// under-filled.
    pub fn random_candidate<R: Rng>(&self, exit_probability: f64, rng: &mut R) -> Candidate {
        let mut selection = vec![false; self.len()];
        let mut remaining: Vec<usize> = (0..self.len()).collect();
        let mut weight = 0u64;

        while !remaining.is_empty() {
            let pick = rng.random_range(0..remaining.len());
            let idx = remaining.swap_remove(pick);
            let item_weight = self.catalogue[idx].weight;

            if weight + item_weight > self.capacity {
                continue;
            }

            selection[idx] = true;
            weight += item_weight;

            if exit_probability > 0.0 && rng.random_range(0.0..1.0) < exit_probability {
                break;
            }
        }

        self.evaluate(selection)
    }
}

/// A single proposed knapsack selection with derived weight, value and fitness.
///
/// The default value is an empty placeholder of length zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    selection: Vec<bool>,
    weight: u64,
    value: u64,
    fitness: u64,
}

impl Candidate {
    pub fn selection(&self) -> &[bool] {
        &self.selection
    }

    /// Consumes the candidate, returning its selection for reuse.
    pub fn into_selection(self) -> Vec<bool> {
        self.selection
    }

    /// Total weight of selected items.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Total value of selected items, regardless of feasibility.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Value when feasible, [`INFEASIBLE_FITNESS`] when overweight.
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Ids of the selected items, ascending.
    pub fn selected_ids(&self) -> Vec<usize> {
        self.selection
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Fitness as a percentage of a best-known optimum.
    pub fn quality(&self, best_known: u64) -> f64 {
        if best_known == 0 {
            return 0.0;
        }
        self.fitness as f64 / best_known as f64 * 100.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.selection {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Sorts candidates by fitness, highest first. Stable.
pub fn sort_by_fitness_desc(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.fitness.cmp(&a.fitness));
}

/// Summary statistics over a set of fitness values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessStats {
    pub count: usize,
    pub min: u64,
    pub max: u64,
    pub sum: u64,
    pub mean: f64,
}

impl FitnessStats {
    /// Computes statistics; an empty input yields all zeros.
    pub fn from_fitness<I: IntoIterator<Item = u64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut min = u64::MAX;
        let mut max = 0u64;
        let mut sum = 0u64;

        for v in values {
            count += 1;
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }

        if count == 0 {
            return Self {
                count: 0,
                min: 0,
                max: 0,
                sum: 0,
                mean: 0.0,
            };
        }

        Self {
            count,
            min,
            max,
            sum,
            mean: sum as f64 / count as f64,
        }
    }
}
