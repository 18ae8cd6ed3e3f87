//! Genetic operators over boolean selections.
//!
//! The in-place primitives ([`bit_flip`], [`exchange`], [`inversion`],
//! [`insertion`], [`displacement`], [`splice`]) only rearrange bits and know
//! nothing about feasibility. [`crossover`] and [`mutate`] wrap them with
//! the knapsack's validity check and a bounded retry budget. Both are
//! copy-on-write: parents are never modified, and every returned candidate
//! carries a freshly computed fitness.
//!
//! # Crossover Operators
//!
//! - [`CrossoverMethod::OnePoint`] (`1PX`): head of one parent, tail of the other
//! - [`CrossoverMethod::TwoPoint`] (`2PX`): swap the middle segment
//!
//! # Mutation Operators
//!
//! - [`bit_flip`] (`BFM`): toggle one position — O(1)
//! - [`exchange`] (`EXM`): swap two positions — O(1)
//! - [`inversion`] (`IVM`): reverse a segment — O(n)
//! - [`insertion`] (`ISM`): move one bit after another position — O(n)
//! - [`displacement`] (`DPM`): move a whole segment elsewhere — O(n)
//!
//! # References
//!
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling
//!   Salesman Problem: A Review of Representations and Operators"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::error::KnapsackError;
use crate::knapsack::{Candidate, Knapsack};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Method identifiers
// ============================================================================

/// Crossover variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverMethod {
    /// One cut point, `"1PX"`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "1PX"))]
    OnePoint,
    /// Two cut points, `"2PX"`.
    #[cfg_attr(feature = "serde", serde(rename = "2PX"))]
    TwoPoint,
}

impl CrossoverMethod {
    pub fn identifier(&self) -> &'static str {
        match self {
            CrossoverMethod::OnePoint => "1PX",
            CrossoverMethod::TwoPoint => "2PX",
        }
    }
}

impl fmt::Display for CrossoverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for CrossoverMethod {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1PX" => Ok(CrossoverMethod::OnePoint),
            "2PX" => Ok(CrossoverMethod::TwoPoint),
            other => Err(KnapsackError::UnknownMethod {
                kind: "crossover",
                value: other.to_string(),
            }),
        }
    }
}

/// Mutation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationMethod {
    /// `"BFM"`
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "BFM"))]
    BitFlip,
    /// `"EXM"`
    #[cfg_attr(feature = "serde", serde(rename = "EXM"))]
    Exchange,
    /// `"IVM"`
    #[cfg_attr(feature = "serde", serde(rename = "IVM"))]
    Inversion,
    /// `"ISM"`
    #[cfg_attr(feature = "serde", serde(rename = "ISM"))]
    Insertion,
    /// `"DPM"`
    #[cfg_attr(feature = "serde", serde(rename = "DPM"))]
    Displacement,
}

impl MutationMethod {
    pub const ALL: [MutationMethod; 5] = [
        MutationMethod::BitFlip,
        MutationMethod::Exchange,
        MutationMethod::Inversion,
        MutationMethod::Insertion,
        MutationMethod::Displacement,
    ];

    pub fn identifier(&self) -> &'static str {
        match self {
            MutationMethod::BitFlip => "BFM",
            MutationMethod::Exchange => "EXM",
            MutationMethod::Inversion => "IVM",
            MutationMethod::Insertion => "ISM",
            MutationMethod::Displacement => "DPM",
        }
    }

    /// Applies the primitive for this variant in place.
    pub fn apply<R: Rng>(&self, selection: &mut Vec<bool>, rng: &mut R) {
        match self {
            MutationMethod::BitFlip => bit_flip(selection, rng),
            MutationMethod::Exchange => exchange(selection, rng),
            MutationMethod::Inversion => inversion(selection, rng),
            MutationMethod::Insertion => insertion(selection, rng),
            MutationMethod::Displacement => displacement(selection, rng),
        }
    }
}

impl fmt::Display for MutationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for MutationMethod {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BFM" => Ok(MutationMethod::BitFlip),
            "EXM" => Ok(MutationMethod::Exchange),
            "IVM" => Ok(MutationMethod::Inversion),
            "ISM" => Ok(MutationMethod::Insertion),
            "DPM" => Ok(MutationMethod::Displacement),
            other => Err(KnapsackError::UnknownMethod {
                kind: "mutation",
                value: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Crossover
// ============================================================================

/// Splices two selections at `cut1 <= cut2`.
///
/// `child1 = p1[..cut1] ++ p2[cut1..cut2] ++ p1[cut2..]` and `child2` is the
/// mirror image. A one-point crossover at `c` is `splice(p1, p2, c, n)`.
///
/// # Panics
/// Panics if the parents differ in length or `cut1 > cut2 > n`.
pub fn splice(p1: &[bool], p2: &[bool], cut1: usize, cut2: usize) -> (Vec<bool>, Vec<bool>) {
    let n = p1.len();
    assert_eq!(n, p2.len(), "parents must have equal length");
    assert!(cut1 <= cut2 && cut2 <= n, "cut points out of order");

    let build = |a: &[bool], b: &[bool]| {
        let mut child = Vec::with_capacity(n);
        child.extend_from_slice(&a[..cut1]);
        child.extend_from_slice(&b[cut1..cut2]);
        child.extend_from_slice(&a[cut2..]);
        child
    };

    (build(p1, p2), build(p2, p1))
}

/// Draws cut points for the given crossover method.
fn cut_points<R: Rng>(n: usize, method: CrossoverMethod, rng: &mut R) -> (usize, usize) {
    match method {
        CrossoverMethod::OnePoint => (rng.random_range(0..n), n),
        CrossoverMethod::TwoPoint => {
            let first = rng.random_range(0..n);
            let second = rng.random_range(first..n);
            (first, second)
        }
    }
}

/// Crossover with retries and parent fallback.
///
/// Up to `attempts` splices are tried; valid children are collected until
/// two are found. If none is ever valid, the parents are returned; if only
/// one is, it is paired with `parent1`. Always yields exactly two
/// candidates of the catalogue's length.
pub fn crossover<R: Rng>(
    knapsack: &Knapsack,
    parent1: &Candidate,
    parent2: &Candidate,
    method: CrossoverMethod,
    attempts: usize,
    rng: &mut R,
) -> (Candidate, Candidate) {
    let n = parent1.len();
    let mut children: Vec<Candidate> = Vec::with_capacity(2);

    if n > 0 && n == parent2.len() {
        for _ in 0..attempts {
            let (cut1, cut2) = cut_points(n, method, rng);
            let (s1, s2) = splice(parent1.selection(), parent2.selection(), cut1, cut2);

            for child in [knapsack.evaluate(s1), knapsack.evaluate(s2)] {
                if children.len() < 2 && knapsack.is_valid(&child) {
                    children.push(child);
                }
            }
            if children.len() == 2 {
                break;
            }
        }
    }

    let mut children = children.into_iter();
    match (children.next(), children.next()) {
        (Some(c1), Some(c2)) => (c1, c2),
        (Some(c1), None) => (c1, parent1.clone()),
        _ => (parent1.clone(), parent2.clone()),
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutation with retries and no-op fallback.
///
/// Each attempt copies the selection, applies `method`, and re-evaluates.
/// The first valid result is returned; if every attempt is invalid, a copy
/// of `candidate` is returned unchanged.
pub fn mutate<R: Rng>(
    knapsack: &Knapsack,
    candidate: &Candidate,
    method: MutationMethod,
    attempts: usize,
    rng: &mut R,
) -> Candidate {
    for _ in 0..attempts {
        let mut selection = candidate.selection().to_vec();
        method.apply(&mut selection, rng);

        let mutated = knapsack.evaluate(selection);
        if knapsack.is_valid(&mutated) {
            return mutated;
        }
    }
    candidate.clone()
}

/// Bit-flip mutation: toggle one random position.
pub fn bit_flip<R: Rng>(selection: &mut [bool], rng: &mut R) {
    if selection.is_empty() {
        return;
    }
    let i = rng.random_range(0..selection.len());
    selection[i] = !selection[i];
}

/// Exchange mutation: swap two random positions.
pub fn exchange<R: Rng>(selection: &mut [bool], rng: &mut R) {
    let n = selection.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    selection.swap(i, j);
}

/// Inversion mutation: reverse the half-open segment `[start, end)` between
/// two random positions.
///
/// Equal draws leave the selection unchanged, and the last position is
/// never moved.
pub fn inversion<R: Rng>(selection: &mut [bool], rng: &mut R) {
    let n = selection.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    selection[start..end].reverse();
}

/// Insertion mutation: remove the bit at one random position and reinsert
/// it immediately after another random position.
///
/// When the anchor is the last position, the bit goes to the end.
pub fn insertion<R: Rng>(selection: &mut Vec<bool>, rng: &mut R) {
    let n = selection.len();
    if n < 2 {
        return;
    }
    let anchor = rng.random_range(0..n);
    let from = rng.random_range(0..n);

    let bit = selection.remove(from);
    let to = (anchor + 1).min(selection.len());
    selection.insert(to, bit);
}

/// Displacement mutation: cut a random segment (both ends inclusive) and
/// reinsert it as a block at a random position of the remainder.
pub fn displacement<R: Rng>(selection: &mut Vec<bool>, rng: &mut R) {
    let n = selection.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    let block: Vec<bool> = selection.drain(start..=end).collect();
    let at = rng.random_range(0..=selection.len());
    selection.splice(at..at, block);
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
