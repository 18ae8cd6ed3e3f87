//! Error type shared by every engine.
//!
//! Only configuration-shaped problems are errors. Infeasible offspring,
//! exhausted retry budgets and a frozen annealer are ordinary search
//! outcomes and never surface here.

use thiserror::Error;

/// Errors raised while building a knapsack instance or an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnapsackError {
    /// A method identifier such as `"RWS"` or `"2PX"` was not recognized.
    #[error("unknown {kind} method: {value:?}")]
    UnknownMethod {
        /// Which family the identifier belongs to (`selection`, `crossover`, `mutation`).
        kind: &'static str,
        /// The identifier as supplied.
        value: String,
    },

    /// A numeric parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The item catalogue text or item list is malformed.
    #[error("invalid item catalogue at line {line}: {reason}")]
    Catalogue {
        /// 1-based line (or item position) where the problem was found.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// A knapsack instance needs at least one item.
    #[error("item catalogue is empty")]
    EmptyCatalogue,
}
