//! Fixed-budget search driver.
//!
//! [`SearchRunner`] calls [`SearchEngine::step`] once per iteration,
//! records the candidate each iteration reports, and stops early when the
//! engine terminates or a cancellation flag is raised.

use crate::engine::SearchEngine;
use crate::knapsack::Candidate;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Iterations between progress events.
pub const LOG_INTERVAL: usize = 100;

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The candidate reported by each completed iteration, in order.
    pub history: Vec<Candidate>,

    /// The fittest candidate seen, including the engine's initial state.
    pub best: Candidate,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Whether the engine signalled termination before the budget ran out.
    pub terminated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Fitness of each reported candidate.
    pub fn fitness_history(&self) -> Vec<u64> {
        self.history.iter().map(Candidate::fitness).collect()
    }

    /// Reported candidates at `k` evenly spaced checkpoints.
    ///
    /// Checkpoint `j` (1-based) is iteration `ceil(j * len / k)`, so the
    /// last checkpoint is always the final iteration. `convergence(4)`
    /// gives the quartiles.
    pub fn convergence(&self, k: usize) -> Vec<&Candidate> {
        let len = self.history.len();
        if k == 0 || len == 0 {
            return Vec::new();
        }
        (1..=k)
            .map(|j| &self.history[(j * len).div_ceil(k) - 1])
            .collect()
    }
}

/// Drives a [`SearchEngine`] for a fixed iteration budget.
///
/// # Usage
///
/// ```
/// use knapsack_metaheur::engine::{Engine, EngineConfig};
/// use knapsack_metaheur::ga::GaConfig;
/// use knapsack_metaheur::knapsack::{ItemCatalogue, Knapsack};
/// use knapsack_metaheur::random::create_rng;
/// use knapsack_metaheur::runner::SearchRunner;
///
/// let catalogue = ItemCatalogue::parse("#;weight;value\n1;10;60\n2;20;100\n3;30;120\n").unwrap();
/// let knapsack = Knapsack::new(catalogue, 50).unwrap();
/// let mut rng = create_rng(42);
///
/// let config = EngineConfig::from(GaConfig::default().with_population_size(20));
/// let mut engine = Engine::build(knapsack, config, &mut rng).unwrap();
/// let result = SearchRunner::run(&mut engine, 30, &mut rng);
///
/// assert_eq!(result.iterations, 30);
/// assert_eq!(result.best.fitness(), 220);
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs `iterations` steps, or fewer if the engine terminates.
    pub fn run<E: SearchEngine, R: Rng>(
        engine: &mut E,
        iterations: usize,
        rng: &mut R,
    ) -> SearchResult {
        Self::run_with_cancel(engine, iterations, rng, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked before each iteration; a run cancelled before
    /// its first step reports no history.
    pub fn run_with_cancel<E: SearchEngine, R: Rng>(
        engine: &mut E,
        iterations: usize,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SearchResult {
        let start = Instant::now();
        let mut best = engine.best();
        let mut history = Vec::with_capacity(iterations);
        let mut terminated = false;
        let mut cancelled = false;

        info!(
            event = "search_start",
            engine = engine.name(),
            iterations,
            initial_fitness = best.fitness(),
        );

        for iteration in 0..iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let Some(reported) = engine.step(rng) else {
                terminated = true;
                break;
            };

            if reported.fitness() > best.fitness() {
                best = reported.clone();
            }
            history.push(reported);

            if (iteration + 1).is_multiple_of(LOG_INTERVAL) {
                let stats = engine.stats();
                debug!(
                    event = "progress",
                    iteration = iteration + 1,
                    best = best.fitness(),
                    count = stats.count,
                    min = stats.min,
                    max = stats.max,
                    mean = stats.mean,
                );
            }
        }

        let elapsed = start.elapsed();
        info!(
            event = "search_end",
            engine = engine.name(),
            iterations = history.len(),
            best = best.fitness(),
            terminated,
            cancelled,
            elapsed_ms = elapsed.as_millis() as u64,
        );

        SearchResult {
            iterations: history.len(),
            history,
            best,
            terminated,
            cancelled,
            elapsed,
        }
    }
}
