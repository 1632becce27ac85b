//! Monte Carlo aggregation engine
//!
//! Paths are embarrassingly parallel: each one reads only the validated
//! config and its own seeded return stream, so the engine fans path indices
//! out across the rayon pool and reduces with counts and sums. No shared
//! mutable state, no locks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;

use crate::config::ValidatedConfig;
use crate::error::EngineError;
use crate::sampler::LognormalSampler;
use crate::simulation::path::{simulate_path, Path};
use crate::simulation::result::SimulationResult;

/// Paths simulated between cancellation checks.
pub const PATH_BATCH_SIZE: usize = 4_096;

/// Cooperative cancellation handle for a long-running aggregation.
///
/// Cloning shares the flag; any clone can cancel. The engine checks it
/// between path batches and fails the whole call with
/// [`EngineError::Cancelled`] rather than returning a partial result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Runs N independent paths and aggregates them into a [`SimulationResult`].
///
/// The engine itself is stateless apart from the base seed; concurrent runs
/// against the same engine never interfere.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    base_seed: u64,
}

impl SimulationEngine {
    /// Engine with an OS-entropy seed; every run set is fresh.
    pub fn from_entropy() -> Self {
        Self::with_seed(rand::random())
    }

    /// Engine with a fixed base seed. Identical seed and config reproduce
    /// identical results, path by path.
    pub fn with_seed(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Run the full simulation for a validated config.
    pub fn run(&self, config: &ValidatedConfig) -> Result<SimulationResult, EngineError> {
        self.run_cancellable(config, &CancelToken::new())
    }

    /// Run the full simulation, checking `cancel` between path batches.
    pub fn run_cancellable(
        &self,
        config: &ValidatedConfig,
        cancel: &CancelToken,
    ) -> Result<SimulationResult, EngineError> {
        let n = config.config().simulations as usize;
        let start = Instant::now();
        info!(
            "simulating {} paths over {} years (seed {})",
            n,
            config.horizon(),
            self.base_seed
        );

        let mut paths: Vec<Path> = Vec::with_capacity(n);
        let mut next = 0usize;
        while next < n {
            if cancel.is_cancelled() {
                warn!("run cancelled after {} of {} paths", next, n);
                return Err(EngineError::Cancelled);
            }
            let end = (next + PATH_BATCH_SIZE).min(n);
            // Indexed parallel iterator, so extension order matches path
            // index order regardless of worker scheduling.
            paths.par_extend((next..end).into_par_iter().map(|index| {
                let mut sampler = LognormalSampler::for_path(self.base_seed, index as u64);
                simulate_path(config, &mut sampler)
            }));
            next = end;
        }

        let result = SimulationResult::from_paths(&paths)?;
        info!(
            "aggregated {} paths in {:.1?}, rsc {:.4}",
            n,
            start.elapsed(),
            result.rsc
        );
        Ok(result)
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::from_entropy()
    }
}
