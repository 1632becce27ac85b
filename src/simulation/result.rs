//! Aggregated simulation output

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::simulation::path::Path;

/// Aggregate of N independent paths, as returned across the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Resilience score: fraction of paths solvent through the final year
    pub rsc: f64,
    /// Terminal balance of every path, in path-index order
    pub final_values: Vec<f64>,
    /// Fraction of paths still solvent at each age offset; non-increasing
    pub survival_curve: Vec<f64>,
}

impl SimulationResult {
    /// Reduce simulated paths into the aggregate result.
    ///
    /// Counts and sums only, so the reduction is insensitive to the order
    /// paths were computed in. Fails with `SimulationFailed` if any terminal
    /// balance is non-finite (numeric overflow during compounding).
    pub fn from_paths(paths: &[Path]) -> Result<Self, EngineError> {
        let n = paths.len();
        debug_assert!(n > 0, "aggregation requires at least one path");
        let horizon = paths[0].balances.len();

        let mut survivors = 0usize;
        let mut solvent_counts = vec![0usize; horizon];
        let mut final_values = Vec::with_capacity(n);

        for path in paths {
            if !path.final_balance.is_finite() {
                return Err(EngineError::SimulationFailed(format!(
                    "path produced a non-finite terminal balance ({})",
                    path.final_balance
                )));
            }
            if path.survived {
                survivors += 1;
            }
            for (year, count) in solvent_counts.iter_mut().enumerate() {
                if path.solvent_at(year) {
                    *count += 1;
                }
            }
            final_values.push(path.final_balance);
        }

        let survival_curve = solvent_counts
            .into_iter()
            .map(|count| count as f64 / n as f64)
            .collect();

        Ok(Self {
            rsc: survivors as f64 / n as f64,
            final_values,
            survival_curve,
        })
    }

    /// Number of simulated paths behind this result.
    pub fn path_count(&self) -> usize {
        self.final_values.len()
    }

    /// Median terminal balance (midpoint of a sorted copy).
    pub fn median_final_value(&self) -> f64 {
        let mut sorted = self.final_values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }
}
