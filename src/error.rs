//! Error taxonomy for the simulation engine

use thiserror::Error;

/// All failure modes surfaced across the engine boundary.
///
/// Validation errors are detected before any simulation work begins; once
/// path generation starts, either a complete result is produced or one of
/// the non-config variants is raised. Partial results are never returned.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request failed validation. The message names the violated
    /// constraint so callers can surface a user-correctable error.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A scenario transformation would itself violate config invariants
    /// (e.g. retiring earlier than the current age). Kept distinct from
    /// `InvalidConfig` so callers can blame the scenario, not the plan.
    #[error("invalid scenario: {0}")]
    ScenarioInvalid(String),

    /// An internal fault during path generation or aggregation.
    #[error("simulation failed: {0}")]
    SimulationFailed(String),

    /// The run was cancelled cooperatively between path batches.
    #[error("simulation cancelled before completion")]
    Cancelled,
}

impl EngineError {
    /// Whether the caller can recover by adjusting input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidConfig(_) | EngineError::ScenarioInvalid(_)
        )
    }
}
