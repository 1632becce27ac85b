//! Resilience Sim - Monte Carlo retirement resilience simulator
//!
//! This library provides:
//! - Config validation with a fixed simulation horizon
//! - Lognormal annual-return sampling behind an injectable capability
//! - Path-by-path trajectory simulation with cash flows, shocks, and
//!   depletion detection
//! - Parallel aggregation into a resilience score (RSC), survival curve,
//!   and terminal balance distribution
//! - A fixed set of what-if scenarios with score deltas

pub mod boundary;
pub mod config;
pub mod error;
pub mod sampler;
pub mod scenario;
pub mod simulation;

// Re-export commonly used types
pub use config::{LifeEventShock, RiskProfile, SimulationConfig, ValidatedConfig, MAX_SIMULATIONS};
pub use error::EngineError;
pub use sampler::{LognormalSampler, ReturnSampler};
pub use scenario::{Scenario, ScenarioResult, ScenarioRunner, ALL_SCENARIOS};
pub use simulation::{CancelToken, SimulationEngine, SimulationResult};
