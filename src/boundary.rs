//! Transport-independent boundary contract
//!
//! The request/response shapes a transport layer (HTTP handler, Lambda,
//! CLI) serializes, plus the two entry points it calls. HTTP framing,
//! auth, and CORS stay on the transport side; this module owns only the
//! `{config} -> {rsc, final_values, survival_curve}` contract and its
//! scenario extension.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::EngineError;
use crate::scenario::{Scenario, ScenarioRunner};
use crate::simulation::{SimulationEngine, SimulationResult};

/// A plain simulation request: the flat config record plus an optional
/// seed for reproducible runs. No seed means OS entropy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(flatten)]
    pub config: SimulationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// A scenario request: same record with a scenario identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRequest {
    #[serde(flatten)]
    pub config: SimulationConfig,
    pub scenario: Scenario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Scenario response with the score fields camelCased as the original
/// frontend contract expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub label: String,
    pub description: String,
    #[serde(rename = "rscDelta")]
    pub rsc_delta: f64,
    #[serde(rename = "newRSC")]
    pub new_rsc: f64,
}

fn engine_for(seed: Option<u64>) -> SimulationEngine {
    match seed {
        Some(seed) => SimulationEngine::with_seed(seed),
        None => SimulationEngine::from_entropy(),
    }
}

/// Validate and run a simulation request end to end.
pub fn run_simulation(request: &SimulationRequest) -> Result<SimulationResult, EngineError> {
    let validated = request.config.clone().validate()?;
    engine_for(request.seed).run(&validated)
}

/// Run the baseline and one scenario against it, returning the delta.
///
/// Base and scenario runs share the engine (and therefore the seed), so
/// the reported delta reflects the transformation, not resampling noise.
pub fn run_scenario(request: &ScenarioRequest) -> Result<ScenarioResponse, EngineError> {
    let validated = request.config.clone().validate()?;
    let engine = engine_for(request.seed);
    let base = engine.run(&validated)?;

    let runner = ScenarioRunner::new(engine, request.config.clone(), &base);
    let outcome = runner.run(request.scenario)?;
    Ok(ScenarioResponse {
        label: outcome.label,
        description: outcome.description,
        rsc_delta: outcome.rsc_delta,
        new_rsc: outcome.new_rsc,
    })
}
