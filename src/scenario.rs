//! What-if scenario runner
//!
//! Scenarios are a fixed, enumerated set of single config transformations,
//! not open-ended mutation: each variant has one documented effect and one
//! defined failure mode, which keeps the semantics auditable. A scenario
//! run re-validates and re-runs the full engine on the modified config and
//! reports the score delta against the baseline.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::EngineError;
use crate::simulation::{SimulationEngine, SimulationResult};

/// Yearly amount added by `IncreaseContribution` (10K more per month).
pub const CONTRIBUTION_INCREMENT: f64 = 120_000.0;
/// Years subtracted from retirement age by `RetireEarlier`.
pub const RETIRE_EARLIER_YEARS: u32 = 5;
/// Fraction of the corpus retained after `MarketShock` (a 20% crash).
pub const MARKET_SHOCK_RETENTION: f64 = 0.8;
/// Yearly amount removed by `ReduceSpending` (10K less per month).
pub const SPENDING_REDUCTION: f64 = 120_000.0;

/// The fixed set of supported what-if transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    IncreaseContribution,
    RetireEarlier,
    MarketShock,
    ReduceSpending,
}

/// All scenarios, in presentation order.
pub const ALL_SCENARIOS: [Scenario; 4] = [
    Scenario::IncreaseContribution,
    Scenario::RetireEarlier,
    Scenario::MarketShock,
    Scenario::ReduceSpending,
];

impl Scenario {
    /// Short human label for this scenario.
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::IncreaseContribution => "Save 10K more per month",
            Scenario::RetireEarlier => "Retire 5 years earlier",
            Scenario::MarketShock => "Market crash",
            Scenario::ReduceSpending => "Spend 10K less per month",
        }
    }

    /// Description of the applied transformation, specialized to the
    /// modified config where that reads better.
    fn describe(&self, modified: &SimulationConfig) -> String {
        match self {
            Scenario::IncreaseContribution => {
                format!("Increased annual contribution by {CONTRIBUTION_INCREMENT:.0}")
            }
            Scenario::RetireEarlier => {
                format!("Retirement at age {}", modified.retirement_age)
            }
            Scenario::MarketShock => {
                let lost = (1.0 - MARKET_SHOCK_RETENTION) * 100.0;
                format!("Initial corpus reduced by {lost:.0}%")
            }
            Scenario::ReduceSpending => {
                format!("Reduced annual spending by {SPENDING_REDUCTION:.0}")
            }
        }
    }

    /// Derive the modified config for this scenario.
    ///
    /// Fails with [`EngineError::ScenarioInvalid`] when the transformation
    /// itself would break a config invariant; the baseline is never touched.
    pub fn apply(&self, base: &SimulationConfig) -> Result<SimulationConfig, EngineError> {
        let mut modified = base.clone();
        match self {
            Scenario::IncreaseContribution => {
                modified.annual_contribution += CONTRIBUTION_INCREMENT;
            }
            Scenario::RetireEarlier => {
                let target = modified
                    .retirement_age
                    .checked_sub(RETIRE_EARLIER_YEARS)
                    .filter(|age| *age > modified.current_age)
                    .ok_or_else(|| {
                        EngineError::ScenarioInvalid(format!(
                            "retiring {} years earlier would put retirement at or before \
                             the current age of {}",
                            RETIRE_EARLIER_YEARS, modified.current_age
                        ))
                    })?;
                modified.retirement_age = target;
            }
            Scenario::MarketShock => {
                modified.initial_corpus *= MARKET_SHOCK_RETENTION;
            }
            Scenario::ReduceSpending => {
                modified.annual_spending = (modified.annual_spending - SPENDING_REDUCTION).max(0.0);
            }
        }
        Ok(modified)
    }
}

/// Outcome of one scenario run against a baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub label: String,
    pub description: String,
    /// New RSC minus the baseline RSC
    pub rsc_delta: f64,
    pub new_rsc: f64,
}

/// Runs scenarios against a fixed baseline config and its computed result.
///
/// Each run is an independent synchronous call into the engine; running
/// scenarios in any order or combination yields the same individual
/// results because nothing mutable is shared between runs.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: SimulationEngine,
    base_config: SimulationConfig,
    base_rsc: f64,
}

impl ScenarioRunner {
    pub fn new(
        engine: SimulationEngine,
        base_config: SimulationConfig,
        base_result: &SimulationResult,
    ) -> Self {
        Self {
            engine,
            base_config,
            base_rsc: base_result.rsc,
        }
    }

    /// RSC of the baseline this runner compares against.
    pub fn base_rsc(&self) -> f64 {
        self.base_rsc
    }

    /// Apply one scenario, re-run the full engine, and report the delta.
    pub fn run(&self, scenario: Scenario) -> Result<ScenarioResult, EngineError> {
        let modified = scenario.apply(&self.base_config)?;
        // A transformation that produces an invalid config is the
        // scenario's fault, not the caller's plan.
        let validated = modified.clone().validate().map_err(|err| match err {
            EngineError::InvalidConfig(msg) => EngineError::ScenarioInvalid(msg),
            other => other,
        })?;

        let result = self.engine.run(&validated)?;
        debug!(
            "scenario {:?}: rsc {:.4} -> {:.4}",
            scenario, self.base_rsc, result.rsc
        );
        Ok(ScenarioResult {
            label: scenario.label().to_string(),
            description: scenario.describe(&modified),
            rsc_delta: result.rsc - self.base_rsc,
            new_rsc: result.rsc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SimulationConfig {
        SimulationConfig {
            initial_corpus: 5_000_000.0,
            annual_contribution: 600_000.0,
            annual_spending: 960_000.0,
            current_age: 30,
            retirement_age: 55,
            end_age: 95,
            mean_return: 0.07,
            volatility: 0.12,
            simulations: 1_000,
            delta_contribution: None,
            life_event_shock: None,
        }
    }

    fn runner(config: SimulationConfig) -> ScenarioRunner {
        let engine = SimulationEngine::with_seed(21);
        let validated = config.clone().validate().unwrap();
        let base = engine.run(&validated).unwrap();
        ScenarioRunner::new(engine, config, &base)
    }

    #[test]
    fn increase_contribution_adds_fixed_increment() {
        let modified = Scenario::IncreaseContribution.apply(&base_config()).unwrap();
        assert_eq!(modified.annual_contribution, 720_000.0);
    }

    #[test]
    fn retire_earlier_subtracts_five_years() {
        let modified = Scenario::RetireEarlier.apply(&base_config()).unwrap();
        assert_eq!(modified.retirement_age, 50);
    }

    #[test]
    fn retire_earlier_rejects_collision_with_current_age() {
        let mut config = base_config();
        config.current_age = 52;
        config.retirement_age = 55;
        let err = Scenario::RetireEarlier.apply(&config).unwrap_err();
        assert!(matches!(err, EngineError::ScenarioInvalid(_)));

        // Exactly five years apart is also invalid: 55 - 5 == 50.
        let mut config = base_config();
        config.current_age = 50;
        config.retirement_age = 55;
        assert!(Scenario::RetireEarlier.apply(&config).is_err());
    }

    #[test]
    fn market_shock_retains_eighty_percent() {
        let modified = Scenario::MarketShock.apply(&base_config()).unwrap();
        assert_eq!(modified.initial_corpus, 4_000_000.0);
    }

    #[test]
    fn reduce_spending_floors_at_zero() {
        let mut config = base_config();
        config.annual_spending = 50_000.0;
        let modified = Scenario::ReduceSpending.apply(&config).unwrap();
        assert_eq!(modified.annual_spending, 0.0);
    }

    #[test]
    fn apply_never_mutates_the_baseline() {
        let config = base_config();
        for scenario in ALL_SCENARIOS {
            let _ = scenario.apply(&config);
        }
        assert_eq!(config, base_config());
    }

    #[test]
    fn runner_reports_delta_against_baseline() {
        let runner = runner(base_config());
        let outcome = runner.run(Scenario::IncreaseContribution).unwrap();
        assert_eq!(outcome.label, "Save 10K more per month");
        assert!((outcome.new_rsc - (runner.base_rsc() + outcome.rsc_delta)).abs() < 1e-12);
        // More savings can only help for a fixed path set.
        assert!(outcome.rsc_delta >= 0.0);
    }

    #[test]
    fn scenarios_are_order_insensitive() {
        let runner = runner(base_config());
        let forward: Vec<f64> = ALL_SCENARIOS
            .iter()
            .map(|s| runner.run(*s).unwrap().new_rsc)
            .collect();
        let mut reverse: Vec<f64> = ALL_SCENARIOS
            .iter()
            .rev()
            .map(|s| runner.run(*s).unwrap().new_rsc)
            .collect();
        reverse.reverse();
        assert_eq!(forward, reverse);
    }

    #[test]
    fn scenario_ids_match_the_wire_contract() {
        assert_eq!(
            serde_json::to_string(&Scenario::IncreaseContribution).unwrap(),
            "\"increase_contribution\""
        );
        assert_eq!(
            serde_json::from_str::<Scenario>("\"retire_earlier\"").unwrap(),
            Scenario::RetireEarlier
        );
    }
}
