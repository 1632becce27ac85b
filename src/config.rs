//! Simulation request structures and validation
//!
//! A raw [`SimulationConfig`] arrives over the boundary as a flat record of
//! numeric fields plus an optional nested shock object. Validation turns it
//! into a [`ValidatedConfig`] with a fixed simulation horizon; everything
//! downstream reads the config through that wrapper and never mutates it.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Upper bound on the number of Monte Carlo paths in a single request.
pub const MAX_SIMULATIONS: u32 = 200_000;

/// A temporary extra withdrawal modeling a life event (medical bill,
/// house purchase, ...) applied for `duration` consecutive years starting
/// at `age`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeEventShock {
    /// Age at which the shock starts
    pub age: u32,
    /// Amount withdrawn each shock year
    pub amount: f64,
    /// Number of consecutive years the shock applies
    pub duration: u32,
}

/// Raw simulation request as received from the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting portfolio balance
    pub initial_corpus: f64,
    /// Amount added each year before retirement
    pub annual_contribution: f64,
    /// Amount withdrawn each year from retirement onward
    pub annual_spending: f64,
    /// Age at the start of the simulation
    pub current_age: u32,
    /// Age at which contributions stop and spending starts
    pub retirement_age: u32,
    /// Last simulated age
    pub end_age: u32,
    /// Mean annual return (decimal fraction, e.g. 0.07)
    pub mean_return: f64,
    /// Annual return volatility (decimal fraction, >= 0)
    pub volatility: f64,
    /// Number of Monte Carlo paths
    pub simulations: u32,
    /// Extra annual contribution on top of `annual_contribution`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_contribution: Option<f64>,
    /// Optional one-off life event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_event_shock: Option<LifeEventShock>,
}

impl SimulationConfig {
    /// Validate and freeze this config for simulation.
    ///
    /// Fails fast with [`EngineError::InvalidConfig`] naming the violated
    /// constraint; no simulation work happens before this check.
    pub fn validate(self) -> Result<ValidatedConfig, EngineError> {
        fn currency(name: &str, value: f64) -> Result<(), EngineError> {
            if !value.is_finite() {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
            Ok(())
        }

        currency("initial_corpus", self.initial_corpus)?;
        currency("annual_contribution", self.annual_contribution)?;
        currency("annual_spending", self.annual_spending)?;
        if let Some(delta) = self.delta_contribution {
            currency("delta_contribution", delta)?;
        }

        if self.current_age >= self.retirement_age {
            return Err(EngineError::InvalidConfig(format!(
                "current_age ({}) must be below retirement_age ({})",
                self.current_age, self.retirement_age
            )));
        }
        if self.retirement_age >= self.end_age {
            return Err(EngineError::InvalidConfig(format!(
                "retirement_age ({}) must be below end_age ({})",
                self.retirement_age, self.end_age
            )));
        }

        if !self.mean_return.is_finite() || self.mean_return <= -1.0 {
            return Err(EngineError::InvalidConfig(format!(
                "mean_return must be a finite fraction above -1.0, got {}",
                self.mean_return
            )));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "volatility must be non-negative and finite, got {}",
                self.volatility
            )));
        }

        if self.simulations < 1 || self.simulations > MAX_SIMULATIONS {
            return Err(EngineError::InvalidConfig(format!(
                "simulations must be in [1, {MAX_SIMULATIONS}], got {}",
                self.simulations
            )));
        }

        if let Some(shock) = &self.life_event_shock {
            currency("life_event_shock.amount", shock.amount)?;
            if shock.duration < 1 {
                return Err(EngineError::InvalidConfig(
                    "life_event_shock.duration must be at least 1 year".to_string(),
                ));
            }
        }

        let horizon = self.end_age - self.current_age + 1;
        Ok(ValidatedConfig {
            config: self,
            horizon,
        })
    }
}

/// A config that has passed validation, plus the derived horizon.
///
/// Produced only by [`SimulationConfig::validate`]; read-only from here on,
/// so paths can share it freely across threads.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    config: SimulationConfig,
    horizon: u32,
}

impl ValidatedConfig {
    /// The underlying request values.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of simulated years, `end_age - current_age + 1`.
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Effective annual contribution including any delta override.
    pub fn effective_contribution(&self) -> f64 {
        self.config.annual_contribution + self.config.delta_contribution.unwrap_or(0.0)
    }
}

/// Named return/volatility presets offered by the planner UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// (mean return, volatility) for this profile.
    pub fn assumptions(&self) -> (f64, f64) {
        match self {
            RiskProfile::Conservative => (0.05, 0.08),
            RiskProfile::Moderate => (0.07, 0.12),
            RiskProfile::Aggressive => (0.10, 0.18),
        }
    }

    /// Overwrite the return assumptions of `config` with this preset.
    pub fn apply(&self, config: &mut SimulationConfig) {
        let (mean, vol) = self.assumptions();
        config.mean_return = mean;
        config.volatility = vol;
    }
}
