//! Single-trajectory simulation
//!
//! One path advances a balance year by year from current age to end age.
//! All randomness is isolated to the return draw, so a path is fully
//! deterministic given its factor sequence.

use crate::config::ValidatedConfig;
use crate::sampler::ReturnSampler;

/// One simulated trajectory of yearly balances.
#[derive(Debug, Clone)]
pub struct Path {
    /// Balance at the end of each simulated year, indexed by age offset
    /// from current age. Exactly `horizon` entries, never negative.
    pub balances: Vec<f64>,
    /// Whether the balance stayed positive through the final year
    pub survived: bool,
    /// Balance after the final simulated year
    pub final_balance: f64,
}

impl Path {
    /// Whether the path was still solvent at the given age offset.
    pub fn solvent_at(&self, year: usize) -> bool {
        self.balances[year] > 0.0
    }
}

/// Simulate one path under a validated config.
///
/// Yearly ordering is fixed: growth compounds first, then contributions or
/// spending, then any life-event shock. Once the balance reaches zero the
/// path is depleted: the balance is clamped to zero and no further growth,
/// cash flow, or return draws happen (no resurrection).
pub fn simulate_path<S: ReturnSampler>(config: &ValidatedConfig, sampler: &mut S) -> Path {
    let params = config.config();
    let horizon = config.horizon();

    let mut balances = Vec::with_capacity(horizon as usize);
    let mut balance = params.initial_corpus;
    let mut depleted = balance <= 0.0;

    for year in 0..horizon {
        let age = params.current_age + year;

        if !depleted {
            balance *= sampler.draw_factor(params.mean_return, params.volatility);

            if age < params.retirement_age {
                balance += config.effective_contribution();
            } else {
                balance -= params.annual_spending;
            }

            if let Some(shock) = &params.life_event_shock {
                if age >= shock.age && age < shock.age.saturating_add(shock.duration) {
                    balance -= shock.amount;
                }
            }

            if balance <= 0.0 {
                balance = 0.0;
                depleted = true;
            }
        }

        balances.push(balance);
    }

    Path {
        survived: balance > 0.0,
        final_balance: balance,
        balances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LifeEventShock, SimulationConfig};
    use crate::sampler::{FixedSampler, ScriptedSampler};
    use approx::assert_relative_eq;

    fn config() -> SimulationConfig {
        SimulationConfig {
            initial_corpus: 1_000.0,
            annual_contribution: 100.0,
            annual_spending: 200.0,
            current_age: 60,
            retirement_age: 62,
            end_age: 65,
            mean_return: 0.0,
            volatility: 0.0,
            simulations: 1,
            delta_contribution: None,
            life_event_shock: None,
        }
    }

    #[test]
    fn records_one_balance_per_simulated_year() {
        let validated = config().validate().unwrap();
        let path = simulate_path(&validated, &mut FixedSampler { factor: 1.0 });
        assert_eq!(path.balances.len(), 6); // ages 60..=65
    }

    #[test]
    fn growth_compounds_before_cash_flow() {
        // Year 0 at age 60: 1000 * 1.10 + 100 = 1200, not (1000 + 100) * 1.10
        let validated = config().validate().unwrap();
        let path = simulate_path(&validated, &mut ScriptedSampler::new(vec![1.10, 1.0]));
        assert_relative_eq!(path.balances[0], 1_200.0);
    }

    #[test]
    fn contributes_before_retirement_and_spends_after() {
        let validated = config().validate().unwrap();
        let path = simulate_path(&validated, &mut FixedSampler { factor: 1.0 });
        // Ages 60, 61 contribute; 62..=65 spend.
        assert_eq!(path.balances[0], 1_100.0);
        assert_eq!(path.balances[1], 1_200.0);
        assert_eq!(path.balances[2], 1_000.0);
        assert_eq!(path.balances[3], 800.0);
    }

    #[test]
    fn delta_contribution_adds_to_annual_contribution() {
        let mut raw = config();
        raw.delta_contribution = Some(50.0);
        let validated = raw.validate().unwrap();
        let path = simulate_path(&validated, &mut FixedSampler { factor: 1.0 });
        assert_eq!(path.balances[0], 1_150.0);
    }

    #[test]
    fn shock_applies_for_each_year_of_its_duration() {
        let mut raw = config();
        raw.life_event_shock = Some(LifeEventShock {
            age: 60,
            amount: 300.0,
            duration: 2,
        });
        let validated = raw.validate().unwrap();
        let path = simulate_path(&validated, &mut FixedSampler { factor: 1.0 });
        assert_eq!(path.balances[0], 800.0); // 1000 + 100 - 300
        assert_eq!(path.balances[1], 600.0); // 800 + 100 - 300
        assert_eq!(path.balances[2], 400.0); // shock window over, spend 200
    }

    #[test]
    fn depleted_path_stays_at_zero() {
        let mut raw = config();
        raw.initial_corpus = 250.0;
        raw.annual_contribution = 0.0;
        let validated = raw.validate().unwrap();
        let path = simulate_path(&validated, &mut FixedSampler { factor: 1.0 });
        // Spending starts at age 62 with 250 in the pot.
        assert_eq!(path.balances[2], 50.0);
        assert_eq!(path.balances[3], 0.0);
        assert!(path.balances[3..].iter().all(|b| *b == 0.0));
        assert!(!path.survived);
        assert_eq!(path.final_balance, 0.0);
    }

    #[test]
    fn no_balance_is_ever_negative() {
        let mut raw = config();
        raw.annual_spending = 10_000.0;
        let validated = raw.validate().unwrap();
        let path = simulate_path(&validated, &mut ScriptedSampler::new(vec![0.5, 1.2, 0.8]));
        assert!(path.balances.iter().all(|b| *b >= 0.0));
    }

    #[test]
    fn surviving_path_reports_terminal_balance() {
        let validated = config().validate().unwrap();
        let path = simulate_path(&validated, &mut FixedSampler { factor: 1.05 });
        assert!(path.survived);
        assert_eq!(path.final_balance, *path.balances.last().unwrap());
        assert!(path.final_balance > 0.0);
    }

    #[test]
    fn zero_corpus_is_depleted_from_year_zero() {
        let mut raw = config();
        raw.initial_corpus = 0.0;
        raw.annual_contribution = 0.0;
        let validated = raw.validate().unwrap();
        let path = simulate_path(&validated, &mut FixedSampler { factor: 2.0 });
        assert!(path.balances.iter().all(|b| *b == 0.0));
        assert!(!path.survived);
    }
}
