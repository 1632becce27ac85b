//! Resilience Sim CLI
//!
//! Command-line interface for running retirement resilience simulations
//! and what-if scenarios against a plan given as flags or a JSON request.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use resilience_sim::boundary::{self, ScenarioRequest, SimulationRequest};
use resilience_sim::{RiskProfile, SimulationConfig, ALL_SCENARIOS};

#[derive(Parser, Debug)]
#[command(name = "resilience-sim", version, about = "Monte Carlo retirement resilience simulator")]
struct Cli {
    /// JSON request file (same shape as the service contract). When given,
    /// the individual plan flags are ignored.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Starting portfolio balance
    #[arg(long, default_value_t = 5_000_000.0)]
    initial_corpus: f64,

    /// Yearly savings before retirement
    #[arg(long, default_value_t = 600_000.0)]
    annual_contribution: f64,

    /// Yearly spending from retirement onward
    #[arg(long, default_value_t = 960_000.0)]
    annual_spending: f64,

    #[arg(long, default_value_t = 30)]
    current_age: u32,

    #[arg(long, default_value_t = 55)]
    retirement_age: u32,

    #[arg(long, default_value_t = 95)]
    end_age: u32,

    /// Mean annual return as a decimal fraction
    #[arg(long, default_value_t = 0.07)]
    mean_return: f64,

    /// Annual volatility as a decimal fraction
    #[arg(long, default_value_t = 0.12)]
    volatility: f64,

    /// Number of Monte Carlo paths
    #[arg(long, default_value_t = 10_000)]
    simulations: u32,

    /// Return-assumption preset: conservative, moderate, or aggressive.
    /// Overrides --mean-return and --volatility.
    #[arg(long)]
    profile: Option<String>,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Also run the four what-if scenarios against the baseline
    #[arg(long)]
    scenarios: bool,

    /// Emit machine-readable JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn parse_profile(name: &str) -> anyhow::Result<RiskProfile> {
    match name {
        "conservative" => Ok(RiskProfile::Conservative),
        "moderate" => Ok(RiskProfile::Moderate),
        "aggressive" => Ok(RiskProfile::Aggressive),
        other => anyhow::bail!(
            "unknown profile '{other}': expected conservative, moderate, or aggressive"
        ),
    }
}

fn build_request(cli: &Cli) -> anyhow::Result<SimulationRequest> {
    let mut request = match &cli.request {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening request file {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing request file {}", path.display()))?
        }
        None => SimulationRequest {
            config: SimulationConfig {
                initial_corpus: cli.initial_corpus,
                annual_contribution: cli.annual_contribution,
                annual_spending: cli.annual_spending,
                current_age: cli.current_age,
                retirement_age: cli.retirement_age,
                end_age: cli.end_age,
                mean_return: cli.mean_return,
                volatility: cli.volatility,
                simulations: cli.simulations,
                delta_contribution: None,
                life_event_shock: None,
            },
            seed: None,
        },
    };

    if let Some(name) = &cli.profile {
        parse_profile(name)?.apply(&mut request.config);
    }
    if cli.seed.is_some() {
        request.seed = cli.seed;
    }
    Ok(request)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let request = build_request(&cli)?;
    let config = request.config.clone();

    let start = Instant::now();
    let result = boundary::run_simulation(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Resilience Sim v{}", env!("CARGO_PKG_VERSION"));
        println!("==================\n");
        println!("Plan:");
        println!("  Initial corpus:      {:>14.2}", config.initial_corpus);
        println!("  Annual contribution: {:>14.2}", config.annual_contribution);
        println!("  Annual spending:     {:>14.2}", config.annual_spending);
        println!(
            "  Ages:                {} -> retire {} -> end {}",
            config.current_age, config.retirement_age, config.end_age
        );
        println!(
            "  Returns:             {:.1}% mean, {:.1}% volatility",
            config.mean_return * 100.0,
            config.volatility * 100.0
        );
        println!("  Paths:               {}", config.simulations);
        println!();
        println!(
            "RSC: {:.1}%  ({} paths in {:.2?})",
            result.rsc * 100.0,
            result.path_count(),
            start.elapsed()
        );
        println!("Median terminal balance: {:.2}", result.median_final_value());
        println!();
        println!("Survival curve (every 5 years):");
        println!("{:>5} {:>10}", "Age", "Solvent");
        for (year, fraction) in result.survival_curve.iter().enumerate() {
            let age = config.current_age + year as u32;
            if year % 5 == 0 || year == result.survival_curve.len() - 1 {
                println!("{:>5} {:>9.1}%", age, fraction * 100.0);
            }
        }
    }

    if cli.scenarios {
        if !cli.json {
            println!("\nWhat-if scenarios:");
        }
        for scenario in ALL_SCENARIOS {
            let scenario_request = ScenarioRequest {
                config: config.clone(),
                scenario,
                seed: request.seed,
            };
            match boundary::run_scenario(&scenario_request) {
                Ok(outcome) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                }
                Ok(outcome) => {
                    println!(
                        "  {:<28} {:+.1}% -> new RSC {:.1}%  ({})",
                        outcome.label,
                        outcome.rsc_delta * 100.0,
                        outcome.new_rsc * 100.0,
                        outcome.description
                    );
                }
                Err(err) if err.is_user_error() => {
                    println!("  {:<28} not applicable: {err}", scenario.label());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
