// What-If Runner: command-line front end to the revenue simulation engine
//
// Usage:
//   cargo run --bin whatif -- simulate --base 1000 --price 10 --quantity 5
//   cargo run --bin whatif -- sweep --base 1000                   # full 21x21 grid
//   cargo run --bin whatif -- sweep --base 1000 --quantity 0      # price curve only
//   cargo run --bin whatif -- sample --base 1000 --runs 500 --seed 42
//   cargo run --bin whatif -- --config calibration.json simulate --category toys ...

mod monte_carlo;
mod report;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use whatif_engine::sweep::{sweep, sweep_price};
use whatif_engine::{EngineConfig, Revenue, ScenarioInput};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "whatif", about = "Revenue what-if simulator")]
struct Cli {
    /// JSON engine configuration (elasticity, bounds, thresholds)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a single scenario
    Simulate {
        #[arg(long)]
        base: Decimal,
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        price: Decimal,
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        quantity: Decimal,
        /// Category whose calibrated elasticity to use
        #[arg(long)]
        category: Option<String>,
    },
    /// Evaluate every slider position
    Sweep {
        #[arg(long)]
        base: Decimal,
        /// Fix the quantity adjustment and sweep price only
        #[arg(long, allow_hyphen_values = true)]
        quantity: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Monte Carlo over random slider positions
    Sample {
        #[arg(long)]
        base: Decimal,
        #[arg(long, default_value_t = 1000)]
        runs: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] whatif_engine::ConfigError),
    #[error(transparent)]
    Bounds(#[from] whatif_engine::BoundsError),
    #[error(transparent)]
    Simulation(#[from] whatif_engine::SimulationError),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading engine config");
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    match &cli.command {
        Command::Simulate { base, price, quantity, category } => {
            let input = ScenarioInput::new(*base, *price, *quantity);
            config.bounds.check(&input)?;
            let simulator = config.simulator_for(category.as_deref());
            let report = simulator.evaluate(&input)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report::print_scenario(&report, simulator.elasticity());
            }
        }
        Command::Sweep { base, quantity, category } => {
            let simulator = config.simulator_for(category.as_deref());
            let result = match quantity {
                Some(q) => {
                    config.bounds.check(&ScenarioInput::new(*base, Decimal::ZERO, *q))?;
                    sweep_price(&simulator, Revenue(*base), *q, &config.bounds)?
                }
                None => {
                    config.bounds.check(&ScenarioInput::new(*base, Decimal::ZERO, Decimal::ZERO))?;
                    sweep(&simulator, Revenue(*base), &config.bounds)?
                }
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::print_sweep(&result, simulator.revenue_maximizing_price_pct());
            }
        }
        Command::Sample { base, runs, seed, category } => {
            config.bounds.check(&ScenarioInput::new(*base, Decimal::ZERO, Decimal::ZERO))?;
            let simulator = config.simulator_for(category.as_deref());
            let result = monte_carlo::run(&simulator, Revenue(*base), &config.bounds, *runs, *seed)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::print_sample(&result);
            }
        }
    }
    Ok(())
}
