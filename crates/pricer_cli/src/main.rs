//! Lattice CLI - Command Line Operations for the CRR Option Pricer
//!
//! # Commands
//!
//! - `lattice price` - Value one European, American or Bermudan option
//! - `lattice implied-vol --price <quote>` - Solve for the implied volatility
//! - `lattice chain` - Generate an options-chain report
//! - `lattice check` - Run the self-check suite
//!
//! # Configuration
//!
//! Defaults come from `lattice.toml` (see [`config::CliConfig`]) and the
//! `LATTICE_*` environment variables; command-line flags win over both.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod report;

pub use error::{CliError, Result};

use commands::chain::ChainArgs;
use commands::implied_vol::Method;
use commands::{ContractArgs, MarketArgs, OutputFormat};
use config::{CliConfig, LogLevel};

/// CRR binomial lattice option pricer
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "lattice.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a single option on the lattice
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        market: MarketArgs,

        /// Lattice steps (defaults to the configured value)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Solve for the volatility that reproduces a quoted price
    ImpliedVol {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        market: MarketArgs,

        /// Lattice steps (defaults to the configured value)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Iteration budget (defaults to the configured value)
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Price tolerance (defaults to the configured value)
        #[arg(long)]
        tolerance: Option<f64>,

        /// Volatility update rule
        #[arg(short, long, value_enum, default_value_t = Method::Newton)]
        method: Method,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Generate an options-chain report
    Chain {
        #[command(flatten)]
        args: ChainArgs,

        /// Lattice steps (defaults to the configured value)
        #[arg(short, long)]
        steps: Option<usize>,
    },

    /// Run the self-check suite
    Check,
}

fn init_tracing(verbose: bool, level: LogLevel) {
    let filter = if verbose {
        EnvFilter::new(LogLevel::Debug.as_filter_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Flags override the loaded configuration, then the result is re-validated.
fn apply_overrides(
    mut config: CliConfig,
    steps: Option<usize>,
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
) -> Result<CliConfig> {
    if let Some(steps) = steps {
        config.steps = steps;
    }
    if let Some(max_iterations) = max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(tolerance) = tolerance {
        config.tolerance = tolerance;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::resolve(&cli.config)?;

    init_tracing(cli.verbose, config.log_level);
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price {
            contract,
            market,
            steps,
            format,
        } => {
            let config = apply_overrides(config, steps, None, None)?;
            commands::price::run(&contract, &market, config.steps, format)
        }
        Commands::ImpliedVol {
            contract,
            market,
            steps,
            max_iterations,
            tolerance,
            method,
            format,
        } => {
            let config = apply_overrides(config, steps, max_iterations, tolerance)?;
            commands::implied_vol::run(
                &contract,
                &market,
                config.steps,
                &config.solver_config(),
                method,
                format,
            )
        }
        Commands::Chain { args, steps } => {
            let config = apply_overrides(config, steps, None, None)?;
            commands::chain::run(&args, config.steps, &config.output_dir).map(|_| ())
        }
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_implied_vol() {
        let cli = Cli::try_parse_from([
            "lattice",
            "implied-vol",
            "--strike",
            "100",
            "--spot",
            "100",
            "--price",
            "10",
            "--method",
            "fixed-gain",
            "--style",
            "american",
            "--kind",
            "put",
        ])
        .unwrap();

        match cli.command {
            Commands::ImpliedVol {
                contract,
                market,
                method,
                ..
            } => {
                assert_eq!(method, Method::FixedGain);
                assert_eq!(contract.kind, commands::OptionKind::Put);
                assert_eq!(market.price, Some(10.0));
            }
            _ => panic!("Expected implied-vol command"),
        }
    }

    #[test]
    fn test_overrides_are_validated() {
        let config = apply_overrides(CliConfig::default(), Some(200), Some(10), Some(1e-6)).unwrap();
        assert_eq!(config.steps, 200);
        assert_eq!(config.max_iterations, 10);

        assert!(apply_overrides(CliConfig::default(), Some(0), None, None).is_err());
    }
}
