//! Implied-volatility command implementation
//!
//! Inverts the lattice for the volatility that reproduces `--price`.

use clap::ValueEnum;
use pricer_core::math::solvers::SolverConfig;
use pricer_pricing::implied_vol::{ImpliedVolConfig, ImpliedVolatilitySolver};
use pricer_pricing::PricingOutput;
use tracing::{info, warn};

use super::{ContractArgs, MarketArgs, OutputFormat};
use crate::{CliError, Result};

/// Volatility update rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Method {
    /// Newton step on a finite-difference vega
    #[default]
    Newton,
    /// Fixed 0.1 gain on the price residual
    FixedGain,
}

impl Method {
    fn solver(self) -> ImpliedVolatilitySolver<f64> {
        match self {
            Method::Newton => ImpliedVolatilitySolver::new(ImpliedVolConfig::newton()),
            Method::FixedGain => ImpliedVolatilitySolver::fixed_gain(),
        }
    }
}

/// Runs the solver and reports whether it converged.
pub fn solve(
    contract: &ContractArgs,
    market: &MarketArgs,
    steps: usize,
    solver_config: &SolverConfig<f64>,
    method: Method,
) -> Result<(PricingOutput<f64>, bool)> {
    let target = market
        .price
        .ok_or_else(|| CliError::invalid_argument("implied-vol requires --price"))?;
    let option = contract.build()?;
    let market = market.build()?;

    let output = method
        .solver()
        .solve_with(&option, &market, steps, solver_config)?;
    let converged = solver_config.is_converged(output.fair_value - target);
    Ok((output, converged))
}

/// Run the implied-vol command
pub fn run(
    contract: &ContractArgs,
    market: &MarketArgs,
    steps: usize,
    solver_config: &SolverConfig<f64>,
    method: Method,
    format: OutputFormat,
) -> Result<()> {
    info!("Starting implied volatility search...");
    info!("  Method: {:?}", method);
    info!("  Tolerance: {:e}", solver_config.tolerance);
    info!("  Max iterations: {}", solver_config.max_iterations);

    let (output, converged) = solve(contract, market, steps, solver_config, method)?;
    if !converged {
        warn!(
            "No convergence after {} iterations; reporting last trial volatility",
            output.iteration_count
        );
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Table => {
            println!("Target Price: {:.2}", market.price.unwrap_or_default());
            println!("{}", output);
        }
    }

    info!("Implied volatility search complete");
    Ok(())
}
