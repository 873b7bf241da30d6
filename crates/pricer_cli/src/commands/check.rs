//! Check command implementation
//!
//! Runs the demonstration suite: reference valuations, exercise-style
//! sanity relations, rejection of malformed inputs and an implied-volatility
//! search. Every check prints a ✓/✗ line; any ✗ fails the command.

use pricer_core::market_data::MarketData;
use pricer_models::instruments::{PayoffType, VanillaOption};
use pricer_pricing::implied_vol::ImpliedVolatilitySolver;
use pricer_pricing::lattice::BinomialEngine;
use pricer_pricing::PricingOutput;
use std::fmt::Display;
use std::fmt::Write as _;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

const SPOT: f64 = 100.0;
const STRIKE: f64 = 100.0;
const RATE: f64 = 0.05;
const VOL: f64 = 0.2;
const MATURITY: f64 = 1.0;
const MARKET_PRICE: f64 = 10.0;

/// Outcome of one check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// What was checked
    pub name: String,
    /// Whether it held
    pub passed: bool,
}

/// Accumulates the printed transcript and the outcomes.
#[derive(Debug, Default)]
pub struct Suite {
    transcript: String,
    outcomes: Vec<CheckOutcome>,
}

impl Suite {
    fn section(&mut self, title: &str) {
        if !self.transcript.is_empty() {
            self.transcript.push('\n');
        }
        let _ = writeln!(self.transcript, "=== {} ===", title);
    }

    fn result(&mut self, name: &str, output: &PricingOutput<f64>, vol: f64) {
        let _ = writeln!(self.transcript, "\n{}:", name);
        let _ = writeln!(
            self.transcript,
            "└─ Parameters: Strike={:.2}, Spot={:.2}, Vol={:.2}%",
            STRIKE,
            SPOT,
            vol * 100.0
        );
        let _ = writeln!(
            self.transcript,
            "└─ Results: Fair Value={:.2}, Fugit={:.2}, Implied Vol={:.2}%, Iterations={}",
            output.fair_value,
            output.fugit,
            output.implied_volatility_or_zero() * 100.0,
            output.iteration_count
        );
    }

    fn check(&mut self, name: impl Into<String>, passed: bool, detail: impl Display) {
        let name = name.into();
        let mark = if passed { "✓" } else { "✗" };
        let _ = writeln!(self.transcript, "{} {}: {}", mark, name, detail);
        self.outcomes.push(CheckOutcome { name, passed });
    }

    fn expect_rejection<T, E: Display>(&mut self, what: &str, result: std::result::Result<T, E>) {
        match result {
            Err(err) => self.check(format!("Caught {}", what), true, err),
            Ok(_) => self.check(
                format!("Caught {}", what),
                false,
                "input was accepted",
            ),
        }
    }

    /// Printed transcript
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Recorded outcomes
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Number of failed checks
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }
}

fn standard_market() -> Result<MarketData<f64>> {
    Ok(MarketData::new(MARKET_PRICE, SPOT, RATE, VOL, 0.0)?)
}

fn vanilla_options(suite: &mut Suite, steps: usize) -> Result<()> {
    suite.section("Testing Vanilla Options");
    let engine = BinomialEngine::new();
    let market = standard_market()?;

    let eu_call = VanillaOption::european(STRIKE, PayoffType::Call, MATURITY)?;
    let eu_put = VanillaOption::european(STRIKE, PayoffType::Put, MATURITY)?;
    let am_put = VanillaOption::american(STRIKE, PayoffType::Put, MATURITY)?;

    let call = engine.value(&eu_call, &market, steps)?;
    suite.result("European Call", &call, VOL);
    let put = engine.value(&eu_put, &market, steps)?;
    let american = engine.value(&am_put, &market, steps)?;
    suite.result("American Put", &american, VOL);

    let parity_gap =
        (call.fair_value - put.fair_value) - (SPOT - STRIKE * (-RATE * MATURITY).exp());
    suite.check(
        "European put-call parity",
        parity_gap.abs() < 1e-8,
        format_args!("gap {:.2e}", parity_gap),
    );
    suite.check(
        "American put carries early-exercise premium",
        american.fair_value >= put.fair_value,
        format_args!("{:.4} vs {:.4}", american.fair_value, put.fair_value),
    );
    Ok(())
}

fn bermudan_options(suite: &mut Suite, steps: usize) -> Result<()> {
    suite.section("Testing Bermudan Options");
    let engine = BinomialEngine::new();
    let market = standard_market()?;

    let ber_call = VanillaOption::bermudan(STRIKE, PayoffType::Call, MATURITY, 0.25, 0.75)?;
    let ber = engine.value(&ber_call, &market, steps)?;
    suite.result("Bermudan Call (Window: 0.25-0.75)", &ber, VOL);

    let eu_call = VanillaOption::european(STRIKE, PayoffType::Call, MATURITY)?;
    let eu = engine.value(&eu_call, &market, steps)?;
    suite.check(
        "Bermudan call matches European without dividends",
        (ber.fair_value - eu.fair_value).abs() < 1e-8,
        format_args!("{:.4} vs {:.4}", ber.fair_value, eu.fair_value),
    );

    let put_value = |option: VanillaOption<f64>| -> Result<f64> {
        Ok(engine.value(&option, &market, steps)?.fair_value)
    };
    let eu_put = put_value(VanillaOption::european(STRIKE, PayoffType::Put, MATURITY)?)?;
    let ber_put = put_value(VanillaOption::bermudan(
        STRIKE,
        PayoffType::Put,
        MATURITY,
        0.25,
        0.75,
    )?)?;
    let am_put = put_value(VanillaOption::american(STRIKE, PayoffType::Put, MATURITY)?)?;
    suite.check(
        "European ≤ Bermudan ≤ American put",
        eu_put <= ber_put && ber_put <= am_put,
        format_args!("{:.4} ≤ {:.4} ≤ {:.4}", eu_put, ber_put, am_put),
    );
    Ok(())
}

fn edge_cases(suite: &mut Suite, steps: usize) -> Result<()> {
    suite.section("Testing Edge Cases");
    suite.expect_rejection(
        "negative strike",
        VanillaOption::european(-100.0, PayoffType::Call, MATURITY),
    );
    suite.expect_rejection(
        "invalid window",
        VanillaOption::bermudan(100.0, PayoffType::Call, MATURITY, 0.8, 0.5),
    );
    suite.expect_rejection(
        "negative volatility",
        MarketData::new(10.0, 100.0, 0.05, -0.2, 0.0),
    );
    suite.expect_rejection(
        "zero maturity",
        VanillaOption::european(100.0, PayoffType::Call, 0.0),
    );
    suite.expect_rejection(
        "negative time",
        MarketData::new(10.0, 100.0, 0.05, 0.2, -1.0),
    );

    let call = VanillaOption::european(STRIKE, PayoffType::Call, MATURITY)?;
    let market = standard_market()?;
    suite.expect_rejection(
        "zero steps",
        BinomialEngine::new().value(&call, &market, 0),
    );
    let late = MarketData::new(MARKET_PRICE, SPOT, RATE, VOL, 2.0)?;
    suite.expect_rejection(
        "maturity before valuation time",
        BinomialEngine::new().value(&call, &late, steps),
    );
    Ok(())
}

fn implied_volatility(suite: &mut Suite, config: &CliConfig) -> Result<()> {
    suite.section("Testing Implied Volatility");
    let market = standard_market()?;
    let option = VanillaOption::european(STRIKE, PayoffType::Call, MATURITY)?;
    let solver_config = config.solver_config();

    let output = ImpliedVolatilitySolver::default().solve_with(
        &option,
        &market,
        config.steps,
        &solver_config,
    )?;
    let _ = writeln!(suite.transcript, "Target Price: {:.2}", MARKET_PRICE);
    suite.result(
        "Implied Vol Calculation",
        &output,
        output.implied_volatility_or_zero(),
    );
    suite.check(
        "Implied volatility reprices the target",
        solver_config.is_converged(output.fair_value - MARKET_PRICE),
        format_args!("{} iterations", output.iteration_count),
    );

    let fixed = ImpliedVolatilitySolver::fixed_gain().solve_with(
        &option,
        &market,
        config.steps,
        &solver_config,
    )?;
    let status = if solver_config.is_converged(fixed.fair_value - MARKET_PRICE) {
        "converged"
    } else {
        "did not converge"
    };
    let _ = writeln!(
        suite.transcript,
        "Fixed-gain rule: {} after {} iterations (vol {:.2}%)",
        status,
        fixed.iteration_count,
        fixed.implied_volatility_or_zero() * 100.0
    );
    Ok(())
}

/// Runs every section and returns the filled suite.
pub fn run_suite(config: &CliConfig) -> Result<Suite> {
    let mut suite = Suite::default();
    vanilla_options(&mut suite, config.steps)?;
    bermudan_options(&mut suite, config.steps)?;
    edge_cases(&mut suite, config.steps)?;
    implied_volatility(&mut suite, config)?;
    Ok(suite)
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Running self-checks with {} steps...", config.steps);

    let suite = run_suite(config)?;
    println!("{}", suite.transcript());

    let total = suite.outcomes().len();
    let failed = suite.failures();
    if failed > 0 {
        return Err(CliError::CheckFailed { failed, total });
    }

    info!("All {} checks passed", total);
    Ok(())
}
