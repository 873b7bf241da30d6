//! Price command implementation
//!
//! Values a single contract on the CRR lattice.

use pricer_core::market_data::MarketData;
use pricer_models::instruments::VanillaOption;
use pricer_pricing::lattice::BinomialEngine;
use pricer_pricing::PricingOutput;
use serde::Serialize;
use tracing::info;

use super::{ContractArgs, MarketArgs, OutputFormat};
use crate::Result;

/// Serialisable valuation record
#[derive(Debug, Serialize)]
pub struct PriceReport {
    /// Contract label, e.g. `AMR-P`
    pub label: String,
    /// Contract terms
    pub contract: VanillaOption<f64>,
    /// Market snapshot
    pub market: MarketData<f64>,
    /// Lattice steps
    pub steps: usize,
    /// Valuation result
    pub output: PricingOutput<f64>,
}

impl PriceReport {
    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Table => Ok(format!(
                "{} | Strike: {:.2} | Maturity: {:.2}\n\
                 Spot: {:.2} | Rate: {:.2}% | Vol: {:.2}% | Steps: {}\n\
                 {}",
                self.label,
                self.contract.strike(),
                self.contract.params().maturity(),
                self.market.spot(),
                self.market.rate() * 100.0,
                self.market.volatility() * 100.0,
                self.steps,
                self.output
            )),
        }
    }
}

/// Values the contract and builds the report.
pub fn evaluate(contract: &ContractArgs, market: &MarketArgs, steps: usize) -> Result<PriceReport> {
    let option = contract.build()?;
    let market = market.build()?;
    let output = BinomialEngine::new().value(&option, &market, steps)?;

    Ok(PriceReport {
        label: option.label(),
        contract: option,
        market,
        steps,
        output,
    })
}

/// Run the price command
pub fn run(
    contract: &ContractArgs,
    market: &MarketArgs,
    steps: usize,
    format: OutputFormat,
) -> Result<()> {
    info!("Starting pricing...");
    info!("  Steps: {}", steps);
    info!("  Output format: {:?}", format);

    let report = evaluate(contract, market, steps)?;
    println!("{}", report.render(format)?);

    info!("Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{OptionKind, Style};

    fn args() -> (ContractArgs, MarketArgs) {
        (
            ContractArgs {
                strike: 100.0,
                maturity: 1.0,
                kind: OptionKind::Call,
                style: Style::European,
                window_begin: None,
                window_end: None,
            },
            MarketArgs {
                spot: 100.0,
                rate: 0.05,
                vol: 0.2,
                price: Some(10.0),
                valuation_time: 0.0,
            },
        )
    }

    #[test]
    fn test_evaluate_european_call() {
        let (contract, market) = args();
        let report = evaluate(&contract, &market, 50).unwrap();
        assert_eq!(report.label, "EUR-C");
        assert!(report.output.fair_value > 10.0 && report.output.fair_value < 11.0);
        assert_eq!(report.output.iteration_count, 0);
    }

    #[test]
    fn test_render_table() {
        let (contract, market) = args();
        let text = evaluate(&contract, &market, 50)
            .unwrap()
            .render(OutputFormat::Table)
            .unwrap();
        assert!(text.starts_with("EUR-C | Strike: 100.00"));
        assert!(text.contains("Steps: 50"));
        assert!(text.contains("Fair Value: "));
    }

    #[test]
    fn test_render_json() {
        let (contract, market) = args();
        let json = evaluate(&contract, &market, 50)
            .unwrap()
            .render(OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["label"], "EUR-C");
        assert_eq!(value["steps"], 50);
        assert!(value["output"]["fair_value"].as_f64().unwrap() > 10.0);
        assert!(value["output"]["implied_volatility"].is_null());
    }

    #[test]
    fn test_zero_steps_is_error() {
        let (contract, market) = args();
        assert!(evaluate(&contract, &market, 0).is_err());
    }
}
