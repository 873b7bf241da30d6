//! CLI command implementations and the argument groups they share.

pub mod chain;
pub mod check;
pub mod implied_vol;
pub mod price;

use clap::{Args, ValueEnum};
use pricer_core::market_data::MarketData;
use pricer_models::instruments::{PayoffType, VanillaOption};
use tracing::warn;

use crate::{CliError, Result};

/// Quote used for snapshots that only feed plain valuation.
pub const UNQUOTED_PRICE: f64 = 1.0;

/// Call or put
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionKind {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl From<OptionKind> for PayoffType {
    fn from(kind: OptionKind) -> Self {
        PayoffType::from_is_call(kind == OptionKind::Call)
    }
}

/// Exercise style
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Maturity only
    European,
    /// Any lattice node
    American,
    /// Nodes inside `[--window-begin, --window-end]`
    Bermudan,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Contract terms
#[derive(Debug, Clone, Args)]
pub struct ContractArgs {
    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Maturity in years
    #[arg(long, default_value_t = 1.0)]
    pub maturity: f64,

    /// Payoff
    #[arg(long, value_enum, default_value_t = OptionKind::Call)]
    pub kind: OptionKind,

    /// Exercise style
    #[arg(long, value_enum, default_value_t = Style::European)]
    pub style: Style,

    /// Bermudan window start (years)
    #[arg(long)]
    pub window_begin: Option<f64>,

    /// Bermudan window end (years)
    #[arg(long)]
    pub window_end: Option<f64>,
}

impl ContractArgs {
    /// Builds the validated contract.
    pub fn build(&self) -> Result<VanillaOption<f64>> {
        let payoff = PayoffType::from(self.kind);
        let option = match self.style {
            Style::European => VanillaOption::european(self.strike, payoff, self.maturity)?,
            Style::American => VanillaOption::american(self.strike, payoff, self.maturity)?,
            Style::Bermudan => {
                let (begin, end) = self.window_begin.zip(self.window_end).ok_or_else(|| {
                    CliError::invalid_argument(
                        "bermudan style requires --window-begin and --window-end",
                    )
                })?;
                VanillaOption::bermudan(self.strike, payoff, self.maturity, begin, end)?
            }
        };

        if self.style != Style::Bermudan
            && (self.window_begin.is_some() || self.window_end.is_some())
        {
            warn!("Exercise window ignored for {} style", option.exercise_style().name());
        }
        Ok(option)
    }
}

/// Market snapshot
#[derive(Debug, Clone, Args)]
pub struct MarketArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05)]
    pub rate: f64,

    /// Volatility
    #[arg(long, default_value_t = 0.2)]
    pub vol: f64,

    /// Quoted option price (the implied-vol target)
    #[arg(long)]
    pub price: Option<f64>,

    /// Valuation time in years
    #[arg(long, default_value_t = 0.0)]
    pub valuation_time: f64,
}

impl MarketArgs {
    /// Builds the snapshot, with [`UNQUOTED_PRICE`] when no quote was given.
    pub fn build(&self) -> Result<MarketData<f64>> {
        Ok(MarketData::new(
            self.price.unwrap_or(UNQUOTED_PRICE),
            self.spot,
            self.rate,
            self.vol,
            self.valuation_time,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::InstrumentError;

    fn contract(style: Style) -> ContractArgs {
        ContractArgs {
            strike: 100.0,
            maturity: 1.0,
            kind: OptionKind::Put,
            style,
            window_begin: None,
            window_end: None,
        }
    }

    #[test]
    fn test_build_styles() {
        let eu = contract(Style::European).build().unwrap();
        assert_eq!(eu.label(), "EUR-P");

        let mut args = contract(Style::Bermudan);
        args.window_begin = Some(0.25);
        args.window_end = Some(0.75);
        assert_eq!(args.build().unwrap().label(), "BER-P");
    }

    #[test]
    fn test_bermudan_requires_window() {
        let err = contract(Style::Bermudan).build().unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_contract_validation_surfaces() {
        let mut args = contract(Style::Bermudan);
        args.window_begin = Some(0.8);
        args.window_end = Some(0.5);
        let err = args.build().unwrap_err();
        assert!(matches!(
            err,
            CliError::Instrument(InstrumentError::WindowNotOrdered { .. })
        ));
    }

    #[test]
    fn test_market_without_quote() {
        let market = MarketArgs {
            spot: 100.0,
            rate: 0.05,
            vol: 0.2,
            price: None,
            valuation_time: 0.0,
        }
        .build()
        .unwrap();
        assert_eq!(market.price(), UNQUOTED_PRICE);
    }
}
