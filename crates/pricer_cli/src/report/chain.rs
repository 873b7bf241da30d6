//! Options-chain report.
//!
//! Prices an 11-strike ladder around spot in European, American and
//! Bermudan flavours for both calls and puts, then lays the results out as
//! a quote board with synthetic bid/ask, volume and open interest.

use chrono::NaiveDateTime;
use pricer_core::market_data::MarketData;
use pricer_models::instruments::{PayoffType, VanillaOption};
use pricer_pricing::batch::{value_batch, PricingRequest};
use pricer_pricing::lattice::BinomialEngine;
use rand::Rng;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::Result;

/// Strikes either side of spot.
const STRIKES_PER_SIDE: usize = 5;

/// Distance between strikes as a fraction of spot.
const STRIKE_INTERVAL: f64 = 0.025;

/// Quoted spread as a fraction of fair value.
const SPREAD: f64 = 0.05;

/// Bermudan window as fractions of maturity.
const BERMUDAN_WINDOW: (f64, f64) = (0.3, 0.8);

const COLUMNS: &str = "Strike | Type | Bid | Ask | Last | Volume | OI | IV% | Delta";
const RULE: &str = "----------------------------------------------------------";

/// `spot + (i − 5) · 2.5% · spot` for `i = 0..=10`.
pub fn strike_ladder(spot: f64) -> Vec<f64> {
    let interval = spot * STRIKE_INTERVAL;
    (0..=2 * STRIKES_PER_SIDE)
        .map(|i| spot + (i as f64 - STRIKES_PER_SIDE as f64) * interval)
        .collect()
}

/// Descriptive inputs for the report header.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSpec {
    /// Underlying ticker
    pub ticker: String,
    /// IV rank in percent (display only)
    pub iv_rank: f64,
    /// Dividend yield as a fraction (display only, not priced)
    pub dividend_yield: f64,
    /// Contract maturity in years
    pub maturity: f64,
}

/// One quote line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainRow {
    /// Strike
    pub strike: f64,
    /// Style and payoff label, e.g. `BER-P`
    pub label: String,
    /// Fair value minus half the spread
    pub bid: f64,
    /// Fair value plus half the spread
    pub ask: f64,
    /// Lattice fair value
    pub last: f64,
    /// Synthetic volume in `[0, 1000)`
    pub volume: u32,
    /// Synthetic open interest in `[0, 5000)`
    pub open_interest: u32,
    /// Implied volatility in percent (zero for plain valuation)
    pub implied_vol_pct: f64,
    /// Moneyness-signed price/strike ratio clamped to `[-1, 1]`
    pub delta: f64,
    #[serde(skip)]
    payoff: PayoffType,
}

/// Delta proxy: `clamp((price / strike) · sign, −1, 1)` with sign `+1` only
/// when spot is strictly above strike.
pub fn approximate_delta(price: f64, strike: f64, spot: f64) -> f64 {
    let sign = if spot > strike { 1.0 } else { -1.0 };
    (price / strike * sign).clamp(-1.0, 1.0)
}

/// A priced options chain.
#[derive(Debug, Clone)]
pub struct OptionsChain {
    spec: ChainSpec,
    spot: f64,
    rate: f64,
    rows: Vec<ChainRow>,
}

impl OptionsChain {
    /// Prices the chain through the batch pricer.
    ///
    /// Rows are ordered calls first, then puts; within each section by
    /// strike, and per strike European, American, Bermudan.
    pub fn generate<R: Rng>(
        spec: ChainSpec,
        market: &MarketData<f64>,
        steps: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let spot = market.spot();
        let maturity = spec.maturity;
        let (begin, end) = BERMUDAN_WINDOW;

        let mut requests = Vec::with_capacity(6 * (2 * STRIKES_PER_SIDE + 1));
        for payoff in [PayoffType::Call, PayoffType::Put] {
            for strike in strike_ladder(spot) {
                for option in [
                    VanillaOption::european(strike, payoff, maturity)?,
                    VanillaOption::american(strike, payoff, maturity)?,
                    VanillaOption::bermudan(
                        strike,
                        payoff,
                        maturity,
                        maturity * begin,
                        maturity * end,
                    )?,
                ] {
                    requests.push(PricingRequest::new(option, *market, steps));
                }
            }
        }

        let results = value_batch(&BinomialEngine::new(), &requests);
        let mut rows = Vec::with_capacity(requests.len());
        for (request, result) in requests.iter().zip(results) {
            let output = result?;
            let option = &request.derivative;
            let fair_value = output.fair_value;
            let half_spread = fair_value * SPREAD / 2.0;
            rows.push(ChainRow {
                strike: option.strike(),
                label: option.label(),
                bid: fair_value - half_spread,
                ask: fair_value + half_spread,
                last: fair_value,
                volume: rng.gen_range(0..1000),
                open_interest: rng.gen_range(0..5000),
                implied_vol_pct: output.implied_volatility_or_zero() * 100.0,
                delta: approximate_delta(fair_value, option.strike(), spot),
                payoff: option.payoff_type(),
            });
        }

        tracing::info!(rows = rows.len(), ticker = %spec.ticker, "options chain priced");
        Ok(Self {
            spec,
            spot,
            rate: market.rate(),
            rows,
        })
    }

    /// All rows, calls first.
    pub fn rows(&self) -> &[ChainRow] {
        &self.rows
    }

    /// Rows of one payoff type.
    pub fn section(&self, payoff: PayoffType) -> impl Iterator<Item = &ChainRow> {
        self.rows.iter().filter(move |row| row.payoff == payoff)
    }

    /// Renders the text report.
    pub fn render(&self, generated_at: NaiveDateTime) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Options Chain Generated: {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out, "=== Options Chain for {} ===", self.spec.ticker);
        let _ = writeln!(
            out,
            "Current Price: ${:.2} | IV Rank: {:.1}% | Dividend Yield: {:.2}%",
            self.spot,
            self.spec.iv_rank,
            self.spec.dividend_yield * 100.0
        );
        let _ = writeln!(
            out,
            "Days to Expiration: {:.0} | Risk-free Rate: {:.1}%\n",
            self.spec.maturity * 365.0,
            self.rate * 100.0
        );

        let sections = [
            ("=== CALLS ===", PayoffType::Call),
            ("\n=== PUTS ===", PayoffType::Put),
        ];
        for (title, payoff) in sections {
            let _ = writeln!(out, "{title}\n{COLUMNS}\n{RULE}");
            for row in self.section(payoff) {
                let _ = writeln!(
                    out,
                    "{:6.2} | {:>4} | {:5.2} | {:5.2} | {:5.2} | {:6} | {:4} | {:4.1} | {:5.2}",
                    row.strike,
                    row.label,
                    row.bid,
                    row.ask,
                    row.last,
                    row.volume,
                    row.open_interest,
                    row.implied_vol_pct,
                    row.delta
                );
            }
        }
        out
    }

    /// Writes the text report to `path`.
    pub fn write_text(&self, path: &Path, generated_at: NaiveDateTime) -> Result<()> {
        std::fs::write(path, self.render(generated_at))?;
        Ok(())
    }

    /// Writes one CSV record per row to `path`.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec() -> ChainSpec {
        ChainSpec {
            ticker: "ACME".to_string(),
            iv_rank: 45.5,
            dividend_yield: 0.015,
            maturity: 0.25,
        }
    }

    fn chain(seed: u64) -> OptionsChain {
        let market = MarketData::new(5.0, 100.0, 0.05, 0.25, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        OptionsChain::generate(spec(), &market, 50, &mut rng).unwrap()
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_strike_ladder() {
        let strikes = strike_ladder(200.0);
        assert_eq!(strikes.len(), 11);
        assert_relative_eq!(strikes[0], 175.0);
        assert_relative_eq!(strikes[5], 200.0);
        assert_relative_eq!(strikes[10], 225.0);
    }

    #[test]
    fn test_approximate_delta() {
        assert_relative_eq!(approximate_delta(10.0, 90.0, 100.0), 10.0 / 90.0);
        assert_relative_eq!(approximate_delta(10.0, 100.0, 100.0), -0.1);
        assert_relative_eq!(approximate_delta(500.0, 100.0, 120.0), 1.0);
    }

    #[test]
    fn test_chain_layout() {
        let chain = chain(7);
        assert_eq!(chain.rows().len(), 66);
        assert_eq!(chain.section(PayoffType::Call).count(), 33);

        let labels: Vec<&str> = chain.rows()[..3].iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["EUR-C", "AMR-C", "BER-C"]);
        assert_eq!(chain.rows()[33].label, "EUR-P");
        assert_relative_eq!(chain.rows()[0].strike, 87.5);
    }

    #[test]
    fn test_row_quotes() {
        for row in chain(11).rows() {
            assert_relative_eq!(row.ask - row.bid, row.last * 0.05, epsilon = 1e-12);
            assert!(row.bid <= row.last && row.last <= row.ask);
            assert!(row.volume < 1000);
            assert!(row.open_interest < 5000);
            assert_eq!(row.implied_vol_pct, 0.0);
            assert!((-1.0..=1.0).contains(&row.delta));
        }
    }

    #[test]
    fn test_american_put_rows_dominate_european() {
        let chain = chain(3);
        let puts: Vec<&ChainRow> = chain.section(PayoffType::Put).collect();
        for triple in puts.chunks(3) {
            assert!(triple[1].last >= triple[0].last);
            assert!(triple[2].last >= triple[0].last - 1e-12);
            assert!(triple[2].last <= triple[1].last + 1e-12);
        }
    }

    #[test]
    fn test_seeded_chain_is_reproducible() {
        let a = chain(42);
        let b = chain(42);
        assert_eq!(a.rows(), b.rows());
    }

    #[test]
    fn test_render_header_and_sections() {
        let text = chain(1).render(timestamp());
        assert!(text.starts_with("Options Chain Generated: 2024-03-15 09:30:00\n\n"));
        assert!(text.contains("=== Options Chain for ACME ==="));
        assert!(text.contains("Current Price: $100.00 | IV Rank: 45.5% | Dividend Yield: 1.50%"));
        assert!(text.contains("Days to Expiration: 91 | Risk-free Rate: 5.0%"));
        assert!(text.contains("=== CALLS ==="));
        assert!(text.contains("\n=== PUTS ==="));
        assert_eq!(text.lines().filter(|l| l.contains("| BER-P |")).count(), 11);
    }

    #[test]
    fn test_write_text_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let chain = chain(5);

        let text_path = dir.path().join("options_data.txt");
        chain.write_text(&text_path, timestamp()).unwrap();
        let text = std::fs::read_to_string(&text_path).unwrap();
        assert!(text.contains("=== PUTS ==="));

        let csv_path = dir.path().join("chain.csv");
        chain.write_csv(&csv_path).unwrap();
        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "strike");
        assert_eq!(&headers[1], "label");
        assert_eq!(reader.records().count(), 66);
    }
}
