//! Chain command implementation
//!
//! Generates the options-chain report and writes it to the output directory.

use chrono::Local;
use clap::Args;
use pricer_core::market_data::MarketData;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::info;

use super::UNQUOTED_PRICE;
use crate::report::{ChainSpec, OptionsChain};
use crate::Result;

/// Chain report arguments
#[derive(Debug, Clone, Args)]
pub struct ChainArgs {
    /// Underlying ticker
    #[arg(long, default_value = "DEMO")]
    pub ticker: String,

    /// Spot price
    #[arg(long, default_value_t = 100.0)]
    pub spot: f64,

    /// Risk-free rate
    #[arg(long, default_value_t = 0.05)]
    pub rate: f64,

    /// Volatility used for every strike
    #[arg(long, default_value_t = 0.2)]
    pub vol: f64,

    /// Maturity in years
    #[arg(long, default_value_t = 0.25)]
    pub maturity: f64,

    /// IV rank in percent (header only)
    #[arg(long, default_value_t = 50.0)]
    pub iv_rank: f64,

    /// Dividend yield as a fraction (header only)
    #[arg(long, default_value_t = 0.0)]
    pub dividend_yield: f64,

    /// Seed for the synthetic volume and open interest
    #[arg(long)]
    pub seed: Option<u64>,

    /// Text report file name, relative to the output directory
    #[arg(short, long, default_value = "options_data.txt")]
    pub output: PathBuf,

    /// Also write a CSV file, relative to the output directory
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl ChainArgs {
    fn spec(&self) -> ChainSpec {
        ChainSpec {
            ticker: self.ticker.clone(),
            iv_rank: self.iv_rank,
            dividend_yield: self.dividend_yield,
            maturity: self.maturity,
        }
    }
}

/// Prices the chain with the requested seed.
pub fn generate(args: &ChainArgs, steps: usize) -> Result<OptionsChain> {
    let market = MarketData::new(UNQUOTED_PRICE, args.spot, args.rate, args.vol, 0.0)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    OptionsChain::generate(args.spec(), &market, steps, &mut rng)
}

/// Run the chain command; returns the text report.
pub fn run(args: &ChainArgs, steps: usize, output_dir: &Path) -> Result<String> {
    info!("Generating options chain...");
    info!("  Ticker: {}", args.ticker);
    info!("  Output directory: {}", output_dir.display());

    let chain = generate(args, steps)?;
    std::fs::create_dir_all(output_dir)?;

    let generated_at = Local::now().naive_local();
    let text_path = output_dir.join(&args.output);
    chain.write_text(&text_path, generated_at)?;
    info!("Wrote {} rows to {}", chain.rows().len(), text_path.display());

    if let Some(csv) = &args.csv {
        let csv_path = output_dir.join(csv);
        chain.write_csv(&csv_path)?;
        info!("Wrote CSV to {}", csv_path.display());
    }

    let text = chain.render(generated_at);
    println!("{}", text);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(seed: u64) -> ChainArgs {
        ChainArgs {
            ticker: "TEST".to_string(),
            spot: 50.0,
            rate: 0.03,
            vol: 0.3,
            maturity: 0.5,
            iv_rank: 20.0,
            dividend_yield: 0.01,
            seed: Some(seed),
            output: PathBuf::from("options_data.txt"),
            csv: Some(PathBuf::from("chain.csv")),
        }
    }

    #[test]
    fn test_run_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("reports");

        let text = run(&args(9), 50, &out_dir).unwrap();
        assert!(text.contains("=== Options Chain for TEST ==="));
        assert!(out_dir.join("options_data.txt").exists());
        assert!(out_dir.join("chain.csv").exists());
    }

    #[test]
    fn test_seed_controls_synthetic_columns() {
        let a = generate(&args(1), 30).unwrap();
        let b = generate(&args(1), 30).unwrap();
        assert_eq!(a.rows(), b.rows());
    }
}
