//! Shared fixtures for pricer_pricing integration tests.

#![allow(dead_code)]

use pricer_core::market_data::MarketData;

/// Standard test parameters: spot, strike, rate, vol, maturity.
pub const SPOT: f64 = 100.0;
pub const STRIKE: f64 = 100.0;
pub const RATE: f64 = 0.05;
pub const VOL: f64 = 0.2;
pub const MATURITY: f64 = 1.0;

/// Market snapshot at `t0 = 0` with a placeholder quote.
pub fn market(spot: f64, rate: f64, volatility: f64) -> MarketData<f64> {
    MarketData::new(1.0, spot, rate, volatility, 0.0).unwrap()
}

/// Standard normal CDF via the Abramowitz-Stegun 7.1.26 erfc approximation
/// (absolute error below 1.5e-7).
pub fn norm_cdf(x: f64) -> f64 {
    let z = x.abs() / std::f64::consts::SQRT_2;
    let t = 1.0 / (1.0 + 0.327_591_1 * z);
    let poly = t
        * (0.254_829_592
            + t * (-0.284_496_736 + t * (1.421_413_741 + t * (-1.453_152_027 + t * 1.061_405_429))));
    let erfc = poly * (-z * z).exp();
    if x >= 0.0 {
        1.0 - 0.5 * erfc
    } else {
        0.5 * erfc
    }
}

/// Closed-form Black-Scholes price of a European option.
pub fn black_scholes(spot: f64, strike: f64, rate: f64, vol: f64, maturity: f64, call: bool) -> f64 {
    let sqrt_t = maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * maturity) / (vol * sqrt_t);
    let d2 = d1 - vol * sqrt_t;
    let df = (-rate * maturity).exp();
    if call {
        spot * norm_cdf(d1) - strike * df * norm_cdf(d2)
    } else {
        strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1)
    }
}
