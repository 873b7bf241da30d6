//! Implied volatility by repeated lattice valuation.
//!
//! The solver searches for the volatility at which the lattice fair value
//! matches the quoted price in [`MarketData`](pricer_core::market_data::MarketData).
//! Two update rules are available, see [`UpdateRule`].

mod config;
mod solver;

pub use config::{ImpliedVolConfig, UpdateRule};
pub use solver::ImpliedVolatilitySolver;
