//! # Pricer Engine (Layer 3: Lattice Valuation)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns contracts (L2, `pricer_models`) and market
//! snapshots (L1, `pricer_core`) into prices:
//! - Cox-Ross-Rubinstein binomial lattice with backward induction (`lattice`)
//! - Implied volatility by iterative inversion of the lattice (`implied_vol`)
//! - Data-parallel batch valuation over independent requests (`batch`)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::MarketData;
//! use pricer_models::instruments::{PayoffType, VanillaOption};
//! use pricer_pricing::implied_vol::ImpliedVolatilitySolver;
//! use pricer_pricing::lattice::BinomialEngine;
//!
//! let engine = BinomialEngine::new();
//! let call = VanillaOption::european(100.0_f64, PayoffType::Call, 1.0).unwrap();
//! let market = MarketData::new(10.0, 100.0, 0.05, 0.2, 0.0).unwrap();
//!
//! let priced = engine.value(&call, &market, 50).unwrap();
//! assert!(priced.fair_value > 10.0 && priced.fair_value < 11.0);
//!
//! // Invert: which volatility reproduces that price?
//! let quote = MarketData::new(priced.fair_value, 100.0, 0.05, 0.2, 0.0).unwrap();
//! let solved = ImpliedVolatilitySolver::default()
//!     .solve(&call, &quote, 50, 100, 1e-6)
//!     .unwrap();
//! assert!((solved.implied_volatility.unwrap() - 0.2).abs() < 1e-4);
//! ```
//!
//! ## Resource Model
//!
//! Every call allocates its own lattice and drops it before returning.
//! Engine and solver values hold no mutable state, so they can be shared
//! freely across threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod batch;
pub mod error;
pub mod implied_vol;
pub mod lattice;
pub mod output;

pub use error::LatticeError;
pub use output::PricingOutput;
