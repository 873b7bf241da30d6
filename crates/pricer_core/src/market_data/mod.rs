//! Market data for lattice pricing.
//!
//! This module provides the immutable market snapshot consumed by every
//! pricing and implied-volatility call.
//!
//! # Architecture
//!
//! [`MarketData`] is generic over `T: Float` so the engine runs on `f64`
//! and `f32` alike. It is validated once at construction and never mutated;
//! callers needing a different volatility derive a fresh snapshot with
//! [`MarketData::with_volatility`].
//!
//! # Components
//!
//! - [`snapshot`]: The `MarketData` value type
//! - [`error`]: Market data error types (`MarketDataError`)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::MarketData;
//!
//! let market = MarketData::new(10.0_f64, 100.0, -0.01, 0.25, 0.0).unwrap();
//! let bumped = market.with_volatility(0.30).unwrap();
//! assert_eq!(bumped.volatility(), 0.30);
//! assert_eq!(bumped.rate(), -0.01);
//! ```

pub mod error;
pub mod snapshot;

pub use error::MarketDataError;
pub use snapshot::MarketData;
