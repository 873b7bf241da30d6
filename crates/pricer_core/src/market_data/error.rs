//! Market data error types.
//!
//! This module provides structured error handling for market snapshot
//! construction.

use crate::types::PricingError;
use thiserror::Error;

/// Market data validation errors.
///
/// Raised when a [`MarketData`](super::MarketData) snapshot is constructed
/// from out-of-range inputs. Values are never clamped.
///
/// # Variants
///
/// - `InvalidPrice`: Non-positive observed instrument price
/// - `InvalidSpot`: Non-positive underlying price
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidValuationTime`: Negative valuation time
/// - `NonFinite`: NaN or infinite input
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("-0.2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid observed price (non-positive).
    #[error("Invalid market price: P = {price}")]
    InvalidPrice {
        /// The invalid price
        price: f64,
    },

    /// Invalid underlying spot (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid valuation time (negative).
    #[error("Invalid valuation time: t0 = {t}")]
    InvalidValuationTime {
        /// The invalid valuation time
        t: f64,
    },

    /// A field is NaN or infinite.
    #[error("Non-finite market input: {field}")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
