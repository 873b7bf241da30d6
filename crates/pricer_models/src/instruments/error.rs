//! Instrument error types.
//!
//! This module provides structured error handling for contract
//! construction and for contract/market consistency checks.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: Strike price is non-positive
/// - `InvalidMaturity`: Maturity is non-positive
/// - `WindowNotOrdered`: Bermudan window begin is not before its end
/// - `WindowExceedsMaturity`: Bermudan window ends after maturity
/// - `NegativeWindowStart`: Bermudan window begins before time zero
/// - `MaturityNotAfterValuation`: Contract has already matured at the valuation time
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid maturity (non-positive).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Exercise window is empty or reversed.
    #[error("Window begin must be less than window end: [{begin}, {end}]")]
    WindowNotOrdered {
        /// Window start
        begin: f64,
        /// Window end
        end: f64,
    },

    /// Exercise window extends past maturity.
    #[error("Window end must not exceed maturity: {end} > {maturity}")]
    WindowExceedsMaturity {
        /// Window end
        end: f64,
        /// Contract maturity
        maturity: f64,
    },

    /// Exercise window starts before time zero.
    #[error("Window begin must be non-negative: {begin}")]
    NegativeWindowStart {
        /// Window start
        begin: f64,
    },

    /// Maturity is not strictly after the valuation time.
    #[error("Maturity T = {maturity} is not after valuation time t0 = {valuation_time}")]
    MaturityNotAfterValuation {
        /// Contract maturity
        maturity: f64,
        /// Valuation time of the market snapshot
        valuation_time: f64,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
