//! Error types for lattice valuation.
//!
//! Construction-time errors from the lower layers are carried through
//! unchanged; the engine adds its step-count check and a finiteness check
//! on the rolled-back value.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

/// Lattice valuation errors.
///
/// # Variants
/// - `InvalidStepCount`: `steps` was zero or not representable
/// - `InvalidMarketData`: wrapped [`MarketDataError`]
/// - `InvalidInstrument`: wrapped [`InstrumentError`] (including a contract
///   already matured at the valuation time)
/// - `NonFiniteValue`: backward induction produced `inf` or `NaN` at the root
///
/// # Examples
/// ```
/// use pricer_pricing::LatticeError;
///
/// let err = LatticeError::InvalidStepCount { steps: 0 };
/// assert_eq!(err.to_string(), "Invalid step count: 0 (must be at least 1)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Number of lattice steps must be positive.
    #[error("Invalid step count: {steps} (must be at least 1)")]
    InvalidStepCount {
        /// The rejected step count
        steps: usize,
    },

    /// Market snapshot failed validation.
    #[error(transparent)]
    InvalidMarketData(#[from] MarketDataError),

    /// Contract failed validation or is inconsistent with the market snapshot.
    #[error(transparent)]
    InvalidInstrument(#[from] InstrumentError),

    /// Lattice values overflowed; the grid cannot represent this contract.
    #[error("Non-finite fair value {value} on a {steps}-step lattice")]
    NonFiniteValue {
        /// The root value (`inf` or `NaN`)
        value: f64,
        /// Step count of the failing lattice
        steps: usize,
    },
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::InvalidMarketData(inner) => inner.into(),
            LatticeError::InvalidInstrument(inner) => inner.into(),
            other @ LatticeError::InvalidStepCount { .. } => {
                PricingError::InvalidInput(other.to_string())
            }
            other @ LatticeError::NonFiniteValue { .. } => {
                PricingError::NumericalInstability(other.to_string())
            }
        }
    }
}
