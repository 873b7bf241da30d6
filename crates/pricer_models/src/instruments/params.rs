//! Common contract terms.

use num_traits::Float;

use super::error::InstrumentError;

/// Strike and maturity shared by every option contract.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentParams;
///
/// let params = InstrumentParams::new(100.0_f64, 1.0).unwrap();
/// assert_eq!(params.strike(), 100.0);
/// assert_eq!(params.maturity(), 1.0);
///
/// assert!(InstrumentParams::new(-100.0_f64, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstrumentParams<T: Float> {
    strike: T,
    maturity: T,
}

impl<T: Float> InstrumentParams<T> {
    /// Creates new contract terms with validation.
    ///
    /// # Arguments
    /// * `strike` - Strike price (must be positive)
    /// * `maturity` - Maturity in years (must be positive)
    ///
    /// # Returns
    /// `Err(InstrumentError)` if either value is non-positive or not finite.
    pub fn new(strike: T, maturity: T) -> Result<Self, InstrumentError> {
        let zero = T::zero();

        if !strike.is_finite() || strike <= zero {
            return Err(InstrumentError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !maturity.is_finite() || maturity <= zero {
            return Err(InstrumentError::InvalidMaturity {
                maturity: maturity.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self { strike, maturity })
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the maturity in years.
    #[inline]
    pub fn maturity(&self) -> T {
        self.maturity
    }
}
