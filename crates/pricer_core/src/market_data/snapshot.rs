//! Immutable market snapshot.

use num_traits::Float;

use super::error::MarketDataError;

/// Market inputs for a single pricing request.
///
/// Holds the observed instrument price, the underlying spot, the
/// continuously-compounded risk-free rate, the annualised volatility and
/// the valuation time (years). All bounds are checked at construction:
/// `price > 0`, `spot > 0`, `volatility > 0`, `valuation_time >= 0`.
/// The rate is unbounded; negative rates are valid.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_core::market_data::{MarketData, MarketDataError};
///
/// let market = MarketData::new(10.0_f64, 100.0, 0.05, 0.2, 0.0).unwrap();
/// assert_eq!(market.price(), 10.0);
///
/// let err = MarketData::new(10.0_f64, 100.0, 0.05, -0.2, 0.0).unwrap_err();
/// assert!(matches!(err, MarketDataError::InvalidVolatility { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketData<T: Float> {
    price: T,
    spot: T,
    rate: T,
    volatility: T,
    valuation_time: T,
}

#[inline]
fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

impl<T: Float> MarketData<T> {
    /// Creates a validated market snapshot.
    ///
    /// # Arguments
    /// * `price` - Observed market price of the instrument (must be positive)
    /// * `spot` - Underlying price (must be positive)
    /// * `rate` - Risk-free rate, continuously compounded (any sign)
    /// * `volatility` - Annualised volatility (must be positive)
    /// * `valuation_time` - Valuation time in years (must be non-negative)
    ///
    /// # Errors
    /// - `MarketDataError::NonFinite` if any input is NaN or infinite
    /// - `MarketDataError::InvalidPrice` if `price <= 0`
    /// - `MarketDataError::InvalidSpot` if `spot <= 0`
    /// - `MarketDataError::InvalidVolatility` if `volatility <= 0`
    /// - `MarketDataError::InvalidValuationTime` if `valuation_time < 0`
    pub fn new(
        price: T,
        spot: T,
        rate: T,
        volatility: T,
        valuation_time: T,
    ) -> Result<Self, MarketDataError> {
        let zero = T::zero();

        for (field, value) in [
            ("price", price),
            ("spot", spot),
            ("rate", rate),
            ("volatility", volatility),
            ("valuation_time", valuation_time),
        ] {
            if !value.is_finite() {
                return Err(MarketDataError::NonFinite { field });
            }
        }

        if price <= zero {
            return Err(MarketDataError::InvalidPrice {
                price: as_f64(price),
            });
        }

        if spot <= zero {
            return Err(MarketDataError::InvalidSpot { spot: as_f64(spot) });
        }

        if volatility <= zero {
            return Err(MarketDataError::InvalidVolatility {
                volatility: as_f64(volatility),
            });
        }

        if valuation_time < zero {
            return Err(MarketDataError::InvalidValuationTime {
                t: as_f64(valuation_time),
            });
        }

        Ok(Self {
            price,
            spot,
            rate,
            volatility,
            valuation_time,
        })
    }

    /// Returns a copy with the volatility replaced, re-running validation.
    ///
    /// All other fields are carried over unchanged.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::market_data::MarketData;
    ///
    /// let market = MarketData::new(10.0_f64, 100.0, 0.05, 0.2, 0.0).unwrap();
    /// assert!(market.with_volatility(0.0).is_err());
    /// assert_eq!(market.with_volatility(0.35).unwrap().spot(), 100.0);
    /// ```
    pub fn with_volatility(&self, volatility: T) -> Result<Self, MarketDataError> {
        Self::new(
            self.price,
            self.spot,
            self.rate,
            volatility,
            self.valuation_time,
        )
    }

    /// Returns the observed market price of the instrument.
    #[inline]
    pub fn price(&self) -> T {
        self.price
    }

    /// Returns the underlying spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the valuation time in years.
    #[inline]
    pub fn valuation_time(&self) -> T {
        self.valuation_time
    }
}
