//! Valuation result shared by the lattice engine and the implied-volatility solver.

use num_traits::Float;
use std::fmt;

/// Result of a single valuation or implied-volatility search.
///
/// Plain valuations leave `implied_volatility` empty and report zero
/// iterations; the solver fills both in.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Examples
///
/// ```
/// use pricer_pricing::PricingOutput;
///
/// let out = PricingOutput::valuation(10.4506_f64, 1.0);
/// assert_eq!(
///     out.to_string(),
///     "Fair Value: 10.4506, Fugit: 1.0000, Implied Vol: 0.0000, Iterations: 0"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingOutput<T: Float> {
    /// Present value at the lattice root.
    pub fair_value: T,
    /// Expected exercise time; reported as the contract maturity.
    pub fugit: T,
    /// Volatility found by the solver, `None` for plain valuation.
    pub implied_volatility: Option<T>,
    /// Solver iterations consumed (0 for plain valuation).
    pub iteration_count: usize,
}

impl<T: Float> PricingOutput<T> {
    /// Output of a plain lattice valuation.
    pub fn valuation(fair_value: T, fugit: T) -> Self {
        Self {
            fair_value,
            fugit,
            implied_volatility: None,
            iteration_count: 0,
        }
    }

    /// Output of an implied-volatility search.
    pub fn solved(fair_value: T, fugit: T, implied_volatility: T, iteration_count: usize) -> Self {
        Self {
            fair_value,
            fugit,
            implied_volatility: Some(implied_volatility),
            iteration_count,
        }
    }

    /// Implied volatility, or zero when the output came from a plain valuation.
    pub fn implied_volatility_or_zero(&self) -> T {
        self.implied_volatility.unwrap_or_else(T::zero)
    }
}

impl<T: Float> fmt::Display for PricingOutput<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fair Value: {:.4}, Fugit: {:.4}, Implied Vol: {:.4}, Iterations: {}",
            self.fair_value.to_f64().unwrap_or(f64::NAN),
            self.fugit.to_f64().unwrap_or(f64::NAN),
            self.implied_volatility_or_zero()
                .to_f64()
                .unwrap_or(f64::NAN),
            self.iteration_count
        )
    }
}
