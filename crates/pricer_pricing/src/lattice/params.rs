//! CRR step parameters.

use num_traits::Float;

/// Step size, move factors and discounting for one lattice.
///
/// With `dt = (T − t0) / n`:
/// - `u = exp(σ √dt)`, `d = 1 / u`
/// - `p = (exp(r dt) − d) / (u − d)`
/// - `discount = exp(−r dt)`
///
/// `p` is not clamped. When `r dt` is large relative to `σ √dt` it leaves
/// `[0, 1]`; see [`LatticeParams::is_probability_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParams<T: Float> {
    /// Time step in years.
    pub dt: T,
    /// Up-move factor.
    pub up: T,
    /// Down-move factor (`1 / up`).
    pub down: T,
    /// Risk-neutral probability of an up move.
    pub probability: T,
    /// One-step discount factor.
    pub discount: T,
}

impl<T: Float> LatticeParams<T> {
    /// Derives the CRR parameters for `steps` steps over `horizon` years.
    ///
    /// Callers guarantee `horizon > 0`, `volatility > 0` and `steps_t ≥ 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_pricing::lattice::LatticeParams;
    ///
    /// let params = LatticeParams::new(1.0_f64, 0.05, 0.2, 50.0);
    /// assert!((params.up * params.down - 1.0).abs() < 1e-14);
    /// assert!(params.probability > 0.0 && params.probability < 1.0);
    /// ```
    pub fn new(horizon: T, rate: T, volatility: T, steps_t: T) -> Self {
        let dt = horizon / steps_t;
        let up = (volatility * dt.sqrt()).exp();
        let down = up.recip();
        let probability = ((rate * dt).exp() - down) / (up - down);
        let discount = (-rate * dt).exp();
        Self {
            dt,
            up,
            down,
            probability,
            discount,
        }
    }

    /// True when the up probability falls outside `[0, 1]` (or is NaN).
    #[inline]
    pub fn is_probability_degenerate(&self) -> bool {
        self.probability.is_nan() || self.probability < T::zero() || self.probability > T::one()
    }

    /// Discounted expectation of the two successor values.
    #[inline]
    pub fn continuation(&self, up_value: T, down_value: T) -> T {
        self.discount * (self.probability * up_value + (T::one() - self.probability) * down_value)
    }
}
