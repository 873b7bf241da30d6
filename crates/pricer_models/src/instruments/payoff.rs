//! Payoff type definitions.
//!
//! Payoffs are evaluated exactly (no smoothing): the lattice needs the
//! terminal grid to match `max(0, S - K)` / `max(0, K - S)` node for node.

use num_traits::Float;

/// Type of option payoff.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0_f64, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Maps the conventional `is_call` flag onto a payoff type.
    #[inline]
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call {
            PayoffType::Call
        } else {
            PayoffType::Put
        }
    }

    /// Evaluate the payoff (intrinsic value) for given spot and strike.
    #[inline]
    pub fn evaluate<T: Float>(&self, spot: T, strike: T) -> T {
        let zero = T::zero();
        match self {
            PayoffType::Call => (spot - strike).max(zero),
            PayoffType::Put => (strike - spot).max(zero),
        }
    }

    /// Returns whether this payoff is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this payoff is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }

    /// Single-letter code used in chain labels (`C` / `P`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            PayoffType::Call => "C",
            PayoffType::Put => "P",
        }
    }
}

impl std::fmt::Display for PayoffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoffType::Call => write!(f, "CALL"),
            PayoffType::Put => write!(f, "PUT"),
        }
    }
}
