//! Implied-volatility search configuration.

use num_traits::Float;

/// How the trial volatility moves between iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "rule", rename_all = "snake_case"))]
pub enum UpdateRule<T: Float> {
    /// `vol ← vol − gain · (model − market)`.
    ///
    /// Converges only when `gain · vega` stays below 2; for at-the-money
    /// contracts on a spot near 100 it oscillates between the bounds.
    FixedGain {
        /// Step gain applied to the price residual.
        gain: T,
    },
    /// `vol ← vol − (model − market) / vega`, vega by a central finite
    /// difference of width `2 · bump`.
    ///
    /// Falls back to a [`ImpliedVolConfig::FALLBACK_GAIN`] fixed-gain step
    /// when vega is zero, negative or not finite.
    NewtonVega {
        /// Volatility bump for the vega estimate.
        bump: T,
    },
}

/// Configuration for [`ImpliedVolatilitySolver`](super::ImpliedVolatilitySolver).
///
/// # Examples
///
/// ```
/// use pricer_pricing::implied_vol::{ImpliedVolConfig, UpdateRule};
///
/// let config: ImpliedVolConfig<f64> = ImpliedVolConfig::default();
/// assert_eq!(config.initial_guess, 0.3);
/// assert!(matches!(config.update_rule, UpdateRule::NewtonVega { .. }));
///
/// let legacy = ImpliedVolConfig::<f64>::fixed_gain();
/// assert_eq!(legacy.update_rule, UpdateRule::FixedGain { gain: 0.1 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolConfig<T: Float> {
    /// Starting volatility, also the reset value after a rejected trial.
    pub initial_guess: T,
    /// Lower clamp for the trial volatility.
    pub min_volatility: T,
    /// Upper clamp for the trial volatility.
    pub max_volatility: T,
    /// Iteration update rule.
    pub update_rule: UpdateRule<T>,
}

impl<T: Float> ImpliedVolConfig<T> {
    /// Gain used by the fixed-gain rule and by the Newton fallback.
    pub const FALLBACK_GAIN: f64 = 0.1;

    /// Vega bump used by the default Newton rule.
    pub const DEFAULT_BUMP: f64 = 1e-4;

    /// Newton-on-vega configuration (the default).
    pub fn newton() -> Self {
        Self {
            update_rule: UpdateRule::NewtonVega {
                bump: T::from(Self::DEFAULT_BUMP).unwrap(),
            },
            ..Self::bounds()
        }
    }

    /// Fixed-gain configuration with gain 0.1.
    pub fn fixed_gain() -> Self {
        Self {
            update_rule: UpdateRule::FixedGain {
                gain: T::from(Self::FALLBACK_GAIN).unwrap(),
            },
            ..Self::bounds()
        }
    }

    /// Replaces the update rule.
    pub fn with_update_rule(mut self, update_rule: UpdateRule<T>) -> Self {
        self.update_rule = update_rule;
        self
    }

    /// Clamps `volatility` into `[min_volatility, max_volatility]`.
    #[inline]
    pub fn clamp(&self, volatility: T) -> T {
        volatility.min(self.max_volatility).max(self.min_volatility)
    }

    fn bounds() -> Self {
        Self {
            initial_guess: T::from(0.3).unwrap(),
            min_volatility: T::from(0.001).unwrap(),
            max_volatility: T::from(2.0).unwrap(),
            update_rule: UpdateRule::FixedGain {
                gain: T::from(Self::FALLBACK_GAIN).unwrap(),
            },
        }
    }
}

impl<T: Float> Default for ImpliedVolConfig<T> {
    fn default() -> Self {
        Self::newton()
    }
}
