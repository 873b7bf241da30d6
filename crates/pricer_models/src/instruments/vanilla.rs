//! Vanilla option definitions.
//!
//! This module provides the vanilla option structure combining contract
//! terms, payoff type, and exercise style.

use num_traits::Float;

use super::error::InstrumentError;
use super::exercise::{ExerciseStyle, ExerciseWindow};
use super::params::InstrumentParams;
use super::payoff::PayoffType;
use super::traits::Derivative;

/// Vanilla option instrument.
///
/// One type covers all three exercise styles; Bermudan contracts carry
/// their exercise window inside [`ExerciseStyle::Bermudan`].
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Derivative, PayoffType, VanillaOption};
///
/// let call = VanillaOption::european(100.0_f64, PayoffType::Call, 1.0).unwrap();
/// assert_eq!(call.terminal_payoff(110.0), 10.0);
///
/// // Window [0.8, 0.5] is reversed
/// assert!(VanillaOption::bermudan(100.0_f64, PayoffType::Call, 1.0, 0.8, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VanillaOption<T: Float> {
    params: InstrumentParams<T>,
    payoff_type: PayoffType,
    exercise_style: ExerciseStyle<T>,
}

impl<T: Float> VanillaOption<T> {
    /// Creates a new vanilla option.
    ///
    /// A Bermudan window is re-checked against `params.maturity()`, so a
    /// window built for a longer-dated contract cannot slip through.
    ///
    /// # Errors
    /// `InstrumentError::WindowExceedsMaturity` if a Bermudan window ends
    /// after the contract maturity.
    pub fn new(
        params: InstrumentParams<T>,
        payoff_type: PayoffType,
        exercise_style: ExerciseStyle<T>,
    ) -> Result<Self, InstrumentError> {
        if let ExerciseStyle::Bermudan(window) = &exercise_style {
            ExerciseWindow::new(window.begin(), window.end(), params.maturity())?;
        }

        Ok(Self {
            params,
            payoff_type,
            exercise_style,
        })
    }

    /// European option: exercise at maturity only.
    pub fn european(
        strike: T,
        payoff_type: PayoffType,
        maturity: T,
    ) -> Result<Self, InstrumentError> {
        Self::new(
            InstrumentParams::new(strike, maturity)?,
            payoff_type,
            ExerciseStyle::European,
        )
    }

    /// American option: exercise at any node.
    pub fn american(
        strike: T,
        payoff_type: PayoffType,
        maturity: T,
    ) -> Result<Self, InstrumentError> {
        Self::new(
            InstrumentParams::new(strike, maturity)?,
            payoff_type,
            ExerciseStyle::American,
        )
    }

    /// Bermudan option: American exercise inside `[window_begin, window_end]`.
    ///
    /// # Errors
    /// Strike/maturity errors first, then window errors
    /// (`WindowNotOrdered`, `WindowExceedsMaturity`, `NegativeWindowStart`).
    pub fn bermudan(
        strike: T,
        payoff_type: PayoffType,
        maturity: T,
        window_begin: T,
        window_end: T,
    ) -> Result<Self, InstrumentError> {
        let params = InstrumentParams::new(strike, maturity)?;
        let window = ExerciseWindow::new(window_begin, window_end, maturity)?;
        Self::new(params, payoff_type, ExerciseStyle::Bermudan(window))
    }

    /// Returns a reference to the contract terms.
    #[inline]
    pub fn params(&self) -> &InstrumentParams<T> {
        &self.params
    }

    /// Returns the payoff type.
    #[inline]
    pub fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }

    /// Returns a reference to the exercise style.
    #[inline]
    pub fn exercise_style(&self) -> &ExerciseStyle<T> {
        &self.exercise_style
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.params.strike()
    }

    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.payoff_type.is_call()
    }

    /// Intrinsic value at the given underlying price.
    #[inline]
    pub fn intrinsic_value(&self, stock_price: T) -> T {
        self.payoff_type.evaluate(stock_price, self.params.strike())
    }

    /// Chain label such as `EUR-C` or `BER-P`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.exercise_style.code(), self.payoff_type.code())
    }
}

impl<T: Float> Derivative<T> for VanillaOption<T> {
    #[inline]
    fn maturity(&self) -> T {
        self.params.maturity()
    }

    #[inline]
    fn terminal_payoff(&self, stock_price: T) -> T {
        self.intrinsic_value(stock_price)
    }

    #[inline]
    fn exercise_test(&self, stock_price: T, continuation: T, current_time: T) -> T {
        if self.exercise_style.is_european() {
            return continuation;
        }
        self.exercise_style.exercise_value(
            continuation,
            self.intrinsic_value(stock_price),
            current_time,
        )
    }
}
