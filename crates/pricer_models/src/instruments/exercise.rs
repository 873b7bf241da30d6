//! Option exercise style definitions.
//!
//! This module provides the exercise styles understood by the lattice:
//! European, American, and Bermudan (American exercise restricted to a
//! time window).

use num_traits::Float;

use super::error::InstrumentError;

/// Closed time interval `[begin, end]` during which early exercise is allowed.
///
/// Invariant: `0 <= begin < end <= maturity` for the owning contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseWindow;
///
/// let window = ExerciseWindow::new(0.25_f64, 0.75, 1.0).unwrap();
/// assert!(window.contains(0.25));
/// assert!(window.contains(0.75));
/// assert!(!window.contains(0.8));
///
/// // Reversed window
/// assert!(ExerciseWindow::new(0.8_f64, 0.5, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExerciseWindow<T: Float> {
    begin: T,
    end: T,
}

impl<T: Float> ExerciseWindow<T> {
    /// Creates a window validated against the contract maturity.
    ///
    /// # Errors
    /// - `InstrumentError::WindowNotOrdered` if `begin >= end`
    /// - `InstrumentError::WindowExceedsMaturity` if `end > maturity`
    /// - `InstrumentError::NegativeWindowStart` if `begin < 0`
    pub fn new(begin: T, end: T, maturity: T) -> Result<Self, InstrumentError> {
        let to_f64 = |x: T| x.to_f64().unwrap_or(f64::NAN);

        if begin.is_nan() || end.is_nan() || begin >= end {
            return Err(InstrumentError::WindowNotOrdered {
                begin: to_f64(begin),
                end: to_f64(end),
            });
        }

        if end > maturity {
            return Err(InstrumentError::WindowExceedsMaturity {
                end: to_f64(end),
                maturity: to_f64(maturity),
            });
        }

        if begin < T::zero() {
            return Err(InstrumentError::NegativeWindowStart {
                begin: to_f64(begin),
            });
        }

        Ok(Self { begin, end })
    }

    /// Returns the window start.
    #[inline]
    pub fn begin(&self) -> T {
        self.begin
    }

    /// Returns the window end.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Returns true if `time` lies in `[begin, end]` (both ends inclusive).
    #[inline]
    pub fn contains(&self, time: T) -> bool {
        time >= self.begin && time <= self.end
    }
}

/// Option exercise style.
///
/// # Variants
/// - `European`: exercise only at maturity
/// - `American`: exercise at any lattice node
/// - `Bermudan`: American exercise, but only inside an [`ExerciseWindow`]
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseStyle, ExerciseWindow};
///
/// let bermudan = ExerciseStyle::Bermudan(ExerciseWindow::new(0.25_f64, 0.75, 1.0).unwrap());
/// assert!(bermudan.allows_early_exercise());
///
/// // Inside the window the American rule applies...
/// assert_eq!(bermudan.exercise_value(3.0, 5.0, 0.5), 5.0);
/// // ...outside it the holder keeps the continuation value.
/// assert_eq!(bermudan.exercise_value(3.0, 5.0, 0.9), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExerciseStyle<T: Float> {
    /// European style: exercise only at expiry.
    European,

    /// American style: exercise at any time before expiry.
    American,

    /// Bermudan style: American exercise gated by a time window.
    Bermudan(ExerciseWindow<T>),
}

impl<T: Float> ExerciseStyle<T> {
    /// Node value after the holder's exercise decision.
    ///
    /// # Arguments
    /// * `continuation` - Discounted expected value of holding
    /// * `intrinsic` - Value of exercising now
    /// * `time` - Node time in years
    #[inline]
    pub fn exercise_value(&self, continuation: T, intrinsic: T, time: T) -> T {
        match self {
            ExerciseStyle::European => continuation,
            ExerciseStyle::American => american_rule(continuation, intrinsic),
            ExerciseStyle::Bermudan(window) => {
                if window.contains(time) {
                    american_rule(continuation, intrinsic)
                } else {
                    continuation
                }
            }
        }
    }

    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether this is a Bermudan exercise style.
    #[inline]
    pub fn is_bermudan(&self) -> bool {
        matches!(self, ExerciseStyle::Bermudan(_))
    }

    /// Returns whether this is an early-exercise style (American or Bermudan).
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        !self.is_european()
    }

    /// Three-letter code used in chain labels (`EUR`, `AMR`, `BER`).
    pub fn code(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "EUR",
            ExerciseStyle::American => "AMR",
            ExerciseStyle::Bermudan(_) => "BER",
        }
    }

    /// Human-readable style name.
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
            ExerciseStyle::Bermudan(_) => "Bermudan",
        }
    }
}

#[inline]
fn american_rule<T: Float>(continuation: T, intrinsic: T) -> T {
    continuation.max(intrinsic)
}
