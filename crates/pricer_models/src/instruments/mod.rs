//! Option contract definitions.
//!
//! # Architecture
//!
//! Exercise behaviour is an enum ([`ExerciseStyle`]) rather than a class
//! hierarchy. Bermudan exercise reuses the American rule and gates it with
//! an [`ExerciseWindow`], so the two can never drift apart.
//!
//! The lattice engine only sees the [`Derivative`] trait:
//! - `terminal_payoff(S)` at the last time step
//! - `exercise_test(S, continuation, t)` at every interior node
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{Derivative, PayoffType, VanillaOption};
//!
//! let put = VanillaOption::american(100.0_f64, PayoffType::Put, 1.0).unwrap();
//!
//! // Deep in the money: exercising beats holding
//! assert_eq!(put.exercise_test(60.0, 35.0, 0.5), 40.0);
//! assert_eq!(put.terminal_payoff(120.0), 0.0);
//! ```

mod error;
mod exercise;
mod params;
mod payoff;
mod traits;
mod vanilla;

pub use error::InstrumentError;
pub use exercise::{ExerciseStyle, ExerciseWindow};
pub use params::InstrumentParams;
pub use payoff::PayoffType;
pub use traits::Derivative;
pub use vanilla::VanillaOption;
