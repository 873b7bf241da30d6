//! Derivative trait definition.
//!
//! This module provides the [`Derivative`] trait, the only view of a
//! contract the lattice engine needs.
//!
//! # Layer Boundaries
//!
//! The trait lives in L2 (pricer_models) and knows nothing about market
//! data or lattices. Implementations must be pure: no interior mutability
//! and no cached market state, so a single contract can be priced from
//! many threads against different snapshots.

use num_traits::Float;

/// A contract priceable by backward induction.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::Derivative;
/// use num_traits::Float;
///
/// /// Cash-or-nothing call paying 1 above the strike, European exercise.
/// struct DigitalCall<T: Float> {
///     strike: T,
///     maturity: T,
/// }
///
/// impl<T: Float> Derivative<T> for DigitalCall<T> {
///     fn maturity(&self) -> T {
///         self.maturity
///     }
///
///     fn terminal_payoff(&self, stock_price: T) -> T {
///         if stock_price > self.strike { T::one() } else { T::zero() }
///     }
///
///     fn exercise_test(&self, _stock_price: T, continuation: T, _time: T) -> T {
///         continuation
///     }
/// }
///
/// let digital = DigitalCall { strike: 100.0_f64, maturity: 1.0 };
/// assert_eq!(digital.terminal_payoff(101.0), 1.0);
/// ```
pub trait Derivative<T: Float> {
    /// Contract maturity in years.
    fn maturity(&self) -> T;

    /// Payoff at a terminal lattice node.
    fn terminal_payoff(&self, stock_price: T) -> T;

    /// Node value given the discounted continuation value.
    ///
    /// # Arguments
    ///
    /// * `stock_price` - Underlying price at the node
    /// * `continuation` - Discounted expected value of holding
    /// * `current_time` - Node time in years (`step * dt`)
    fn exercise_test(&self, stock_price: T, continuation: T, current_time: T) -> T;
}
