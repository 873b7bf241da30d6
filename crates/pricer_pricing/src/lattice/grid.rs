//! Dense triangular storage for the stock-price and option-value grids.
//!
//! Step `i` holds `i + 1` states; node `(i, j)` lives at flat index
//! `i (i + 1) / 2 + j`, so a lattice of `n` steps stores
//! `(n + 1)(n + 2) / 2` values per grid.

use super::params::LatticeParams;
use num_traits::Float;
use pricer_models::instruments::Derivative;
use std::ops::Range;

#[inline]
fn row_start(step: usize) -> usize {
    step * (step + 1) / 2
}

/// A filled recombining binomial lattice.
///
/// Node `(step, state)` carries the stock price
/// `spot · up^state · down^(step − state)` and the option value obtained by
/// backward induction. With `down = 1 / up` the price is taken as the single
/// power `spot · up^(2·state − step)`, so nodes near spot stay finite even
/// when `up^state` alone would overflow. Produced by
/// [`BinomialEngine::build_lattice`](super::BinomialEngine::build_lattice);
/// each valuation owns its own lattice.
#[derive(Debug, Clone)]
pub struct Lattice<T: Float> {
    steps: usize,
    params: LatticeParams<T>,
    stock_prices: Vec<T>,
    option_values: Vec<T>,
}

impl<T: Float> Lattice<T> {
    /// Allocates both grids and fills the stock prices.
    pub(crate) fn new(spot: T, params: LatticeParams<T>, steps: usize) -> Self {
        let len = row_start(steps + 1);
        let mut stock_prices = Vec::with_capacity(len);
        for step in 0..=steps {
            for state in 0..=step {
                let net_ups = 2 * state as i32 - step as i32;
                stock_prices.push(spot * params.up.powi(net_ups));
            }
        }

        Self {
            steps,
            params,
            stock_prices,
            option_values: vec![T::zero(); len],
        }
    }

    /// Seeds the terminal row from the payoff and rolls back to the root.
    pub(crate) fn roll_back<D>(&mut self, derivative: &D)
    where
        D: Derivative<T> + ?Sized,
    {
        for idx in Self::row_range(self.steps) {
            self.option_values[idx] = derivative.terminal_payoff(self.stock_prices[idx]);
        }

        for step in (0..self.steps).rev() {
            let time = self.step_time(step);
            let here = row_start(step);
            let next = row_start(step + 1);
            for state in 0..=step {
                let continuation = self.params.continuation(
                    self.option_values[next + state + 1],
                    self.option_values[next + state],
                );
                self.option_values[here + state] =
                    derivative.exercise_test(self.stock_prices[here + state], continuation, time);
            }
        }
    }

    /// Elapsed time since valuation at `step`.
    #[inline]
    fn step_time(&self, step: usize) -> T {
        T::from(step).map_or_else(T::nan, |s| s * self.params.dt)
    }

    #[inline]
    fn index(&self, step: usize, state: usize) -> Option<usize> {
        (step <= self.steps && state <= step).then(|| row_start(step) + state)
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step parameters the lattice was built with.
    pub fn params(&self) -> &LatticeParams<T> {
        &self.params
    }

    /// Stock price at node `(step, state)`, `None` outside the triangle.
    pub fn stock_price(&self, step: usize, state: usize) -> Option<T> {
        self.index(step, state).map(|idx| self.stock_prices[idx])
    }

    /// Option value at node `(step, state)`, `None` outside the triangle.
    pub fn option_value(&self, step: usize, state: usize) -> Option<T> {
        self.index(step, state).map(|idx| self.option_values[idx])
    }

    /// Stock prices of one step, ordered by number of up moves.
    ///
    /// # Panics
    ///
    /// Panics if `step > self.steps()`.
    pub fn stock_row(&self, step: usize) -> &[T] {
        &self.stock_prices[Self::row_range(step)]
    }

    /// Option values of one step, ordered by number of up moves.
    ///
    /// # Panics
    ///
    /// Panics if `step > self.steps()`.
    pub fn value_row(&self, step: usize) -> &[T] {
        &self.option_values[Self::row_range(step)]
    }

    fn row_range(step: usize) -> Range<usize> {
        let start = row_start(step);
        start..start + step + 1
    }

    /// Option value at the root, i.e. the fair value.
    pub fn root_value(&self) -> T {
        self.option_values[0]
    }
}
