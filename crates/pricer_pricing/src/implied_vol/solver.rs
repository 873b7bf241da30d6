//! Iterative implied-volatility search over the lattice engine.

use super::config::{ImpliedVolConfig, UpdateRule};
use crate::error::LatticeError;
use crate::lattice::BinomialEngine;
use crate::output::PricingOutput;
use num_traits::Float;
use pricer_core::market_data::MarketData;
use pricer_core::math::solvers::SolverConfig;
use pricer_models::instruments::Derivative;

/// Smallest finite-difference vega accepted by the Newton rule.
const MIN_VEGA: f64 = 1e-8;

/// Implied-volatility solver.
///
/// Starting from [`ImpliedVolConfig::initial_guess`], each iteration
/// values the contract at the trial volatility, stops when
/// `|model − market| < tolerance`, and otherwise moves the volatility by
/// the configured [`UpdateRule`] and clamps it into the configured bounds.
///
/// Running out of iterations is not an error: the last trial volatility is
/// returned with `iteration_count == max_iterations`.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketData;
/// use pricer_models::instruments::{PayoffType, VanillaOption};
/// use pricer_pricing::implied_vol::ImpliedVolatilitySolver;
///
/// let put = VanillaOption::american(100.0_f64, PayoffType::Put, 1.0).unwrap();
/// let quote = MarketData::new(8.0, 100.0, 0.05, 0.2, 0.0).unwrap();
///
/// let out = ImpliedVolatilitySolver::default()
///     .solve(&put, &quote, 50, 100, 1e-6)
///     .unwrap();
/// let vol = out.implied_volatility.unwrap();
/// assert!(vol > 0.2 && vol < 0.4);
/// assert!((out.fair_value - 8.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ImpliedVolatilitySolver<T: Float> {
    engine: BinomialEngine,
    config: ImpliedVolConfig<T>,
}

impl<T: Float> Default for ImpliedVolatilitySolver<T> {
    fn default() -> Self {
        Self::new(ImpliedVolConfig::default())
    }
}

impl<T: Float> ImpliedVolatilitySolver<T> {
    /// Creates a solver with the given configuration.
    pub fn new(config: ImpliedVolConfig<T>) -> Self {
        Self {
            engine: BinomialEngine::new(),
            config,
        }
    }

    /// Solver using the fixed-gain rule (`vol ← vol − 0.1 · diff`).
    pub fn fixed_gain() -> Self {
        Self::new(ImpliedVolConfig::fixed_gain())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ImpliedVolConfig<T> {
        &self.config
    }

    /// Searches for the volatility that reprices `market.price()`.
    ///
    /// `market.volatility()` is ignored; only price, spot, rate and
    /// valuation time are used.
    ///
    /// # Errors
    ///
    /// Fails before iterating if `steps == 0` or the contract matures at or
    /// before the valuation time. Rejected trial volatilities never surface
    /// as errors; the search restarts from the initial guess instead.
    pub fn solve<D>(
        &self,
        derivative: &D,
        market: &MarketData<T>,
        steps: usize,
        max_iterations: usize,
        tolerance: T,
    ) -> Result<PricingOutput<T>, LatticeError>
    where
        D: Derivative<T> + ?Sized,
    {
        self.engine.check_inputs(derivative, market, steps)?;

        let target = market.price();
        let mut volatility = self.config.initial_guess;

        for iteration in 0..max_iterations {
            let trial = match market.with_volatility(volatility) {
                Ok(trial) => trial,
                Err(err) => {
                    tracing::debug!(iteration, %err, "trial volatility rejected, restarting");
                    volatility = self.config.initial_guess;
                    continue;
                }
            };

            let model = self.engine.value(derivative, &trial, steps)?.fair_value;
            let diff = model - target;
            tracing::debug!(
                iteration,
                volatility = volatility.to_f64().unwrap_or(f64::NAN),
                diff = diff.to_f64().unwrap_or(f64::NAN),
                "implied volatility iteration"
            );

            if diff.abs() < tolerance {
                return Ok(PricingOutput::solved(
                    model,
                    derivative.maturity(),
                    volatility,
                    iteration + 1,
                ));
            }

            let next = self.next_volatility(derivative, &trial, steps, volatility, diff);
            volatility = if next.is_finite() {
                self.config.clamp(next)
            } else {
                self.config.initial_guess
            };
        }

        tracing::warn!(
            max_iterations,
            volatility = volatility.to_f64().unwrap_or(f64::NAN),
            "implied volatility search did not converge"
        );
        let fair_value = self
            .price_at(derivative, market, steps, volatility)
            .unwrap_or_else(T::nan);
        Ok(PricingOutput::solved(
            fair_value,
            derivative.maturity(),
            volatility,
            max_iterations,
        ))
    }

    /// [`solve`](Self::solve) with tolerance and budget taken from a
    /// [`SolverConfig`].
    pub fn solve_with<D>(
        &self,
        derivative: &D,
        market: &MarketData<T>,
        steps: usize,
        solver: &SolverConfig<T>,
    ) -> Result<PricingOutput<T>, LatticeError>
    where
        D: Derivative<T> + ?Sized,
    {
        self.solve(
            derivative,
            market,
            steps,
            solver.max_iterations,
            solver.tolerance,
        )
    }

    fn next_volatility<D>(
        &self,
        derivative: &D,
        trial: &MarketData<T>,
        steps: usize,
        volatility: T,
        diff: T,
    ) -> T
    where
        D: Derivative<T> + ?Sized,
    {
        let fallback_gain = T::from(ImpliedVolConfig::<T>::FALLBACK_GAIN).unwrap();
        match self.config.update_rule {
            UpdateRule::FixedGain { gain } => volatility - diff * gain,
            UpdateRule::NewtonVega { bump } => {
                match self.vega(derivative, trial, steps, volatility, bump) {
                    Some(vega) => volatility - diff / vega,
                    None => volatility - diff * fallback_gain,
                }
            }
        }
    }

    /// Central-difference vega, one-sided when the lower bump is not a
    /// valid volatility. `None` when the estimate is unusable.
    fn vega<D>(
        &self,
        derivative: &D,
        trial: &MarketData<T>,
        steps: usize,
        volatility: T,
        bump: T,
    ) -> Option<T>
    where
        D: Derivative<T> + ?Sized,
    {
        let lower = volatility - bump;
        let (low, width) = if lower > T::zero() {
            (lower, bump + bump)
        } else {
            (volatility, bump)
        };

        let up_price = self.price_at(derivative, trial, steps, volatility + bump)?;
        let low_price = self.price_at(derivative, trial, steps, low)?;
        let vega = (up_price - low_price) / width;

        (vega.is_finite() && vega > T::from(MIN_VEGA).unwrap()).then_some(vega)
    }

    fn price_at<D>(
        &self,
        derivative: &D,
        market: &MarketData<T>,
        steps: usize,
        volatility: T,
    ) -> Option<T>
    where
        D: Derivative<T> + ?Sized,
    {
        let trial = market.with_volatility(volatility).ok()?;
        self.engine
            .value(derivative, &trial, steps)
            .ok()
            .map(|out| out.fair_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{InstrumentError, PayoffType, VanillaOption};

    fn quote(price: f64, spot: f64) -> MarketData<f64> {
        MarketData::new(price, spot, 0.05, 0.2, 0.0).unwrap()
    }

    fn lattice_price(option: &VanillaOption<f64>, spot: f64, volatility: f64) -> f64 {
        let market = MarketData::new(1.0, spot, 0.05, volatility, 0.0).unwrap();
        BinomialEngine::new()
            .value(option, &market, 50)
            .unwrap()
            .fair_value
    }

    #[test]
    fn test_newton_recovers_atm_volatility() {
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let target = lattice_price(&call, 100.0, 0.2);

        let out = ImpliedVolatilitySolver::default()
            .solve(&call, &quote(target, 100.0), 50, 100, 1e-6)
            .unwrap();

        assert_relative_eq!(out.implied_volatility.unwrap(), 0.2, epsilon = 1e-4);
        assert!(out.iteration_count >= 1 && out.iteration_count < 20);
        assert!((out.fair_value - target).abs() < 1e-6);
        assert_relative_eq!(out.fugit, 1.0);
    }

    #[test]
    fn test_fixed_gain_converges_when_vega_is_small() {
        // Spot 10: vega ≈ 3.8, so a 0.1 gain contracts
        let call = VanillaOption::european(10.0, PayoffType::Call, 1.0).unwrap();
        let target = lattice_price(&call, 10.0, 0.2);

        let out = ImpliedVolatilitySolver::fixed_gain()
            .solve(&call, &quote(target, 10.0), 50, 100, 1e-6)
            .unwrap();

        assert!((out.implied_volatility.unwrap() - 0.2).abs() < 1e-3);
        assert!(out.iteration_count < 100);
    }

    #[test]
    fn test_fixed_gain_oscillates_at_the_money() {
        // Spot 100: vega ≈ 38, gain · vega > 2, iterates bounce between clamps
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let target = lattice_price(&call, 100.0, 0.2);

        let out = ImpliedVolatilitySolver::fixed_gain()
            .solve(&call, &quote(target, 100.0), 50, 50, 1e-6)
            .unwrap();

        assert_eq!(out.iteration_count, 50);
        let vol = out.implied_volatility.unwrap();
        assert!((0.001..=2.0).contains(&vol));
    }

    #[test]
    fn test_unreachable_price_exhausts_budget() {
        // A call can never be worth more than the spot
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        for solver in [
            ImpliedVolatilitySolver::default(),
            ImpliedVolatilitySolver::fixed_gain(),
        ] {
            let out = solver
                .solve(&call, &quote(150.0, 100.0), 50, 30, 1e-6)
                .unwrap();
            assert_eq!(out.iteration_count, 30);
            assert_relative_eq!(out.implied_volatility.unwrap(), 2.0);
            assert!(out.fair_value < 100.0);
        }
    }

    #[test]
    fn test_zero_iterations_returns_initial_guess() {
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let out = ImpliedVolatilitySolver::default()
            .solve(&call, &quote(10.0, 100.0), 50, 0, 1e-6)
            .unwrap();
        assert_eq!(out.iteration_count, 0);
        assert_relative_eq!(out.implied_volatility.unwrap(), 0.3);
    }

    #[test]
    fn test_invalid_inputs_fail_fast() {
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let solver = ImpliedVolatilitySolver::default();

        let err = solver
            .solve(&call, &quote(10.0, 100.0), 0, 100, 1e-6)
            .unwrap_err();
        assert_eq!(err, LatticeError::InvalidStepCount { steps: 0 });

        let late = MarketData::new(10.0, 100.0, 0.05, 0.2, 2.0).unwrap();
        let err = solver.solve(&call, &late, 50, 100, 1e-6).unwrap_err();
        assert!(matches!(
            err,
            LatticeError::InvalidInstrument(InstrumentError::MaturityNotAfterValuation { .. })
        ));
    }

    #[test]
    fn test_bermudan_put_round_trip() {
        let put = VanillaOption::bermudan(100.0, PayoffType::Put, 1.0, 0.25, 0.75).unwrap();
        let target = lattice_price(&put, 100.0, 0.35);

        let out = ImpliedVolatilitySolver::default()
            .solve_with(&put, &quote(target, 100.0), 50, &SolverConfig::new(1e-7, 100))
            .unwrap();
        assert_relative_eq!(out.implied_volatility.unwrap(), 0.35, epsilon = 1e-4);
    }
}
