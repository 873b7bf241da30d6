//! Backward-induction valuation on a CRR lattice.

use super::grid::Lattice;
use super::params::LatticeParams;
use crate::error::LatticeError;
use crate::output::PricingOutput;
use num_traits::Float;
use pricer_core::market_data::MarketData;
use pricer_models::instruments::{Derivative, InstrumentError};

/// Stateless Cox-Ross-Rubinstein pricing engine.
///
/// Each call validates its inputs, allocates a fresh lattice, rolls the
/// payoff back to the root and drops the lattice. Nothing is cached, so a
/// single engine can be shared across threads.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketData;
/// use pricer_models::instruments::{PayoffType, VanillaOption};
/// use pricer_pricing::lattice::BinomialEngine;
///
/// let engine = BinomialEngine::new();
/// let market = MarketData::new(5.0_f64, 100.0, 0.05, 0.2, 0.0).unwrap();
/// let european = VanillaOption::european(100.0, PayoffType::Put, 1.0).unwrap();
/// let american = VanillaOption::american(100.0, PayoffType::Put, 1.0).unwrap();
///
/// let eu = engine.value(&european, &market, 100).unwrap();
/// let am = engine.value(&american, &market, 100).unwrap();
/// assert!(am.fair_value >= eu.fair_value);
/// assert_eq!(eu.fugit, 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialEngine;

impl BinomialEngine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self
    }

    /// Values `derivative` on a lattice of `steps` steps.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::InvalidStepCount`] if `steps == 0`
    /// - [`LatticeError::InvalidInstrument`] if the contract matures at or
    ///   before the valuation time
    /// - [`LatticeError::NonFiniteValue`] if the rolled-back value is `inf`
    ///   or `NaN`
    pub fn value<T, D>(
        &self,
        derivative: &D,
        market: &MarketData<T>,
        steps: usize,
    ) -> Result<PricingOutput<T>, LatticeError>
    where
        T: Float,
        D: Derivative<T> + ?Sized,
    {
        let lattice = self.build_lattice(derivative, market, steps)?;
        let fair_value = lattice.root_value();
        if !fair_value.is_finite() {
            return Err(LatticeError::NonFiniteValue {
                value: fair_value.to_f64().unwrap_or(f64::NAN),
                steps,
            });
        }
        Ok(PricingOutput::valuation(fair_value, derivative.maturity()))
    }

    /// Builds and fills the lattice without collapsing it to an output.
    ///
    /// Same preconditions as [`BinomialEngine::value`]; the root value is
    /// returned as computed, without the finiteness check.
    pub fn build_lattice<T, D>(
        &self,
        derivative: &D,
        market: &MarketData<T>,
        steps: usize,
    ) -> Result<Lattice<T>, LatticeError>
    where
        T: Float,
        D: Derivative<T> + ?Sized,
    {
        let params = self.params(derivative, market, steps)?;
        let mut lattice = Lattice::new(market.spot(), params, steps);
        lattice.roll_back(derivative);
        Ok(lattice)
    }

    /// Checks the preconditions shared by valuation and the solver and
    /// returns `steps` in the working float type.
    pub(crate) fn check_inputs<T, D>(
        &self,
        derivative: &D,
        market: &MarketData<T>,
        steps: usize,
    ) -> Result<T, LatticeError>
    where
        T: Float,
        D: Derivative<T> + ?Sized,
    {
        if steps == 0 {
            return Err(LatticeError::InvalidStepCount { steps });
        }

        let maturity = derivative.maturity();
        let valuation_time = market.valuation_time();
        if maturity <= valuation_time {
            return Err(InstrumentError::MaturityNotAfterValuation {
                maturity: maturity.to_f64().unwrap_or(f64::NAN),
                valuation_time: valuation_time.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }

        T::from(steps).ok_or(LatticeError::InvalidStepCount { steps })
    }

    fn params<T, D>(
        &self,
        derivative: &D,
        market: &MarketData<T>,
        steps: usize,
    ) -> Result<LatticeParams<T>, LatticeError>
    where
        T: Float,
        D: Derivative<T> + ?Sized,
    {
        let steps_t = self.check_inputs(derivative, market, steps)?;
        let horizon = derivative.maturity() - market.valuation_time();
        let params = LatticeParams::new(horizon, market.rate(), market.volatility(), steps_t);

        tracing::debug!(
            steps,
            dt = params.dt.to_f64().unwrap_or(f64::NAN),
            up = params.up.to_f64().unwrap_or(f64::NAN),
            probability = params.probability.to_f64().unwrap_or(f64::NAN),
            "lattice parameters"
        );
        if params.is_probability_degenerate() {
            tracing::warn!(
                probability = params.probability.to_f64().unwrap_or(f64::NAN),
                steps,
                "risk-neutral probability outside [0, 1]; increase steps or check rate/volatility"
            );
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{PayoffType, VanillaOption};

    fn market(volatility: f64) -> MarketData<f64> {
        MarketData::new(10.0, 100.0, 0.05, volatility, 0.0).unwrap()
    }

    #[test]
    fn test_one_step_call_by_hand() {
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let out = BinomialEngine::new().value(&call, &market(0.2), 1).unwrap();

        let u = 0.2_f64.exp();
        let d = 1.0 / u;
        let p = (0.05_f64.exp() - d) / (u - d);
        let expected = (-0.05_f64).exp() * p * (100.0 * u - 100.0);
        assert_relative_eq!(out.fair_value, expected, epsilon = 1e-12);
        assert_relative_eq!(out.fugit, 1.0);
        assert!(out.implied_volatility.is_none());
        assert_eq!(out.iteration_count, 0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let err = BinomialEngine::new().value(&call, &market(0.2), 0).unwrap_err();
        assert_eq!(err, LatticeError::InvalidStepCount { steps: 0 });
    }

    #[test]
    fn test_matured_contract_rejected() {
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let late = MarketData::new(10.0, 100.0, 0.05, 0.2, 1.0).unwrap();
        let err = BinomialEngine::new().value(&call, &late, 10).unwrap_err();
        assert!(matches!(
            err,
            LatticeError::InvalidInstrument(InstrumentError::MaturityNotAfterValuation { .. })
        ));
    }

    #[test]
    fn test_valuation_time_shifts_horizon() {
        let engine = BinomialEngine::new();
        let from_zero = VanillaOption::european(100.0, PayoffType::Put, 1.0).unwrap();
        let shifted = VanillaOption::european(100.0, PayoffType::Put, 1.5).unwrap();
        let later = MarketData::new(10.0, 100.0, 0.05, 0.2, 0.5).unwrap();

        let a = engine.value(&from_zero, &market(0.2), 40).unwrap();
        let b = engine.value(&shifted, &later, 40).unwrap();
        assert_relative_eq!(a.fair_value, b.fair_value, epsilon = 1e-12);
        assert_relative_eq!(b.fugit, 1.5);
    }

    #[test]
    fn test_bermudan_window_measured_from_valuation_time() {
        // Window [0.25, 0.75] on a contract maturing at 1.5 seen from t0 = 0.5:
        // nodes sit at elapsed times 0.0..=1.0, so the window opens a quarter
        // of the way in and closes at three quarters, not at absolute 0.25
        let engine = BinomialEngine::new();
        let later = MarketData::new(10.0, 100.0, 0.05, 0.3, 0.5).unwrap();
        let shifted = VanillaOption::bermudan(110.0, PayoffType::Put, 1.5, 0.25, 0.75).unwrap();
        let from_zero = VanillaOption::bermudan(110.0, PayoffType::Put, 1.0, 0.25, 0.75).unwrap();
        let absolute = VanillaOption::bermudan(110.0, PayoffType::Put, 1.0, 0.0, 0.25).unwrap();

        let s = engine.value(&shifted, &later, 40).unwrap().fair_value;
        let z = engine.value(&from_zero, &market(0.3), 40).unwrap().fair_value;
        let a = engine.value(&absolute, &market(0.3), 40).unwrap().fair_value;
        assert_relative_eq!(s, z, epsilon = 1e-12);
        assert!((s - a).abs() > 1e-6);
    }

    #[test]
    fn test_overflowing_lattice_reports_non_finite_value() {
        // The top terminal node overflows to inf and the call payoff carries it to the root
        let call = VanillaOption::european(100.0, PayoffType::Call, 50.0).unwrap();
        let wild = MarketData::new(10.0, 100.0, 0.01, 3.0, 0.0).unwrap();
        let engine = BinomialEngine::new();

        let err = engine.value(&call, &wild, 5000).unwrap_err();
        assert!(matches!(err, LatticeError::NonFiniteValue { steps: 5000, .. }));

        // Same grid priced as a put stays finite: no NaN leaks from the stock row
        let put = VanillaOption::european(100.0, PayoffType::Put, 50.0).unwrap();
        let out = engine.value(&put, &wild, 5000).unwrap();
        assert!(out.fair_value.is_finite());
        assert!(out.fair_value > 0.0 && out.fair_value < 100.0);
    }

    #[test]
    fn test_european_put_call_parity() {
        let engine = BinomialEngine::new();
        let call = VanillaOption::european(95.0, PayoffType::Call, 1.0).unwrap();
        let put = VanillaOption::european(95.0, PayoffType::Put, 1.0).unwrap();
        let c = engine.value(&call, &market(0.25), 100).unwrap().fair_value;
        let p = engine.value(&put, &market(0.25), 100).unwrap().fair_value;
        assert_relative_eq!(c - p, 100.0 - 95.0 * (-0.05_f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_american_call_without_dividends_matches_european() {
        let engine = BinomialEngine::new();
        let eu = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let am = VanillaOption::american(100.0, PayoffType::Call, 1.0).unwrap();
        let eu_v = engine.value(&eu, &market(0.2), 200).unwrap().fair_value;
        let am_v = engine.value(&am, &market(0.2), 200).unwrap().fair_value;
        assert_relative_eq!(eu_v, am_v, epsilon = 1e-10);
    }

    #[test]
    fn test_american_put_carries_early_exercise_premium() {
        let engine = BinomialEngine::new();
        let eu = VanillaOption::european(110.0, PayoffType::Put, 1.0).unwrap();
        let am = VanillaOption::american(110.0, PayoffType::Put, 1.0).unwrap();
        let eu_v = engine.value(&eu, &market(0.2), 200).unwrap().fair_value;
        let am_v = engine.value(&am, &market(0.2), 200).unwrap().fair_value;
        assert!(am_v > eu_v + 0.1);
    }

    #[test]
    fn test_full_window_bermudan_matches_american() {
        let engine = BinomialEngine::new();
        let am = VanillaOption::american(105.0, PayoffType::Put, 1.0).unwrap();
        let ber = VanillaOption::bermudan(105.0, PayoffType::Put, 1.0, 0.0, 1.0).unwrap();
        let am_v = engine.value(&am, &market(0.3), 80).unwrap().fair_value;
        let ber_v = engine.value(&ber, &market(0.3), 80).unwrap().fair_value;
        assert_eq!(am_v, ber_v);
    }

    #[test]
    fn test_degenerate_probability_still_values() {
        // r dt far above σ √dt gives p > 1; valuation proceeds unclamped
        let call = VanillaOption::european(100.0, PayoffType::Call, 1.0).unwrap();
        let skewed = MarketData::new(10.0, 100.0, 0.5, 0.01, 0.0).unwrap();
        let out = BinomialEngine::new().value(&call, &skewed, 1).unwrap();

        let u = 0.01_f64.exp();
        let d = 1.0 / u;
        let p = (0.5_f64.exp() - d) / (u - d);
        assert!(p > 1.0);
        let expected = (-0.5_f64).exp() * p * (100.0 * u - 100.0);
        assert_relative_eq!(out.fair_value, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_build_lattice_exposes_grid() {
        let put = VanillaOption::european(100.0, PayoffType::Put, 1.0).unwrap();
        let engine = BinomialEngine::new();
        let lattice = engine.build_lattice(&put, &market(0.2), 10).unwrap();
        assert_eq!(lattice.steps(), 10);
        assert_eq!(
            lattice.root_value(),
            engine.value(&put, &market(0.2), 10).unwrap().fair_value
        );
    }

    #[test]
    fn test_trait_object_derivative() {
        let boxed: Box<dyn Derivative<f64>> =
            Box::new(VanillaOption::american(100.0, PayoffType::Put, 0.5).unwrap());
        let out = BinomialEngine::new().value(boxed.as_ref(), &market(0.2), 20).unwrap();
        assert!(out.fair_value > 0.0);
        assert_relative_eq!(out.fugit, 0.5);
    }

    #[test]
    fn test_engine_with_f32() {
        let call = VanillaOption::european(100.0_f32, PayoffType::Call, 1.0).unwrap();
        let m = MarketData::new(10.0_f32, 100.0, 0.05, 0.2, 0.0).unwrap();
        let out = BinomialEngine::new().value(&call, &m, 50).unwrap();
        assert!(out.fair_value > 10.0 && out.fair_value < 11.0);
    }
}
