//! Rayon fan-out over independent valuation requests.
//!
//! Each request owns its contract and market snapshot, and every valuation
//! allocates its own lattice, so requests run in parallel without
//! coordination. Results come back in request order.

use crate::error::LatticeError;
use crate::implied_vol::ImpliedVolatilitySolver;
use crate::lattice::BinomialEngine;
use crate::output::PricingOutput;
use num_traits::Float;
use pricer_core::market_data::MarketData;
use pricer_models::instruments::Derivative;
use rayon::prelude::*;

/// Minimum batch size before work is handed to the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// One contract to value against one market snapshot.
#[derive(Debug, Clone)]
pub struct PricingRequest<T: Float, D> {
    /// Contract to value.
    pub derivative: D,
    /// Market snapshot (price is used only by the solver).
    pub market: MarketData<T>,
    /// Lattice steps.
    pub steps: usize,
}

impl<T: Float, D: Derivative<T>> PricingRequest<T, D> {
    /// Creates a request.
    pub fn new(derivative: D, market: MarketData<T>, steps: usize) -> Self {
        Self {
            derivative,
            market,
            steps,
        }
    }
}

/// Batch execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Batches shorter than this run sequentially.
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl BatchConfig {
    /// Returns whether a batch of `n_items` should use the rayon pool.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

fn run<T, D, F>(
    requests: &[PricingRequest<T, D>],
    config: &BatchConfig,
    job: F,
) -> Vec<Result<PricingOutput<T>, LatticeError>>
where
    T: Float + Send + Sync,
    D: Derivative<T> + Sync,
    F: Fn(&PricingRequest<T, D>) -> Result<PricingOutput<T>, LatticeError> + Sync + Send,
{
    if config.should_parallelize(requests.len()) {
        requests.par_iter().map(job).collect()
    } else {
        requests.iter().map(job).collect()
    }
}

/// Values every request with `engine`, one result per request.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketData;
/// use pricer_models::instruments::{PayoffType, VanillaOption};
/// use pricer_pricing::batch::{value_batch, PricingRequest};
/// use pricer_pricing::lattice::BinomialEngine;
///
/// let market = MarketData::new(10.0_f64, 100.0, 0.05, 0.2, 0.0).unwrap();
/// let requests: Vec<_> = [90.0, 100.0, 110.0]
///     .iter()
///     .map(|&k| {
///         let put = VanillaOption::american(k, PayoffType::Put, 1.0).unwrap();
///         PricingRequest::new(put, market, 50)
///     })
///     .collect();
///
/// let results = value_batch(&BinomialEngine::new(), &requests);
/// assert_eq!(results.len(), 3);
/// assert!(results.iter().all(|r| r.is_ok()));
/// ```
pub fn value_batch<T, D>(
    engine: &BinomialEngine,
    requests: &[PricingRequest<T, D>],
) -> Vec<Result<PricingOutput<T>, LatticeError>>
where
    T: Float + Send + Sync,
    D: Derivative<T> + Sync,
{
    value_batch_with(engine, requests, &BatchConfig::default())
}

/// [`value_batch`] with explicit batch settings.
pub fn value_batch_with<T, D>(
    engine: &BinomialEngine,
    requests: &[PricingRequest<T, D>],
    config: &BatchConfig,
) -> Vec<Result<PricingOutput<T>, LatticeError>>
where
    T: Float + Send + Sync,
    D: Derivative<T> + Sync,
{
    tracing::debug!(requests = requests.len(), "valuing batch");
    run(requests, config, |req| {
        engine.value(&req.derivative, &req.market, req.steps)
    })
}

/// Runs the implied-volatility solver for every request.
pub fn solve_batch<T, D>(
    solver: &ImpliedVolatilitySolver<T>,
    requests: &[PricingRequest<T, D>],
    max_iterations: usize,
    tolerance: T,
) -> Vec<Result<PricingOutput<T>, LatticeError>>
where
    T: Float + Send + Sync,
    D: Derivative<T> + Sync,
{
    tracing::debug!(requests = requests.len(), "solving batch");
    run(requests, &BatchConfig::default(), |req| {
        solver.solve(
            &req.derivative,
            &req.market,
            req.steps,
            max_iterations,
            tolerance,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::{PayoffType, VanillaOption};

    fn ladder(steps: usize) -> Vec<PricingRequest<f64, VanillaOption<f64>>> {
        let market = MarketData::new(10.0, 100.0, 0.05, 0.2, 0.0).unwrap();
        (0..11)
            .map(|i| {
                let strike = 100.0 + (i as f64 - 5.0) * 2.5;
                let put = VanillaOption::american(strike, PayoffType::Put, 1.0).unwrap();
                PricingRequest::new(put, market, steps)
            })
            .collect()
    }

    #[test]
    fn test_batch_matches_sequential_in_order() {
        let engine = BinomialEngine::new();
        let requests = ladder(60);
        let batch = value_batch(&engine, &requests);

        assert_eq!(batch.len(), requests.len());
        for (req, result) in requests.iter().zip(&batch) {
            let single = engine.value(&req.derivative, &req.market, req.steps).unwrap();
            assert_eq!(result.as_ref().unwrap(), &single);
        }
        // Put values rise with strike
        let values: Vec<f64> = batch.iter().map(|r| r.as_ref().unwrap().fair_value).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_errors_stay_per_request() {
        let engine = BinomialEngine::new();
        let mut requests = ladder(40);
        requests[3].steps = 0;

        let batch = value_batch(&engine, &requests);
        assert_eq!(
            batch[3],
            Err(LatticeError::InvalidStepCount { steps: 0 })
        );
        assert_eq!(batch.iter().filter(|r| r.is_ok()).count(), 10);
    }

    #[test]
    fn test_sequential_below_threshold() {
        let config = BatchConfig {
            parallel_threshold: 100,
        };
        assert!(!config.should_parallelize(11));
        let engine = BinomialEngine::new();
        let requests = ladder(30);
        let seq = value_batch_with(&engine, &requests, &config);
        let par = value_batch(&engine, &requests);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_solve_batch() {
        let engine = BinomialEngine::new();
        let market = MarketData::new(1.0, 100.0, 0.05, 0.25, 0.0).unwrap();
        let requests: Vec<_> = [95.0, 100.0, 105.0]
            .iter()
            .map(|&k| {
                let call = VanillaOption::european(k, PayoffType::Call, 1.0).unwrap();
                let price = engine.value(&call, &market, 50).unwrap().fair_value;
                let quote = MarketData::new(price, 100.0, 0.05, 0.2, 0.0).unwrap();
                PricingRequest::new(call, quote, 50)
            })
            .collect();

        let solved = solve_batch(&ImpliedVolatilitySolver::default(), &requests, 100, 1e-7);
        for out in solved {
            let vol = out.unwrap().implied_volatility.unwrap();
            assert!((vol - 0.25).abs() < 1e-4);
        }
    }
}
