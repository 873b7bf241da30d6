//! Solver configuration types.

use num_traits::Float;

/// Configuration for iterative root-finding.
///
/// Shared by the implied-volatility search and any other fixed-point
/// iteration in the workspace. The solver stops as soon as
/// `|residual| < tolerance` or after `max_iterations` attempts.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// // Price-matching defaults: 1e-4 on the price residual, 100 iterations
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// let custom = SolverConfig {
///     tolerance: 1e-8,
///     max_iterations: 250,
/// };
/// assert!(custom.tolerance < config.tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on the absolute residual.
    pub tolerance: T,

    /// Maximum number of iterations before returning a best-effort result.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-4 (price units)
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-4).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-6_f64, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Returns true if `residual` is inside the tolerance band.
    #[inline]
    pub fn is_converged(&self, residual: T) -> bool {
        residual.abs() < self.tolerance
    }
}
