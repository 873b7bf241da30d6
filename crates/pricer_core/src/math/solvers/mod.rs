//! Root-finding configuration for numerical computation.
//!
//! Iterative solvers in the workspace (notably the implied-volatility
//! search in `pricer_pricing`) share [`SolverConfig`] for:
//! - `tolerance`: Convergence tolerance on the residual (default: 1e-4)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::SolverConfig;
//!
//! let config = SolverConfig::new(1e-4_f64, 100);
//! assert_eq!(config.max_iterations, 100);
//! ```

mod config;

pub use config::SolverConfig;
