//! Numerical building blocks.
//!
//! - [`solvers`]: configuration for iterative root-finding

pub mod solvers;
