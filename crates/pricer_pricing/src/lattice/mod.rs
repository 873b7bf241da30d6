//! Cox-Ross-Rubinstein binomial lattice.
//!
//! - [`LatticeParams`]: per-step growth factors and risk-neutral probability
//! - [`Lattice`]: dense triangular stock and option-value grids
//! - [`BinomialEngine`]: validation, grid construction and backward induction

mod engine;
mod grid;
mod params;

pub use engine::BinomialEngine;
pub use grid::Lattice;
pub use params::LatticeParams;
