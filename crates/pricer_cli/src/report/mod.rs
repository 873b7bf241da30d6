//! Generated reports.

pub mod chain;

pub use chain::{ChainSpec, OptionsChain};
