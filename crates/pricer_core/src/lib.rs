//! # pricer_core: Foundation Layer for the Lattice Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - The immutable market snapshot consumed by every pricing call (`market_data`)
//! - Workspace-wide categorised errors: `PricingError` (`types::error`)
//! - Root-finding configuration shared by iterative solvers (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketData;
//!
//! // price, spot, rate, volatility, valuation time
//! let market = MarketData::new(10.0_f64, 100.0, 0.05, 0.2, 0.0).unwrap();
//! assert_eq!(market.spot(), 100.0);
//!
//! // Non-positive volatility is rejected at construction
//! assert!(MarketData::new(10.0_f64, 100.0, 0.05, -0.2, 0.0).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `MarketData` and `SolverConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
