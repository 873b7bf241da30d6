//! # Pricer Models (L2: Contract Definitions)
//!
//! Option contracts and their exercise rules.
//!
//! This crate provides:
//! - Validated contract terms (strike, maturity)
//! - Call/put payoffs
//! - European, American and Bermudan exercise styles
//! - The [`Derivative`](instruments::Derivative) trait consumed by the lattice engine
//!
//! ## Design Principles
//!
//! - **Enum-based exercise styles** for static dispatch
//! - **Stateless contracts**: market data is always passed in by the caller,
//!   so one contract can be priced concurrently against many markets
//! - **Validation at construction**: an instrument that exists is priceable

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
