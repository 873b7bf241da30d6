//! Core error types shared across the workspace.
//!
//! This module provides:
//! - `error`: Structured, categorised pricing errors
//!
//! # Re-exports
//!
//! - [`PricingError`] from `error`

pub mod error;

pub use error::PricingError;
