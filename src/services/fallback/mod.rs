//! Fallback Execution
//!
//! Ordered fallback across generation strategies.

pub mod chain;

pub use chain::*;
