//! Utilities
//!
//! Common utilities used throughout the application.

pub mod clock;
pub mod error;
pub mod paths;

pub use clock::*;
pub use error::*;
pub use paths::*;
