//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod analytics;
pub mod generation;
pub mod pitch;
pub mod response;
pub mod settings;

pub use analytics::*;
pub use generation::*;
pub use pitch::*;
pub use response::*;
pub use settings::*;
