//! Analytics
//!
//! Secondary per-pitch analytics store and stats aggregation.

mod aggregation;
mod service;
mod store;

pub use aggregation::*;
pub use service::*;
pub use store::*;
