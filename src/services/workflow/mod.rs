//! Workflow Backend
//!
//! Named-workflow invocation (n8n webhooks).

pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
