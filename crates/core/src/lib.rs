//! Pitch Writer Core
//!
//! Foundational types for the Pitch Writer workspace. This crate has zero
//! dependencies on application-level code (database, HTTP, LLM providers).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `pitch` - Pitch domain model (`PitchField`, `PitchFields`, `PitchPatch`, `PitchStatus`)
//! - `proxy` - Proxy configuration data types shared across workspace crates

pub mod error;
pub mod pitch;
pub mod proxy;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Pitch Model ────────────────────────────────────────────────────────
pub use pitch::{PitchField, PitchFields, PitchPatch, PitchStatus};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
