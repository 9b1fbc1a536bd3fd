//! Storage Layer
//!
//! Handles data persistence: the SQLite pitch database and the JSON config.

pub mod config;
pub mod database;

pub use config::*;
pub use database::*;
