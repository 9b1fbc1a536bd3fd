//! Persistence
//!
//! Authoritative pitch writes followed by best-effort side writes.

pub mod coordinator;
pub mod side_writes;

pub use coordinator::*;
pub use side_writes::*;
