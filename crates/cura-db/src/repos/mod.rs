//! Repository modules implementing the CuraLink operations.
//!
//! Each module adds methods to `CuraService` via `impl CuraService` blocks.

pub mod catalog;
pub mod collaboration;
pub mod dashboard;
pub mod forum;
pub mod message;
pub mod researcher;
