//! # cura-server
//!
//! HTTP API and command-line entry point for CuraLink.
//!
//! - [`api`]: axum router, handlers, shared state, and error mapping
//! - [`cli`]: clap definitions for the `curalink` binary
//! - [`serve`]: bind, serve, and shut down gracefully
//! - [`import`]: load catalog rows from a JSON file

pub mod api;
pub mod cli;
pub mod import;
pub mod serve;
