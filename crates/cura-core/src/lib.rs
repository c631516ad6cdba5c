//! # cura-core
//!
//! Core types, ID prefixes, and error types for CuraLink.
//!
//! This crate provides the foundational types shared across all CuraLink crates:
//! - Entity structs for researchers, collaboration requests, messages, forum
//!   posts, and the read-only catalog (publications, trials, experts)
//! - Status and role enums with transition rules
//! - ID prefix constants
//! - Cross-cutting error types
//! - Composite API response shapes
//! - The fixed condition/country vocabulary used by text analysis

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod vocab;
