//! Core types and errors shared by the Loom layout crates.
//!
//! This crate provides the foundational types used across the other loom crates:
//! - Geometry value types (sizes, points, bounds, axes)
//! - Stable item identity for reorderable sequences
//! - Error types

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::*;
