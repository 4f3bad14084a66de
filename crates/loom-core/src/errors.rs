//! Error types for the Loom core.

use crate::types::ItemId;
use thiserror::Error;

/// Top-level error type for the Loom crates.
#[derive(Debug, Error)]
pub enum LoomError {
    #[error(transparent)]
    Reorder(#[from] ReorderError),
}

/// Contract violations reported by the drag-reorder resolver.
///
/// None of these are recoverable conditions: each one means the caller's
/// view of the list has drifted from the resolver's, and continuing would
/// desynchronize what is drawn from what is stored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReorderError {
    #[error("No drag session is active")]
    NoActiveSession,

    #[error("A drag session is already active (origin index {origin})")]
    SessionActive { origin: usize },

    #[error("Origin index {index} is out of range for {len} items")]
    OriginOutOfRange { index: usize, len: usize },

    #[error("Cannot reorder an empty sequence")]
    EmptySequence,

    #[error("Sequence length mismatch: resolver tracks {expected} items, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Duplicate item: {0}")]
    DuplicateItem(ItemId),

    #[error("Invalid extent {extent} for item {index}: extents must be finite and non-negative")]
    InvalidExtent { index: usize, extent: f64 },
}
