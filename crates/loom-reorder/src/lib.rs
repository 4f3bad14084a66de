//! Drag-to-reorder position resolution for Loom lists.
//!
//! This crate tracks a single drag gesture over a list of rows: which slot the
//! dragged row would drop into, how far every other row must slide to make
//! room, and finally one atomic move in the host's storage on release.
//!
//! # Architecture
//!
//! 1. **Qualification**: [`PressGate`] decides when a press becomes a drag
//! 2. **Resolution**: [`ReorderResolver`] maps translation to a live index via [`ItemExtents`]
//! 3. **Commit**: storage implementing [`Reorderable`] receives a single move
//!
//! # Example
//!
//! ```
//! use loom_reorder::{ReorderConfig, ReorderResolver};
//!
//! let mut rows = vec!["A", "B", "C", "D", "E"];
//! let mut resolver = ReorderResolver::uniform(rows.len(), 44.0, ReorderConfig::default())?;
//!
//! resolver.begin_drag(2)?;
//! resolver.update_drag(44.0)?;
//! let update = resolver.update_drag(88.0)?;
//! assert_eq!(update.live_index, 4);
//!
//! resolver.end_drag(&mut rows)?;
//! assert_eq!(rows, ["A", "B", "D", "E", "C"]);
//! # Ok::<(), loom_core::LoomError>(())
//! ```

mod config;
mod extents;
mod gate;
mod resolver;
mod sequence;

pub use config::ReorderConfig;
pub use extents::ItemExtents;
pub use gate::PressGate;
pub use resolver::{
    Commit, DragSession, DragState, DragUpdate, IndexChange, IndexChangedHook, ReorderResolver,
};
pub use sequence::{final_index, insertion_offset, Reorderable, Sequence};
