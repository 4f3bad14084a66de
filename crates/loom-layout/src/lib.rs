//! Flow layout for Loom.
//!
//! This crate places measured items left to right inside a bounded width,
//! wrapping onto a new line whenever the next item would overflow. It is the
//! layout used by chip inputs, tag inputs and multi-select fields.
//!
//! # Architecture
//!
//! 1. **Flow**: [`compute_layout`] and the configurable [`FlowLayout`] produce a [`FlowResult`]
//! 2. **Lines**: every result carries its [`FlowLine`]s so callers can draw per-line chrome
//! 3. **Caching**: [`FlowCache`] skips recomputation when nothing changed between passes
//!
//! # Example
//!
//! ```
//! use loom_core::Size;
//! use loom_layout::compute_layout;
//!
//! let chips = [Size::new(50.0, 20.0), Size::new(60.0, 20.0), Size::new(40.0, 20.0)];
//! let result = compute_layout(100.0, &chips, 10.0);
//!
//! assert_eq!(result.lines().len(), 3);
//! assert_eq!(result.size(), Size::new(60.0, 80.0));
//! ```

mod cache;
mod flow;

pub use cache::{CacheStats, FlowCache};
pub use flow::{compute_layout, Alignment, FlowLayout, FlowLine, FlowResult, LineAlignment};
