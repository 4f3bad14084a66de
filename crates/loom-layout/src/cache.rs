//! Single-entry memoization for flow layout passes.
//!
//! Hosts typically run a layout pass on every measurement cycle even when
//! neither the container width nor the chips changed. [`FlowCache`] keeps the
//! last result and hands it back when the inputs are bit-for-bit identical.
//!
//! # Usage
//!
//! ```
//! use loom_core::Size;
//! use loom_layout::{FlowCache, FlowLayout};
//!
//! let layout = FlowLayout::new().with_spacing(8.0);
//! let chips = [Size::new(64.0, 24.0), Size::new(48.0, 24.0)];
//! let mut cache = FlowCache::new();
//!
//! let first = layout.layout_cached(320.0, &chips, &mut cache).clone();
//! let second = layout.layout_cached(320.0, &chips, &mut cache);
//!
//! assert_eq!(&first, second);
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! # Invalidation
//!
//! All inputs are part of the key, so resizes and edits invalidate
//! automatically. [`FlowCache::invalidate`] forces the next pass to recompute.

use loom_core::Size;

use crate::flow::{Alignment, FlowLayout, FlowResult, LineAlignment};

/// Hit/miss counters for a [`FlowCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Bit-exact fingerprint of every input that affects a flow layout.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    spacing: u64,
    line_spacing: Option<u64>,
    item_alignment: Alignment,
    line_alignment: LineAlignment,
    max_width: u64,
    items: Vec<[u64; 2]>,
}

impl CacheKey {
    fn new(layout: &FlowLayout, max_width: f64, items: &[Size]) -> Self {
        Self {
            spacing: layout.spacing.to_bits(),
            line_spacing: layout.line_spacing.map(f64::to_bits),
            item_alignment: layout.item_alignment,
            line_alignment: layout.line_alignment,
            max_width: max_width.to_bits(),
            items: items.iter().map(|s| [s.width.to_bits(), s.height.to_bits()]).collect(),
        }
    }

    fn matches(&self, layout: &FlowLayout, max_width: f64, items: &[Size]) -> bool {
        self.spacing == layout.spacing.to_bits()
            && self.line_spacing == layout.line_spacing.map(f64::to_bits)
            && self.item_alignment == layout.item_alignment
            && self.line_alignment == layout.line_alignment
            && self.max_width == max_width.to_bits()
            && self.items.len() == items.len()
            && self
                .items
                .iter()
                .zip(items)
                .all(|(k, s)| k[0] == s.width.to_bits() && k[1] == s.height.to_bits())
    }
}

/// Remembers the most recent flow layout result.
#[derive(Debug, Clone, Default)]
pub struct FlowCache {
    key: Option<CacheKey>,
    result: FlowResult,
    stats: CacheStats,
}

impl FlowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for these inputs, computing it on a miss.
    pub fn layout(&mut self, layout: &FlowLayout, max_width: f64, items: &[Size]) -> &FlowResult {
        let hit = self
            .key
            .as_ref()
            .is_some_and(|key| key.matches(layout, max_width, items));

        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.result = layout.layout(max_width, items);
            self.key = Some(CacheKey::new(layout, max_width, items));
        }

        &self.result
    }

    /// Drop the cached entry so the next call recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
