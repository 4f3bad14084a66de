//! Item extents along the reorder axis and drop-slot resolution.
//!
//! A dragged item passes a neighbour once its translation covers half of that
//! neighbour's stride (extent plus spacing). With equal extents this reduces
//! to `round(translation / stride)` slots, ties rounding away from the origin.

use loom_core::ReorderError;

/// Sizes of the list's items along the reorder axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemExtents {
    /// Every row shares one extent
    Uniform { extent: f64, count: usize },
    /// One extent per item, in list order
    Variable(Vec<f64>),
}

impl ItemExtents {
    pub fn uniform(extent: f64, count: usize) -> Self {
        ItemExtents::Uniform { extent, count }
    }

    pub fn variable(extents: impl Into<Vec<f64>>) -> Self {
        ItemExtents::Variable(extents.into())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        match self {
            ItemExtents::Uniform { count, .. } => *count,
            ItemExtents::Variable(extents) => extents.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent of one item. Out-of-range indices have no extent.
    pub fn extent(&self, index: usize) -> f64 {
        match self {
            ItemExtents::Uniform { extent, count } if index < *count => *extent,
            ItemExtents::Variable(extents) => extents.get(index).copied().unwrap_or(0.0),
            ItemExtents::Uniform { .. } => 0.0,
        }
    }

    /// Distance from one item's leading edge to the next item's.
    pub fn stride(&self, index: usize, spacing: f64) -> f64 {
        self.extent(index) + spacing
    }

    /// Reject extents that would make slot resolution meaningless.
    pub fn validate(&self) -> Result<(), ReorderError> {
        let check = |index: usize, extent: f64| {
            if extent.is_finite() && extent >= 0.0 {
                Ok(())
            } else {
                Err(ReorderError::InvalidExtent { index, extent })
            }
        };
        match self {
            ItemExtents::Uniform { extent, .. } => check(0, *extent),
            ItemExtents::Variable(extents) => extents
                .iter()
                .enumerate()
                .try_for_each(|(index, extent)| check(index, *extent)),
        }
    }

    /// Slot the item dragged from `origin` would drop into after moving `translation`.
    ///
    /// The result is always within `0..len`. `origin` must be in range.
    pub fn resolve(&self, origin: usize, translation: f64, spacing: f64) -> usize {
        let len = self.len();
        debug_assert!(origin < len, "origin {origin} out of range for {len} items");
        if translation == 0.0 || translation.is_nan() {
            return origin;
        }

        match self {
            ItemExtents::Uniform { extent, .. } => {
                let steps = (translation / (extent + spacing)).round();
                let last = (len - 1) as f64;
                (origin as f64 + steps).clamp(0.0, last) as usize
            }
            ItemExtents::Variable(_) => self.resolve_variable(origin, translation, spacing),
        }
    }

    fn resolve_variable(&self, origin: usize, translation: f64, spacing: f64) -> usize {
        let distance = translation.abs();
        let mut covered = 0.0;
        let mut index = origin;

        if translation > 0.0 {
            while index + 1 < self.len() {
                let next = self.stride(index + 1, spacing);
                if distance < covered + next / 2.0 {
                    break;
                }
                covered += next;
                index += 1;
            }
        } else {
            while index > 0 {
                let prev = self.stride(index - 1, spacing);
                if distance < covered + prev / 2.0 {
                    break;
                }
                covered += prev;
                index -= 1;
            }
        }

        index
    }
}
