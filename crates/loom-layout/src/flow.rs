//! Flow layout: left-to-right placement with wrapping.
//!
//! Items keep their intrinsic size. A line is closed as soon as the next item
//! would cross the maximum width, except that an empty line always accepts
//! one item, so an item wider than the container sits alone on its own line
//! instead of being truncated or dropped.

use std::ops::Range;

use loom_core::{Bounds, Point, Size};

/// Alignment of items on the cross axis of their line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Align to the top of the line
    #[default]
    Start,
    /// Center within the line height
    Center,
    /// Align to the bottom of the line
    End,
}

/// Placement of each line inside a bounded container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineAlignment {
    /// Lines start at the left edge
    #[default]
    Leading,
    /// Lines are centered in the container
    Center,
    /// Lines end at the right edge
    Trailing,
}

/// Flow layout configuration.
///
/// The default configuration (no spacing, top-aligned items, leading lines)
/// is the plain wrapping algorithm; every option only moves items inside
/// the lines that algorithm produces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowLayout {
    /// Gap between items on a line, and between lines unless overridden
    pub spacing: f64,
    /// Gap between lines (falls back to `spacing`)
    pub line_spacing: Option<f64>,
    /// Alignment of shorter items within their line
    pub item_alignment: Alignment,
    /// Placement of lines within a bounded width
    pub line_alignment: LineAlignment,
}

/// One wrapped line of a flow layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowLine {
    /// Index of the first item on this line
    pub start: usize,
    /// One past the index of the last item on this line
    pub end: usize,
    /// Top edge of the line
    pub y: f64,
    /// Width from the first item's left edge to the last item's right edge
    pub width: f64,
    /// Height of the tallest item on the line
    pub height: f64,
}

impl FlowLine {
    /// Item indices on this line.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Output of a flow layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowResult {
    positions: Vec<Point>,
    lines: Vec<FlowLine>,
    size: Size,
}

impl FlowResult {
    /// Top-left position of every item, in input order.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    /// Lines in top-to-bottom order.
    pub fn lines(&self) -> &[FlowLine] {
        &self.lines
    }

    /// Total bounding size of all lines.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the line holding the given item.
    pub fn line_of(&self, index: usize) -> Option<usize> {
        if index >= self.positions.len() {
            return None;
        }
        // Lines are contiguous and sorted, so the owner is the last line starting at or before `index`.
        let after = self.lines.partition_point(|line| line.start <= index);
        after.checked_sub(1)
    }

    /// Bounds of one item, given the sizes the layout was computed from.
    pub fn bounds(&self, index: usize, items: &[Size]) -> Option<Bounds> {
        let origin = self.position(index)?;
        let size = items.get(index)?;
        Some(Bounds::from_parts(origin, *size))
    }

    /// Iterate `(index, bounds)` for every placed item.
    pub fn placements<'a>(&'a self, items: &'a [Size]) -> impl Iterator<Item = (usize, Bounds)> + 'a {
        self.positions
            .iter()
            .zip(items)
            .enumerate()
            .map(|(i, (origin, size))| (i, Bounds::from_parts(*origin, *size)))
    }
}

/// Compute a flow layout with uniform spacing.
///
/// `max_width` may be `f64::INFINITY` for an unbounded container, which puts
/// every item on a single line. Negative or NaN spacing counts as zero.
pub fn compute_layout(max_width: f64, items: &[Size], spacing: f64) -> FlowResult {
    FlowLayout::new().with_spacing(spacing).layout(max_width, items)
}

impl FlowLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap between items (and between lines, unless overridden).
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set a separate gap between lines.
    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = Some(line_spacing);
        self
    }

    /// Set the alignment of items within their line.
    pub fn with_item_alignment(mut self, alignment: Alignment) -> Self {
        self.item_alignment = alignment;
        self
    }

    /// Set the placement of lines within the container.
    pub fn with_line_alignment(mut self, alignment: LineAlignment) -> Self {
        self.line_alignment = alignment;
        self
    }

    /// Compute the placement of `items` within `max_width`.
    pub fn layout(&self, max_width: f64, items: &[Size]) -> FlowResult {
        if items.is_empty() {
            return FlowResult::default();
        }

        let max_width = if max_width.is_nan() { f64::INFINITY } else { max_width };
        let spacing = non_negative(self.spacing);
        let line_spacing = self.line_spacing.map(non_negative).unwrap_or(spacing);

        let mut positions = Vec::with_capacity(items.len());
        let mut lines = Vec::new();
        let mut cursor_x = 0.0_f64;
        let mut cursor_y = 0.0_f64;
        let mut line_height = 0.0_f64;
        let mut line_width = 0.0_f64;
        let mut line_start = 0;
        let mut total_width = 0.0_f64;

        for (i, item) in items.iter().enumerate() {
            let width = non_negative(item.width);
            let height = non_negative(item.height);

            // Wrap only when the line already holds something
            if cursor_x + width > max_width && cursor_x > 0.0 {
                lines.push(FlowLine {
                    start: line_start,
                    end: i,
                    y: cursor_y,
                    width: line_width,
                    height: line_height,
                });
                cursor_y += line_height + line_spacing;
                cursor_x = 0.0;
                line_height = 0.0;
                line_width = 0.0;
                line_start = i;

                #[cfg(feature = "tracing")]
                tracing::trace!(index = i, y = cursor_y, "flow line wrap");
            }

            positions.push(Point::new(cursor_x, cursor_y));
            line_height = line_height.max(height);
            cursor_x += width + spacing;
            line_width = line_width.max(cursor_x - spacing);
            total_width = total_width.max(cursor_x - spacing);
        }

        lines.push(FlowLine {
            start: line_start,
            end: items.len(),
            y: cursor_y,
            width: line_width,
            height: line_height,
        });

        let mut size = Size::new(total_width, cursor_y + line_height);

        if self.item_alignment != Alignment::Start {
            self.apply_item_alignment(&mut positions, &lines, items);
        }
        if self.line_alignment != LineAlignment::Leading && max_width.is_finite() {
            self.apply_line_alignment(&mut positions, &lines, max_width);
            // Lines are now spread over the container, so report its width
            size.width = size.width.max(max_width);
        }

        FlowResult { positions, lines, size }
    }

    /// Bounding size of the layout without keeping the positions.
    pub fn measure(&self, max_width: f64, items: &[Size]) -> Size {
        self.layout(max_width, items).size()
    }

    /// Same as [`layout`](Self::layout), reusing `cache` when the inputs are unchanged.
    pub fn layout_cached<'c>(
        &self,
        max_width: f64,
        items: &[Size],
        cache: &'c mut crate::FlowCache,
    ) -> &'c FlowResult {
        cache.layout(self, max_width, items)
    }

    fn apply_item_alignment(&self, positions: &mut [Point], lines: &[FlowLine], items: &[Size]) {
        for line in lines {
            for i in line.range() {
                let height = non_negative(items[i].height);
                let dy = match self.item_alignment {
                    Alignment::Start => 0.0,
                    Alignment::Center => (line.height - height) / 2.0,
                    Alignment::End => line.height - height,
                };
                positions[i].y += dy;
            }
        }
    }

    fn apply_line_alignment(&self, positions: &mut [Point], lines: &[FlowLine], max_width: f64) {
        for line in lines {
            // An over-wide single item stays at the left edge
            let free = (max_width - line.width).max(0.0);
            let dx = match self.line_alignment {
                LineAlignment::Leading => 0.0,
                LineAlignment::Center => free / 2.0,
                LineAlignment::Trailing => free,
            };
            for position in &mut positions[line.range()] {
                position.x += dx;
            }
        }
    }
}

/// Clamp measurement noise (negative or NaN) to zero.
fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}
