//! Geometry value types and item identity.

use std::fmt;

use glam::DVec2;

/// Stable identity of an item, independent of its position in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        ItemId(raw)
    }
}

/// Intrinsic size of an item, as measured by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Square size with equal sides.
    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<DVec2> for Size {
    fn from(v: DVec2) -> Self {
        Size::new(v.x, v.y)
    }
}

impl From<Size> for DVec2 {
    fn from(s: Size) -> Self {
        DVec2::new(s.width, s.height)
    }
}

/// A position in layout coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by the given deltas.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Position relative to the container origin
    pub x: f64,
    pub y: f64,
    /// Size of the item
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create bounds from a position and a size.
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the bounds.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True when the interiors of the two boxes overlap. Touching edges do not count.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Compute union (bounding box) with another bounds.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Bounds::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// Axis along which a list is laid out and reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left to right
    Horizontal,
    /// Top to bottom
    #[default]
    Vertical,
}

impl Axis {
    /// Extent of a size along this axis.
    pub fn main(self, size: Size) -> f64 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Extent of a size across this axis.
    pub fn cross(self, size: Size) -> f64 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// Turn a scalar offset along this axis into a 2D displacement.
    pub fn point_along(self, offset: f64) -> Point {
        match self {
            Axis::Horizontal => Point::new(offset, 0.0),
            Axis::Vertical => Point::new(0.0, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.bottom(), 60.0);
        assert!(b.contains(Point::new(40.0, 60.0)));
        assert!(!b.contains(Point::new(41.0, 60.0)));
    }

    #[test]
    fn test_touching_bounds_do_not_overlap() {
        let a = Bounds::new(0.0, 0.0, 50.0, 20.0);
        let b = Bounds::new(50.0, 0.0, 50.0, 20.0);
        let c = Bounds::new(49.0, 19.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_union() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Bounds::new(0.0, 0.0, 30.0, 15.0));
    }

    #[test]
    fn test_axis_projection() {
        let size = Size::new(120.0, 44.0);
        assert_eq!(Axis::Vertical.main(size), 44.0);
        assert_eq!(Axis::Horizontal.main(size), 120.0);
        assert_eq!(Axis::Vertical.cross(size), 120.0);
        assert_eq!(Axis::Vertical.point_along(-8.0), Point::new(0.0, -8.0));
        assert_eq!(Axis::Horizontal.point_along(8.0), Point::new(8.0, 0.0));
    }

    #[test]
    fn test_glam_interop() {
        let v = DVec2::new(3.0, 4.0);
        let s: Size = v.into();
        assert_eq!(s, Size::new(3.0, 4.0));
        let back: DVec2 = Point::new(1.5, 2.5).into();
        assert_eq!(back, DVec2::new(1.5, 2.5));
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId(7).to_string(), "#7");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_bounds_serializes_as_plain_fields() {
        let json = serde_json::to_string(&Bounds::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);
    }
}
