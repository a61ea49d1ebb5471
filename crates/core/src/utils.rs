//! Miscellaneous geometric routines shared across the crate.
//!
//! Provides:
//! - Pixel and sub-pixel point types
//! - Integer rectangles in (x, y, r, b) form and their overlap
//! - The `HasBBox` trait for objects with an axis-aligned extent

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// An integer pixel coordinate (x, y).
pub type Point = (i32, i32);

/// A sub-pixel coordinate (x, y), produced by projections.
pub type FPoint = (f64, f64);

/// A rectangle defined by (x, y, r, b): left, top, right and bottom edges
/// with y growing downwards.
pub type Rect = (i32, i32, i32, i32);

/// A rectangle reported as (x, y, width, height).
pub type Xywh = [i32; 4];

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[inline]
pub fn to_fpoint(p: Point) -> FPoint {
    (f64::from(p.0), f64::from(p.1))
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: FPoint, b: FPoint) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

/// Rounds a sub-pixel point to the pixel grid.
#[inline]
pub fn round_point(p: FPoint) -> Point {
    (p.0.round() as i32, p.1.round() as i32)
}

/// Bounding rectangle of a point set, None when empty.
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let mut rect = (first.0, first.1, first.0, first.1);
    for p in rest {
        rect.0 = rect.0.min(p.0);
        rect.1 = rect.1.min(p.1);
        rect.2 = rect.2.max(p.0);
        rect.3 = rect.3.max(p.1);
    }
    Some(rect)
}

/// Intersection of two rectangles.
///
/// Rectangles that only touch yield a zero-width or zero-height rectangle;
/// None is returned only when they are apart on either axis.
pub fn rect_overlap(a: Rect, b: Rect) -> Option<Rect> {
    if a.0 > b.2 || b.0 > a.2 {
        return None;
    }
    if a.1 > b.3 || b.1 > a.3 {
        return None;
    }
    Some((a.0.max(b.0), a.1.max(b.1), a.2.min(b.2), a.3.min(b.3)))
}

/// Area of a rectangle, widened to avoid overflow on large pages.
#[inline]
pub fn rect_area(r: Rect) -> i64 {
    i64::from(r.2 - r.0) * i64::from(r.3 - r.1)
}

/// Smallest rectangle covering both inputs.
#[inline]
pub fn rect_union(a: Rect, b: Rect) -> Rect {
    (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
}

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> (f64, f64, f64, f64) {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }
}
