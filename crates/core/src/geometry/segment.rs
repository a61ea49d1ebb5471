//! Line segment algebra.
//!
//! Detected straight lines are matched against candidate panel boundaries.
//! Two segments "intersect" when they run along the same line and share a
//! stretch of it; their union stitches them into one longer segment.

use ordered_float::OrderedFloat;

use crate::utils::{EPSILON, FPoint, HasBBox, Point, distance, to_fpoint};

/// Maximum angular difference, in degrees, between segments lying on the
/// same physical line.
pub const MAX_ANGLE_DEGREES: f64 = 10.0;

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: FPoint,
    pub b: FPoint,
}

impl Segment {
    pub const fn new(a: FPoint, b: FPoint) -> Self {
        Self { a, b }
    }

    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(to_fpoint(a), to_fpoint(b))
    }

    pub fn dx(&self) -> f64 {
        self.b.0 - self.a.0
    }

    pub fn dy(&self) -> f64 {
        self.b.1 - self.a.1
    }

    pub fn length(&self) -> f64 {
        distance(self.a, self.b)
    }

    pub fn is_degenerate(&self) -> bool {
        self.length() < EPSILON
    }

    pub fn left(&self) -> f64 {
        self.a.0.min(self.b.0)
    }

    pub fn top(&self) -> f64 {
        self.a.1.min(self.b.1)
    }

    pub fn right(&self) -> f64 {
        self.a.0.max(self.b.0)
    }

    pub fn bottom(&self) -> f64 {
        self.a.1.max(self.b.1)
    }

    /// Direction of the segment in degrees, in (-180, 180].
    pub fn angle(&self) -> f64 {
        self.dy().atan2(self.dx()).to_degrees()
    }

    /// Angle between the lines carrying both segments, in [0, 90].
    ///
    /// Anti-parallel segments are parallel here: detectors report the same
    /// physical line in either direction.
    pub fn angle_between(&self, other: &Segment) -> f64 {
        let d = (self.angle() - other.angle()).abs() % 180.0;
        d.min(180.0 - d)
    }

    /// Position of `p` along the segment, 0 at `a` and 1 at `b`.
    fn param(&self, p: FPoint) -> f64 {
        let len2 = self.dx() * self.dx() + self.dy() * self.dy();
        if len2 < EPSILON {
            return 0.0;
        }
        ((p.0 - self.a.0) * self.dx() + (p.1 - self.a.1) * self.dy()) / len2
    }

    fn at(&self, t: f64) -> FPoint {
        (self.a.0 + t * self.dx(), self.a.1 + t * self.dy())
    }

    /// Orthogonal projection of `p` on the line carrying the segment.
    pub fn project(&self, p: FPoint) -> Option<FPoint> {
        if self.is_degenerate() {
            return None;
        }
        Some(self.at(self.param(p)))
    }

    /// Projects `other` on this segment and clips it to this segment's extent.
    pub fn clip_projection(&self, other: &Segment) -> Option<Segment> {
        if self.is_degenerate() {
            return None;
        }
        let t0 = self.param(other.a).clamp(0.0, 1.0);
        let t1 = self.param(other.b).clamp(0.0, 1.0);
        let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        Some(Segment::new(self.at(t0), self.at(t1)))
    }

    /// The four endpoints ordered along this segment's direction.
    fn ordered_endpoints(&self, other: &Segment) -> [FPoint; 4] {
        let mut points = [self.a, self.b, other.a, other.b];
        points.sort_by_key(|p| OrderedFloat(self.param(*p)));
        points
    }

    /// Shared stretch of two segments lying on the same line.
    ///
    /// Returns None when the segments are more than `MAX_ANGLE_DEGREES` apart,
    /// when their extents (padded by `tolerance`) are disjoint on either axis,
    /// or when `other` lies on average further than `tolerance` from this
    /// segment's line.
    pub fn intersect(&self, other: &Segment, tolerance: f64) -> Option<Segment> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        if self.angle_between(other) > MAX_ANGLE_DEGREES {
            return None;
        }

        let apart = self.right() < other.left() - tolerance
            || self.left() > other.right() + tolerance
            || self.bottom() < other.top() - tolerance
            || self.top() > other.bottom() + tolerance;
        if apart {
            return None;
        }

        let dist_a = distance(other.a, self.project(other.a)?);
        let dist_b = distance(other.b, self.project(other.b)?);
        if (dist_a + dist_b) / 2.0 > tolerance {
            return None;
        }

        let [_, b, c, _] = self.ordered_endpoints(other);
        Some(Segment::new(b, c))
    }

    /// Stitches two segments sharing a stretch of line into one segment
    /// spanning their outer endpoints.
    pub fn union(&self, other: &Segment, tolerance: f64) -> Option<Segment> {
        self.intersect(other, tolerance)?;
        let [a, _, _, d] = self.ordered_endpoints(other);
        Some(Segment::new(a, d))
    }

    /// Unions segments pairwise until no pair unions any further.
    pub fn union_all(segments: Vec<Segment>, tolerance: f64) -> Vec<Segment> {
        let mut segments = segments;
        loop {
            let mut merged = false;
            let mut used = vec![false; segments.len()];
            let mut out = Vec::with_capacity(segments.len());

            for i in 0..segments.len() {
                if used[i] {
                    continue;
                }
                for j in (i + 1)..segments.len() {
                    if used[j] {
                        continue;
                    }
                    if let Some(joined) = segments[i].union(&segments[j], tolerance) {
                        out.push(joined);
                        used[i] = true;
                        used[j] = true;
                        merged = true;
                        break;
                    }
                }
                if !used[i] {
                    out.push(segments[i]);
                }
            }

            segments = out;
            if !merged {
                return segments;
            }
        }
    }
}

impl HasBBox for Segment {
    fn x0(&self) -> f64 {
        self.left()
    }
    fn y0(&self) -> f64 {
        self.top()
    }
    fn x1(&self) -> f64 {
        self.right()
    }
    fn y1(&self) -> f64 {
        self.bottom()
    }
}

/// Summed length of a segment set.
pub fn total_length(segments: &[Segment]) -> f64 {
    segments.iter().map(Segment::length).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: Point, b: Point) -> Segment {
        Segment::from_points(a, b)
    }

    #[test]
    fn intersect_returns_shared_stretch() {
        let s1 = seg((0, 0), (100, 0));
        let s2 = seg((60, 2), (160, 2));
        let inner = s1.intersect(&s2, 10.0).unwrap();
        assert_eq!(inner.a, (60.0, 2.0));
        assert_eq!(inner.b, (100.0, 0.0));
    }

    #[test]
    fn intersect_accepts_opposite_direction() {
        let s1 = seg((0, 0), (0, 100));
        let s2 = seg((1, 80), (1, 20));
        let inner = s1.intersect(&s2, 10.0).unwrap();
        assert!((inner.length() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn intersect_rejects_steep_angle() {
        let s1 = seg((0, 0), (100, 0));
        let s2 = seg((0, 0), (100, 30));
        assert!(s1.intersect(&s2, 10.0).is_none());
    }

    #[test]
    fn intersect_rejects_distant_parallel() {
        let s1 = seg((0, 0), (100, 0));
        let s2 = seg((0, 25), (100, 25));
        assert!(s1.intersect(&s2, 10.0).is_none());
        let s3 = seg((200, 0), (300, 0));
        assert!(s1.intersect(&s3, 10.0).is_none());
    }

    #[test]
    fn intersect_rejects_degenerate() {
        let s1 = seg((5, 5), (5, 5));
        let s2 = seg((0, 5), (10, 5));
        assert!(s1.intersect(&s2, 10.0).is_none());
        assert!(s2.intersect(&s1, 10.0).is_none());
    }

    #[test]
    fn union_spans_outer_endpoints() {
        let s1 = seg((0, 0), (100, 0));
        let s2 = seg((95, 0), (180, 0));
        let joined = s1.union(&s2, 10.0).unwrap();
        assert_eq!(joined.a, (0.0, 0.0));
        assert_eq!(joined.b, (180.0, 0.0));

        let inside = seg((20, 0), (40, 0));
        assert_eq!(s1.union(&inside, 10.0), Some(s1));
    }

    #[test]
    fn union_all_reaches_fixpoint() {
        let parts = vec![
            seg((0, 0), (10, 0)),
            seg((30, 0), (40, 0)),
            seg((8, 0), (32, 0)),
            seg((0, 50), (0, 90)),
        ];
        let merged = Segment::union_all(parts, 1.0);
        assert_eq!(merged.len(), 2);
        assert!((total_length(&merged) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn clip_projection_stays_within_extent() {
        let edge = seg((0, 0), (100, 0));
        let other = seg((-50, 3), (40, 3));
        let clipped = edge.clip_projection(&other).unwrap();
        assert_eq!(clipped.a, (0.0, 0.0));
        assert_eq!(clipped.b, (40.0, 0.0));
    }
}
