//! Closed shape outlines produced by contour detection.

use geo::{ConvexHull, EuclideanLength, LineString};

use crate::error::{LayoutError, Result};
use crate::geometry::segment::Segment;
use crate::utils::{Point, Rect, bounding_rect, round_point};

/// A cyclic sequence of at least three points; the last point connects
/// back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    bounds: Rect,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 3 {
            return Err(LayoutError::DegenerateGeometry(format!(
                "polygon with {} points",
                points.len()
            )));
        }
        let bounds = bounding_rect(&points).ok_or_else(|| {
            LayoutError::DegenerateGeometry("polygon without points".to_string())
        })?;
        Ok(Self { points, bounds })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding rectangle, computed once at construction.
    pub fn bounding_rect(&self) -> Rect {
        self.bounds
    }

    /// Edges in order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Inserts points along long edges so consecutive points are at most
    /// `step` apart. Inserted points are rounded to the pixel grid.
    pub fn resample(&self, step: f64) -> Polygon {
        let step = step.max(1.0);
        let mut points = Vec::with_capacity(self.points.len());
        for (a, b) in self.edges() {
            let edge = Segment::from_points(a, b);
            let pieces = (edge.length() / step).ceil().max(1.0) as usize;
            for k in 0..pieces {
                let t = k as f64 / pieces as f64;
                let p = round_point((edge.a.0 + t * edge.dx(), edge.a.1 + t * edge.dy()));
                if points.last() != Some(&p) {
                    points.push(p);
                }
            }
        }
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return self.clone();
        }
        let bounds = bounding_rect(&points).unwrap_or(self.bounds);
        Polygon { points, bounds }
    }

    /// Cuts the outline between points `i` and `j` (i < j).
    ///
    /// The first part keeps points `0..=i` followed by `j+1..`, the second
    /// part is `i+1..=j`. Either part may be degenerate.
    pub fn cut(&self, i: usize, j: usize) -> (Result<Polygon>, Result<Polygon>) {
        let mut first: Vec<Point> = self.points[..=i].to_vec();
        first.extend_from_slice(&self.points[j + 1..]);
        let second = self.points[i + 1..=j].to_vec();
        (Polygon::new(first), Polygon::new(second))
    }

    /// Convex hull edges and perimeter.
    ///
    /// Returns no edges when every point is the same.
    pub fn convex_hull(&self) -> (Vec<Segment>, f64) {
        let line: LineString<f64> = self
            .points
            .iter()
            .map(|p| (f64::from(p.0), f64::from(p.1)))
            .collect::<Vec<_>>()
            .into();
        let hull = line.convex_hull();
        let perimeter = hull.exterior().euclidean_length();
        let edges = hull
            .exterior()
            .lines()
            .map(|l| Segment::new((l.start.x, l.start.y), (l.end.x, l.end.y)))
            .filter(|s| !s.is_degenerate())
            .collect();
        (edges, perimeter)
    }
}
