//! Geometric primitives: segments, polygons and a segment index.

pub mod index;
pub mod polygon;
pub mod segment;

pub use index::SegmentIndex;
pub use polygon::Polygon;
pub use segment::{MAX_ANGLE_DEGREES, Segment, total_length};
