//! Spatial index over a page's detected segments.

use rstar::{AABB, RTree, RTreeObject};

use crate::geometry::segment::Segment;
use crate::utils::HasBBox;

#[derive(Clone, Debug)]
struct SegmentNode {
    id: usize,
    bbox: (f64, f64, f64, f64),
}

impl RTreeObject for SegmentNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.bbox.0, self.bbox.1], [self.bbox.2, self.bbox.3])
    }
}

/// Read-only set of segments, bulk loaded into an R-tree.
///
/// Segment ids are their positions in the input list and are stable for the
/// lifetime of the index.
#[derive(Clone, Debug)]
pub struct SegmentIndex {
    segments: Vec<Segment>,
    tree: RTree<SegmentNode>,
}

impl Default for SegmentIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SegmentIndex {
    pub fn new(segments: Vec<Segment>) -> Self {
        let nodes = segments
            .iter()
            .enumerate()
            .map(|(id, s)| SegmentNode { id, bbox: s.bbox() })
            .collect();
        Self {
            segments,
            tree: RTree::bulk_load(nodes),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments whose bounding box meets `bbox` grown by `padding` on every
    /// side, in input order.
    pub fn find(&self, bbox: (f64, f64, f64, f64), padding: f64) -> Vec<&Segment> {
        let query = AABB::from_corners(
            [bbox.0 - padding, bbox.1 - padding],
            [bbox.2 + padding, bbox.3 + padding],
        );
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|node| node.id)
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|id| &self.segments[id]).collect()
    }
}
