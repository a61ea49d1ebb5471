//! Polygon splitting validated by line segment coverage.
//!
//! A detected outline often wraps several panels joined by a thin bridge
//! (a speech bubble or a drawing crossing the gutter). Two far-apart stretches
//! of the outline that come close to each other mark such a bridge; cutting
//! there yields two candidate panels, which are kept only if detected straight
//! lines still support their boundaries.

use std::borrow::Cow;

use crate::geometry::{Polygon, Segment, total_length};
use crate::layout::elements::Panel;
use crate::layout::page::PageContext;
use crate::utils::{EPSILON, HasBBox, distance, to_fpoint};

/// How much worse than its parent a child's coverage may be.
pub const COVERAGE_SLACK: f64 = 0.10;

/// Share of the panel outline's convex hull that detected segments run along.
///
/// Returns 0 for degenerate hulls.
pub fn segments_coverage(panel: &Panel, ctx: &PageContext) -> f64 {
    let polygon = match panel.polygon() {
        Some(polygon) => Cow::Borrowed(polygon),
        None => {
            let (x, y, r, b) = panel.rect();
            match Polygon::new(vec![(x, y), (r, y), (r, b), (x, b)]) {
                Ok(polygon) => Cow::Owned(polygon),
                Err(_) => return 0.0,
            }
        }
    };

    let (hull, perimeter) = polygon.convex_hull();
    if perimeter < EPSILON {
        return 0.0;
    }

    let tolerance = ctx.params.segment_tolerance;
    let mut matched = Vec::new();
    for edge in &hull {
        for segment in ctx.segments.find(edge.bbox(), tolerance) {
            let Some(shared) = edge.intersect(segment, tolerance) else {
                continue;
            };
            if let Some(clipped) = edge.clip_projection(&shared)
                && !clipped.is_degenerate()
            {
                matched.push(clipped);
            }
        }
    }

    let matched = Segment::union_all(matched, tolerance);
    (total_length(&matched) / perimeter).min(1.0)
}

/// Tries to cut a polygon-backed panel in two.
///
/// Candidates come from pairs of resampled outline points that are close in
/// space but far apart along the outline. A candidate is dropped when either
/// side is degenerate or small, equals the parent, overlaps its sibling, or
/// loses more than `COVERAGE_SLACK` coverage. The pair with the highest
/// combined coverage wins, the first one on ties.
pub fn split(panel: &Panel, ctx: &PageContext) -> Option<(Panel, Panel)> {
    let polygon = panel.polygon()?;
    if panel.is_small(ctx) {
        return None;
    }

    let reach = f64::from(panel.w().max(panel.h())) * ctx.params.min_panel_size_ratio * 2.0;
    let dense = polygon.resample(reach / 2.0);
    let points = dense.points();
    let n = points.len();
    let min_separation = n.div_ceil(4);
    let parent_coverage = panel.coverage(ctx);

    let mut best: Option<(f64, Panel, Panel)> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            let separation = (j - i).min(n - (j - i));
            if separation < min_separation {
                continue;
            }
            if distance(to_fpoint(points[i]), to_fpoint(points[j])) >= reach {
                continue;
            }

            let (Ok(first), Ok(second)) = dense.cut(i, j) else {
                continue;
            };
            let first = Panel::from_polygon(first);
            let second = Panel::from_polygon(second);
            if first.is_small(ctx) || second.is_small(ctx) {
                continue;
            }
            if first.rect() == panel.rect() || second.rect() == panel.rect() {
                continue;
            }
            if first.overlaps(&second) {
                continue;
            }

            let c1 = first.coverage(ctx);
            let c2 = second.coverage(ctx);
            if c1 < parent_coverage - COVERAGE_SLACK || c2 < parent_coverage - COVERAGE_SLACK {
                continue;
            }

            let combined = c1 + c2;
            tracing::trace!(
                i,
                j,
                combined,
                first = ?first.rect(),
                second = ?second.rect(),
                "split candidate"
            );
            if best.as_ref().is_none_or(|(score, _, _)| combined > *score) {
                best = Some((combined, first, second));
            }
        }
    }

    best.map(|(_, first, second)| (first, second))
}
