//! The panel entity and its geometric predicates.

use std::cell::OnceCell;
use std::cmp::Reverse;

use smallvec::SmallVec;

use crate::error::{LayoutError, Result};
use crate::geometry::Polygon;
use crate::layout::page::PageContext;
use crate::layout::params::ReadingDirection;
use crate::layout::split;
use crate::layout::types::Side;
use crate::utils::{HasBBox, Rect, Xywh, rect_area, rect_overlap, rect_union};

/// Share of the smaller panel's area above which two panels overlap.
pub const OVERLAP_RATIO: f64 = 0.1;
/// Share of the other panel's area above which a panel contains it.
pub const CONTAIN_RATIO: f64 = 0.5;
/// Centre distance, relative to combined extents, within which small panels
/// are grouped.
pub const CLOSE_RATIO: f64 = 0.75;
/// Multiplier used by `is_very_small`.
pub const VERY_SMALL_MULTIPLIER: f64 = 0.1;

/// An axis-aligned panel rectangle, optionally backed by the outline it was
/// detected from.
#[derive(Debug, Clone)]
pub struct Panel {
    x: i32,
    y: i32,
    r: i32,
    b: i32,
    polygon: Option<Polygon>,
    splittable: bool,
    coverage: OnceCell<f64>,
}

impl Panel {
    /// Builds a panel from a rectangle, a polygon, or both.
    ///
    /// When both are given the rectangle wins and the polygon is kept for
    /// splitting.
    pub fn new(rect: Option<Rect>, polygon: Option<Polygon>) -> Result<Self> {
        match (rect, polygon) {
            (Some(rect), polygon) => {
                let mut panel = Self::from_rect(rect);
                panel.polygon = polygon;
                Ok(panel)
            }
            (None, Some(polygon)) => Ok(Self::from_polygon(polygon)),
            (None, None) => Err(LayoutError::DegenerateGeometry(
                "panel needs a rectangle or a polygon".to_string(),
            )),
        }
    }

    /// Rectangle in (x, y, r, b) form. Swapped edges are reordered.
    pub fn from_rect(rect: Rect) -> Self {
        let (x, r) = if rect.0 <= rect.2 { (rect.0, rect.2) } else { (rect.2, rect.0) };
        let (y, b) = if rect.1 <= rect.3 { (rect.1, rect.3) } else { (rect.3, rect.1) };
        Self {
            x,
            y,
            r,
            b,
            polygon: None,
            splittable: true,
            coverage: OnceCell::new(),
        }
    }

    pub fn from_xywh(xywh: Xywh) -> Self {
        let [x, y, w, h] = xywh;
        Self::from_rect((x, y, x + w, y + h))
    }

    pub fn from_polygon(polygon: Polygon) -> Self {
        let mut panel = Self::from_rect(polygon.bounding_rect());
        panel.polygon = Some(polygon);
        panel
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn b(&self) -> i32 {
        self.b
    }

    pub fn w(&self) -> i32 {
        self.r - self.x
    }

    pub fn h(&self) -> i32 {
        self.b - self.y
    }

    pub fn rect(&self) -> Rect {
        (self.x, self.y, self.r, self.b)
    }

    pub fn to_xywh(&self) -> Xywh {
        [self.x, self.y, self.w(), self.h()]
    }

    pub fn area(&self) -> i64 {
        rect_area(self.rect())
    }

    pub fn polygon(&self) -> Option<&Polygon> {
        self.polygon.as_ref()
    }

    pub fn is_splittable(&self) -> bool {
        self.splittable && self.polygon.is_some()
    }

    pub fn mark_unsplittable(&mut self) {
        self.splittable = false;
    }

    /// Horizontal tolerance, a tenth of the width.
    pub fn wt(&self) -> f64 {
        f64::from(self.w()) / 10.0
    }

    /// Vertical tolerance, a tenth of the height.
    pub fn ht(&self) -> f64 {
        f64::from(self.h()) / 10.0
    }

    pub fn edge(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.x,
            Side::Top => self.y,
            Side::Right => self.r,
            Side::Bottom => self.b,
        }
    }

    /// Moves one edge, clamped so it never crosses the opposite edge.
    pub fn set_edge(&mut self, side: Side, value: i32) {
        match side {
            Side::Left => self.x = value.min(self.r),
            Side::Top => self.y = value.min(self.b),
            Side::Right => self.r = value.max(self.x),
            Side::Bottom => self.b = value.max(self.y),
        }
    }

    /// Equal within this panel's tolerances on every edge.
    pub fn approx_eq(&self, other: &Panel) -> bool {
        let wt = self.wt();
        let ht = self.ht();
        f64::from((self.x - other.x).abs()) < wt
            && f64::from((self.r - other.r).abs()) < wt
            && f64::from((self.y - other.y).abs()) < ht
            && f64::from((self.b - other.b).abs()) < ht
    }

    pub fn overlap(&self, other: &Panel) -> Option<Rect> {
        rect_overlap(self.rect(), other.rect())
    }

    /// True when the overlap exceeds a tenth of the smaller panel's area.
    ///
    /// A zero-area panel overlaps anything it meets.
    pub fn overlaps(&self, other: &Panel) -> bool {
        let Some(o) = self.overlap(other) else {
            return false;
        };
        let smaller = self.area().min(other.area());
        if smaller == 0 {
            return true;
        }
        rect_area(o) as f64 > smaller as f64 * OVERLAP_RATIO
    }

    /// True when the overlap exceeds half of `other`'s area.
    pub fn contains(&self, other: &Panel) -> bool {
        let Some(o) = self.overlap(other) else {
            return false;
        };
        let area = other.area();
        if area == 0 {
            return true;
        }
        rect_area(o) as f64 > area as f64 * CONTAIN_RATIO
    }

    pub fn is_small(&self, ctx: &PageContext) -> bool {
        self.is_small_by(ctx, 1.0)
    }

    pub fn is_very_small(&self, ctx: &PageContext) -> bool {
        self.is_small_by(ctx, VERY_SMALL_MULTIPLIER)
    }

    pub fn is_small_by(&self, ctx: &PageContext, multiplier: f64) -> bool {
        f64::from(self.w()) < ctx.min_width(multiplier)
            || f64::from(self.h()) < ctx.min_height(multiplier)
    }

    /// Centres are within three quarters of the combined extents on each axis.
    pub fn is_close(&self, other: &Panel) -> bool {
        let c1x = f64::from(self.x + self.r) / 2.0;
        let c1y = f64::from(self.y + self.b) / 2.0;
        let c2x = f64::from(other.x + other.r) / 2.0;
        let c2y = f64::from(other.y + other.b) / 2.0;
        (c1x - c2x).abs() <= f64::from(self.w() + other.w()) * CLOSE_RATIO
            && (c1y - c2y).abs() <= f64::from(self.h() + other.h()) * CLOSE_RATIO
    }

    /// Vertical ranges overlap.
    pub fn same_row(&self, other: &Panel) -> bool {
        (other.y <= self.y && self.y <= other.b) || (self.y <= other.y && other.y <= self.b)
    }

    /// Horizontal ranges overlap.
    pub fn same_col(&self, other: &Panel) -> bool {
        (other.x <= self.x && self.x <= other.r) || (self.x <= other.x && other.x <= self.r)
    }

    /// Index of the nearest panel on `side`, sharing a row or column.
    ///
    /// `self` is skipped if present in `panels`. Among equally near
    /// candidates the first one wins.
    pub fn find_neighbour(&self, side: Side, panels: &[Panel]) -> Option<usize> {
        let candidates = panels
            .iter()
            .enumerate()
            .filter(|(_, p)| !std::ptr::eq(*p, self));
        match side {
            Side::Left => candidates
                .filter(|(_, p)| p.r <= self.x && p.same_row(self))
                .min_by_key(|(_, p)| Reverse(p.r)),
            Side::Top => candidates
                .filter(|(_, p)| p.b <= self.y && p.same_col(self))
                .min_by_key(|(_, p)| Reverse(p.b)),
            Side::Right => candidates
                .filter(|(_, p)| p.x >= self.r && p.same_row(self))
                .min_by_key(|(_, p)| p.x),
            Side::Bottom => candidates
                .filter(|(_, p)| p.y >= self.b && p.same_col(self))
                .min_by_key(|(_, p)| p.y),
        }
        .map(|(i, _)| i)
    }

    pub fn find_left_panel(&self, panels: &[Panel]) -> Option<usize> {
        self.find_neighbour(Side::Left, panels)
    }

    pub fn find_top_panel(&self, panels: &[Panel]) -> Option<usize> {
        self.find_neighbour(Side::Top, panels)
    }

    pub fn find_right_panel(&self, panels: &[Panel]) -> Option<usize> {
        self.find_neighbour(Side::Right, panels)
    }

    pub fn find_bottom_panel(&self, panels: &[Panel]) -> Option<usize> {
        self.find_neighbour(Side::Bottom, panels)
    }

    /// Approximate reading order comparison.
    ///
    /// Rows come first, tolerant by this panel's height tolerance; within a
    /// row the reading direction decides. Not transitive: ambiguous pairs
    /// (heavily overlapping panels) compare as "before" both ways.
    pub fn reads_before(&self, other: &Panel, direction: ReadingDirection) -> bool {
        let wt = self.wt();
        let ht = self.ht();
        let (sx, sy, sr, sb) = self.bbox();
        let (ox, oy, or, ob) = other.bbox();

        if oy >= sb - ht && oy >= sy - ht {
            return true;
        }
        if sy >= ob - ht && sy >= oy - ht {
            return false;
        }
        if ox >= sr - wt && ox >= sx - wt {
            return direction == ReadingDirection::Ltr;
        }
        if sx >= or - wt && sx >= ox - wt {
            return direction == ReadingDirection::Rtl;
        }
        true
    }

    /// Bounding rectangle of both panels, without polygon.
    pub fn group_with(&self, other: &Panel) -> Panel {
        let mut grouped = Panel::from_rect(rect_union(self.rect(), other.rect()));
        grouped.splittable = false;
        grouped
    }

    /// Grows this panel toward `other` without bumping into `obstacles`.
    ///
    /// Every combination of the sides on which `other` sticks out is a
    /// candidate. A candidate is rejected when it overlaps an obstacle or
    /// covers less than the larger of both panels. The largest remaining
    /// candidate wins; when none remains this panel is returned unchanged.
    pub fn merge(&self, other: &Panel, obstacles: &[Panel]) -> Panel {
        let mut candidates: SmallVec<[Rect; 16]> = SmallVec::new();
        candidates.push(self.rect());
        for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
            let sticks_out = match side {
                Side::Left | Side::Top => other.edge(side) < self.edge(side),
                Side::Right | Side::Bottom => other.edge(side) > self.edge(side),
            };
            if !sticks_out {
                continue;
            }
            let grown: SmallVec<[Rect; 8]> = candidates
                .iter()
                .map(|&(x, y, r, b)| match side {
                    Side::Left => (other.x, y, r, b),
                    Side::Top => (x, other.y, r, b),
                    Side::Right => (x, y, other.r, b),
                    Side::Bottom => (x, y, r, other.b),
                })
                .collect();
            candidates.extend(grown);
        }

        let floor = self.area().max(other.area());
        let mut best: Option<Panel> = None;
        for rect in candidates.into_iter().skip(1) {
            let candidate = Panel::from_rect(rect);
            if candidate.area() < floor {
                continue;
            }
            if obstacles.iter().any(|o| candidate.overlaps(o)) {
                tracing::trace!(?rect, "merge candidate bumps into another panel");
                continue;
            }
            if best.as_ref().is_none_or(|b| candidate.area() > b.area()) {
                best = Some(candidate);
            }
        }

        match best {
            Some(mut merged) if merged.rect() != self.rect() => {
                merged.splittable = false;
                merged
            }
            _ => self.clone(),
        }
    }

    /// Share of the outline corroborated by detected segments, cached.
    pub fn coverage(&self, ctx: &PageContext) -> f64 {
        *self
            .coverage
            .get_or_init(|| split::segments_coverage(self, ctx))
    }
}

impl HasBBox for Panel {
    fn x0(&self) -> f64 {
        f64::from(self.x)
    }
    fn y0(&self) -> f64 {
        f64::from(self.y)
    }
    fn x1(&self) -> f64 {
        f64::from(self.r)
    }
    fn y1(&self) -> f64 {
        f64::from(self.b)
    }
}
