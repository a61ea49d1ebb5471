//! Tests for Panel predicates, neighbour queries and merging.

use komawari_core::geometry::{Polygon, SegmentIndex};
use komawari_core::layout::{PageContext, PageParams, Panel, ReadingDirection, Side};

fn p(x: i32, y: i32, r: i32, b: i32) -> Panel {
    Panel::from_rect((x, y, r, b))
}

fn ctx(width: u32, height: u32) -> PageContext {
    PageContext::new(width, height, PageParams::default(), SegmentIndex::default())
}

struct XorShift64(u64);

impl XorShift64 {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: i32) -> i32 {
        (self.next() % n as u64) as i32
    }

    fn rect(&mut self) -> Panel {
        let x = self.below(600);
        let y = self.below(600);
        p(x, y, x + 20 + self.below(300), y + 20 + self.below(300))
    }
}

// ============================================================================
// Construction and size predicates
// ============================================================================

#[test]
fn test_from_xywh_roundtrip() {
    let panel = Panel::from_xywh([10, 20, 300, 400]);
    assert_eq!(panel.rect(), (10, 20, 310, 420));
    assert_eq!(panel.to_xywh(), [10, 20, 300, 400]);
    assert_eq!(panel.area(), 120_000);
}

#[test]
fn test_polygon_bounds_are_kept() {
    let polygon = Polygon::new(vec![(100, 40), (300, 60), (280, 400), (90, 380)]).unwrap();
    let panel = Panel::from_polygon(polygon);
    assert_eq!(panel.rect(), (90, 40, 300, 400));
    assert!(panel.polygon().is_some());
}

#[test]
fn test_small_and_very_small() {
    let ctx = ctx(1500, 3000);
    // thresholds: 100 x 200, very small 10 x 20
    assert!(!p(0, 0, 100, 200).is_small(&ctx));
    assert!(p(0, 0, 99, 200).is_small(&ctx));
    assert!(p(0, 0, 100, 199).is_small(&ctx));
    assert!(!p(0, 0, 10, 20).is_very_small(&ctx));
    assert!(p(0, 0, 9, 500).is_very_small(&ctx));
}

#[test]
fn test_approx_eq_uses_size_tolerance() {
    let a = p(0, 0, 200, 100);
    assert!(a.approx_eq(&p(15, 5, 210, 95)));
    assert!(!a.approx_eq(&p(25, 0, 200, 100)));
}

// ============================================================================
// Neighbours
// ============================================================================

#[test]
fn test_neighbour_requires_shared_row_or_column() {
    let panels = vec![p(0, 0, 100, 100), p(200, 200, 300, 300), p(200, 0, 300, 100)];
    let me = &panels[1];
    assert_eq!(me.find_neighbour(Side::Left, &panels), None);
    assert_eq!(me.find_neighbour(Side::Top, &panels), Some(2));
    assert_eq!(panels[0].find_neighbour(Side::Right, &panels), Some(2));
    assert_eq!(panels[0].find_neighbour(Side::Bottom, &panels), None);
}

#[test]
fn test_neighbour_ties_prefer_first() {
    let panels = vec![p(0, 0, 100, 50), p(0, 60, 100, 100), p(150, 0, 250, 100)];
    assert_eq!(panels[2].find_left_panel(&panels), Some(0));
}

#[test]
fn test_neighbour_skips_self() {
    let panels = vec![p(50, 0, 50, 100)];
    assert_eq!(panels[0].find_left_panel(&panels), None);
}

// ============================================================================
// Ordering comparison
// ============================================================================

#[test]
fn test_reads_before_tolerates_misaligned_rows() {
    // tops differ by less than a tenth of the height
    let left = p(0, 8, 100, 200);
    let right = p(120, 0, 220, 190);
    assert!(left.reads_before(&right, ReadingDirection::Ltr));
    assert!(!right.reads_before(&left, ReadingDirection::Ltr));
    assert!(right.reads_before(&left, ReadingDirection::Rtl));
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_area_monotonic() {
    let mut rng = XorShift64(0x2545_F491_4F6C_DD1D);
    for _ in 0..500 {
        let a = rng.rect();
        let b = rng.rect();
        let obstacles: Vec<Panel> = (0..rng.below(3)).map(|_| rng.rect()).collect();
        let merged = a.merge(&b, &obstacles);
        if merged.rect() != a.rect() {
            assert!(merged.area() >= a.area().max(b.area()));
            assert!(obstacles.iter().all(|o| !merged.overlaps(o)));
        }
    }
}

#[test]
fn test_merge_without_obstacles_covers_both() {
    let mut rng = XorShift64(7);
    for _ in 0..200 {
        let a = rng.rect();
        let b = rng.rect();
        let merged = a.merge(&b, &[]);
        let (x, y, r, bottom) = merged.rect();
        assert!(x <= a.x().min(b.x()) && y <= a.y().min(b.y()));
        assert!(r >= a.r().max(b.r()) && bottom >= a.b().max(b.b()));
    }
}

#[test]
fn test_group_with_is_bounding_union() {
    let grouped = p(0, 0, 10, 10).group_with(&p(30, 40, 50, 60));
    assert_eq!(grouped.rect(), (0, 0, 50, 60));
    assert!(!grouped.is_splittable());
}
