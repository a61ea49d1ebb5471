//! Tests for reading order: approximate sort plus neighbour-driven correction.

use komawari_core::layout::analysis::{
    order_panels, reading_constraints, settle_order, sort_panels,
};
use komawari_core::layout::{PageParams, Panel, ReadingDirection};

fn p(x: i32, y: i32, r: i32, b: i32) -> Panel {
    Panel::from_rect((x, y, r, b))
}

fn rects(panels: &[Panel]) -> Vec<(i32, i32, i32, i32)> {
    panels.iter().map(Panel::rect).collect()
}

fn params(direction: ReadingDirection) -> PageParams {
    PageParams {
        reading_direction: direction,
        ..PageParams::default()
    }
}

// ============================================================================
// Stair layout: the plain sort misplaces the middle panel
// ============================================================================

fn stair() -> Vec<Panel> {
    vec![
        p(0, 0, 100, 100),
        p(110, 95, 210, 200),
        p(220, 0, 320, 100),
    ]
}

#[test]
fn test_plain_sort_misorders_stair() {
    let sorted = sort_panels(stair(), ReadingDirection::Ltr);
    assert_eq!(
        rects(&sorted),
        vec![(0, 0, 100, 100), (220, 0, 320, 100), (110, 95, 210, 200)]
    );
}

#[test]
fn test_correction_fixes_stair() {
    let ordered = order_panels(stair(), &params(ReadingDirection::Ltr));
    assert_eq!(
        rects(&ordered),
        vec![(0, 0, 100, 100), (110, 95, 210, 200), (220, 0, 320, 100)]
    );
}

#[test]
fn test_constraints_of_stair() {
    let sorted = sort_panels(stair(), ReadingDirection::Ltr);
    let preceding = reading_constraints(&sorted, ReadingDirection::Ltr);
    // the right column must follow the middle step, which follows the first
    assert_eq!(preceding, vec![vec![], vec![2], vec![0]]);
}

// ============================================================================
// Termination
// ============================================================================

#[test]
fn test_pinwheel_terminates_with_permutation() {
    let pinwheel = vec![
        p(0, 0, 200, 100),
        p(210, 0, 300, 200),
        p(100, 210, 300, 300),
        p(0, 110, 90, 300),
        p(100, 110, 200, 200),
    ];
    for direction in [ReadingDirection::Ltr, ReadingDirection::Rtl] {
        let ordered = order_panels(pinwheel.clone(), &params(direction));
        let mut got = rects(&ordered);
        let mut expected = rects(&pinwheel);
        got.sort();
        expected.sort();
        assert_eq!(got, expected);
    }
}

#[test]
fn test_cycle_hits_cap_and_keeps_sorted_order() {
    let preceding = vec![vec![2], vec![0], vec![1]];
    assert_eq!(settle_order(vec![0, 1, 2], &preceding, 100), None);
}

#[test]
fn test_zero_cap_returns_sorted_order() {
    let params = PageParams {
        max_reorder_passes: Some(0),
        ..PageParams::default()
    };
    let ordered = order_panels(stair(), &params);
    assert_eq!(
        rects(&ordered),
        vec![(0, 0, 100, 100), (220, 0, 320, 100), (110, 95, 210, 200)]
    );
}

#[test]
fn test_acyclic_chain_settles() {
    // each item depends on the next one
    let n = 12;
    let preceding: Vec<Vec<usize>> = (0..n)
        .map(|i| if i + 1 < n { vec![i + 1] } else { vec![] })
        .collect();
    let order = settle_order((0..n).collect(), &preceding, 2 * n * n + 8).unwrap();
    assert_eq!(order, (0..n).rev().collect::<Vec<_>>());
}

// ============================================================================
// Directions
// ============================================================================

#[test]
fn test_single_row_follows_direction() {
    let row = vec![p(0, 0, 100, 100), p(120, 0, 220, 100), p(240, 0, 340, 100)];
    let ltr = order_panels(row.clone(), &params(ReadingDirection::Ltr));
    assert_eq!(ltr[0].x(), 0);
    assert_eq!(ltr[2].x(), 240);
    let rtl = order_panels(row, &params(ReadingDirection::Rtl));
    assert_eq!(rtl[0].x(), 240);
    assert_eq!(rtl[2].x(), 0);
}

#[test]
fn test_tall_left_panel_reads_first() {
    let layout = vec![
        p(200, 0, 400, 100),
        p(200, 110, 400, 200),
        p(0, 0, 190, 200),
    ];
    let ordered = order_panels(layout, &params(ReadingDirection::Ltr));
    assert_eq!(
        rects(&ordered),
        vec![(0, 0, 190, 200), (200, 0, 400, 100), (200, 110, 400, 200)]
    );
}
