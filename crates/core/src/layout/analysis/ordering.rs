//! Reading order.
//!
//! Panels are first sorted with the approximate `reads_before` comparison.
//! Because that comparison is not transitive, the sorted order is then
//! corrected: a panel must come after its top neighbour and after its
//! neighbour on the leading side of the reading direction.

use crate::layout::elements::Panel;
use crate::layout::params::{PageParams, ReadingDirection};

/// Stable insertion sort on `reads_before`.
///
/// A panel moves ahead of its predecessor only when it reads before it and
/// not the other way round, so ambiguous pairs keep their input order.
pub fn sort_panels(panels: Vec<Panel>, direction: ReadingDirection) -> Vec<Panel> {
    let mut sorted: Vec<Panel> = Vec::with_capacity(panels.len());
    for panel in panels {
        let mut pos = sorted.len();
        while pos > 0
            && panel.reads_before(&sorted[pos - 1], direction)
            && !sorted[pos - 1].reads_before(&panel, direction)
        {
            pos -= 1;
        }
        sorted.insert(pos, panel);
    }
    sorted
}

/// For every panel, the panels that must be read before it.
pub fn reading_constraints(panels: &[Panel], direction: ReadingDirection) -> Vec<Vec<usize>> {
    panels
        .iter()
        .map(|p| {
            let leading = match direction {
                ReadingDirection::Ltr => p.find_left_panel(panels),
                ReadingDirection::Rtl => p.find_right_panel(panels),
            };
            [p.find_top_panel(panels), leading]
                .into_iter()
                .flatten()
                .collect()
        })
        .collect()
}

/// Reorders `order` until every item comes after the items it depends on.
///
/// Each violation moves the offending item right behind the item it depends
/// on and restarts the scan. Returns None when more than `cap` moves are
/// needed, which happens for circular dependencies.
pub fn settle_order(
    mut order: Vec<usize>,
    preceding: &[Vec<usize>],
    cap: usize,
) -> Option<Vec<usize>> {
    let mut moves = 0;
    'scan: loop {
        for i in 0..order.len() {
            let Some(deps) = preceding.get(order[i]) else {
                continue;
            };
            for &dep in deps {
                let Some(pos) = order.iter().position(|&x| x == dep) else {
                    continue;
                };
                if i < pos {
                    if moves >= cap {
                        return None;
                    }
                    moves += 1;
                    let item = order.remove(i);
                    order.insert(pos, item);
                    continue 'scan;
                }
            }
        }
        return Some(order);
    }
}

/// Sorts panels into reading order and corrects the local inconsistencies of
/// the sort.
///
/// If the correction does not settle within the configured cap, the plain
/// sorted order is kept.
pub fn order_panels(panels: Vec<Panel>, params: &PageParams) -> Vec<Panel> {
    let direction = params.reading_direction;
    let sorted = sort_panels(panels, direction);
    let preceding = reading_constraints(&sorted, direction);
    let cap = params.reorder_cap(sorted.len());

    let Some(order) = settle_order((0..sorted.len()).collect(), &preceding, cap) else {
        tracing::warn!(
            panels = sorted.len(),
            cap,
            "reading order did not settle, keeping sorted order"
        );
        return sorted;
    };

    let mut slots: Vec<Option<Panel>> = sorted.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots.get_mut(i).and_then(Option::take))
        .collect()
}
