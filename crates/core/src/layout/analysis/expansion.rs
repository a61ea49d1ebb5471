//! Gutter inference and panel expansion.

use crate::layout::elements::Panel;
use crate::layout::types::{Gutters, Side};

/// Smallest gaps between a panel and its left and top neighbours.
///
/// An axis without any neighbour pair gets a 1 pixel gutter.
pub fn actual_gutters(panels: &[Panel]) -> Gutters {
    let mut gx: Option<i32> = None;
    let mut gy: Option<i32> = None;
    for p in panels {
        if let Some(k) = p.find_left_panel(panels) {
            let gap = p.x() - panels[k].r();
            gx = Some(gx.map_or(gap, |g| g.min(gap)));
        }
        if let Some(k) = p.find_top_panel(panels) {
            let gap = p.y() - panels[k].b();
            gy = Some(gy.map_or(gap, |g| g.min(gap)));
        }
    }
    let defaults = Gutters::default();
    Gutters {
        x: gx.unwrap_or(defaults.x),
        y: gy.unwrap_or(defaults.y),
    }
}

/// Outermost coordinate of all panels on `side`.
fn frame_edge(panels: &[Panel], side: Side) -> Option<i32> {
    let edges = panels.iter().map(|p| p.edge(side));
    if side.is_leading() {
        edges.min()
    } else {
        edges.max()
    }
}

/// Grows every edge up to the neighbouring panel minus the gutter, or to the
/// frame formed by all panels when there is no neighbour.
///
/// Panels are processed in list order and see the already expanded geometry
/// of the panels before them. Edges only ever move outward.
pub fn expand_panels(mut panels: Vec<Panel>, gutters: Gutters) -> Vec<Panel> {
    for i in 0..panels.len() {
        for side in Side::ALL {
            let panel = &panels[i];
            let target = match panel.find_neighbour(side, &panels) {
                Some(k) => {
                    let neighbour_edge = panels[k].edge(side.opposite());
                    if side.is_leading() {
                        neighbour_edge + gutters.along(side)
                    } else {
                        neighbour_edge - gutters.along(side)
                    }
                }
                None => match frame_edge(&panels, side) {
                    Some(edge) => edge,
                    None => continue,
                },
            };

            let current = panel.edge(side);
            let outward = if side.is_leading() {
                target < current
            } else {
                target > current
            };
            if outward {
                panels[i].set_edge(side, target);
            }
        }
    }
    panels
}
