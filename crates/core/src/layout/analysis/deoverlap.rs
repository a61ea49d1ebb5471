//! Overlap removal between neighbouring panels.

use crate::layout::elements::Panel;
use crate::layout::types::Side;

/// Moves shared boundaries so overlapping neighbours only touch.
///
/// An overlap no wider than it is tall splits the boundary vertically,
/// otherwise horizontally. The panel whose far edge bounds the overlap on
/// that axis is cut back to the overlap's near edge and the other one starts
/// at the overlap's far edge. Edges only move inward, so a pair separated
/// here stays separated.
pub fn deoverlap_panels(mut panels: Vec<Panel>) -> Vec<Panel> {
    let n = panels.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let Some((ox, oy, or, ob)) = panels[i].overlap(&panels[j]) else {
                continue;
            };
            let (ow, oh) = (or - ox, ob - oy);

            if ow <= oh {
                let (near, far) = if panels[i].r() <= panels[j].r() { (i, j) } else { (j, i) };
                panels[near].set_edge(Side::Right, ox);
                panels[far].set_edge(Side::Left, or);
            } else {
                let (near, far) = if panels[i].b() <= panels[j].b() { (i, j) } else { (j, i) };
                panels[near].set_edge(Side::Bottom, oy);
                panels[far].set_edge(Side::Top, ob);
            }
        }
    }
    panels
}
