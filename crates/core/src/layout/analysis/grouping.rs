//! Small-panel grouping.
//!
//! Speech bubbles and drawings outside any frame show up as scattered small
//! shapes. Shapes close to one another are gathered into one rectangle; the
//! rectangle survives only if the group is no longer small.

use crate::layout::arena::{PanelArena, PanelId};
use crate::layout::elements::Panel;
use crate::layout::page::PageContext;

/// Replaces clusters of close small panels by their bounding rectangle.
///
/// Small panels that end up alone, or in a group that is still small, are
/// dropped. Large panels pass through untouched.
pub fn group_small_panels(panels: Vec<Panel>, ctx: &PageContext) -> Vec<Panel> {
    let mut arena = PanelArena::from(panels);
    let mut pending: Vec<PanelId> = arena
        .iter()
        .filter(|(_, p)| p.is_small(ctx))
        .map(|(id, _)| id)
        .collect();
    let mut groups = Vec::new();

    while !pending.is_empty() {
        let seed = pending.remove(0);
        let Some(mut group) = arena.get(seed).cloned() else {
            continue;
        };
        let mut members = vec![seed];

        loop {
            let before = members.len();
            pending.retain(|&id| match arena.get(id) {
                Some(p) if p.is_close(&group) => {
                    group = group.group_with(p);
                    members.push(id);
                    false
                }
                _ => true,
            });
            if members.len() == before {
                break;
            }
        }

        for id in &members {
            arena.remove(*id);
        }
        if members.len() > 1 && !group.is_small(ctx) {
            tracing::trace!(members = members.len(), rect = ?group.rect(), "grouped small panels");
            groups.push(group);
        }
    }

    let mut panels = arena.into_panels();
    panels.extend(groups);
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SegmentIndex;
    use crate::layout::params::PageParams;

    fn ctx() -> PageContext {
        PageContext::new(1500, 1500, PageParams::default(), SegmentIndex::default())
    }

    #[test]
    fn close_small_panels_form_a_group() {
        let panels = vec![
            Panel::from_rect((0, 0, 500, 500)),
            Panel::from_rect((600, 600, 660, 660)),
            Panel::from_rect((670, 600, 730, 660)),
            Panel::from_rect((740, 600, 800, 660)),
            Panel::from_rect((600, 670, 660, 730)),
        ];
        let out = group_small_panels(panels, &ctx());
        let rects: Vec<_> = out.iter().map(Panel::rect).collect();
        assert_eq!(rects, vec![(0, 0, 500, 500), (600, 600, 800, 730)]);
        assert!(out[1].polygon().is_none());
    }

    #[test]
    fn isolated_small_panels_are_dropped() {
        let panels = vec![
            Panel::from_rect((0, 0, 20, 20)),
            Panel::from_rect((1000, 1000, 1020, 1020)),
        ];
        assert!(group_small_panels(panels, &ctx()).is_empty());
    }
}
