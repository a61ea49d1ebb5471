//! Split phase driver.

use std::cmp::Reverse;

use crate::layout::analysis::merging::merge_in_arena;
use crate::layout::arena::PanelArena;
use crate::layout::elements::Panel;
use crate::layout::page::PageContext;
use crate::layout::split::split;
use crate::utils::EPSILON;

/// Upper bound on successful splits for one page.
pub fn split_cap(ctx: &PageContext) -> usize {
    let ratio = ctx.params.min_panel_size_ratio;
    (1.0 / (ratio * ratio) - EPSILON).ceil() as usize
}

/// Splits panels, largest first, until none splits any further.
///
/// Contained panels are merged before every attempt. A panel that fails to
/// split is not tried again; the two halves of a successful split are.
pub fn split_panels(panels: Vec<Panel>, ctx: &PageContext) -> Vec<Panel> {
    let mut arena = PanelArena::from(panels);
    let cap = split_cap(ctx);
    let mut splits = 0;

    loop {
        merge_in_arena(&mut arena);
        if splits >= cap {
            tracing::debug!(splits, "split limit reached");
            break;
        }

        let mut candidates: Vec<_> = arena
            .iter()
            .filter(|(_, p)| p.is_splittable())
            .map(|(id, p)| (id, p.area()))
            .collect();
        candidates.sort_by_key(|&(_, area)| Reverse(area));

        let mut split_one = false;
        for (id, _) in candidates {
            let outcome = match arena.get(id) {
                Some(panel) => split(panel, ctx),
                None => continue,
            };
            match outcome {
                Some((first, second)) => {
                    tracing::trace!(
                        first = ?first.rect(),
                        second = ?second.rect(),
                        "split panel"
                    );
                    arena.remove(id);
                    arena.insert(first);
                    arena.insert(second);
                    splits += 1;
                    split_one = true;
                    break;
                }
                None => {
                    if let Some(panel) = arena.get_mut(id) {
                        panel.mark_unsplittable();
                    }
                }
            }
        }

        if !split_one {
            break;
        }
    }

    arena.into_panels()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SegmentIndex;
    use crate::layout::params::{PageParams, ReadingDirection};

    #[test]
    fn cap_follows_ratio() {
        let ctx = PageContext::new(100, 100, PageParams::default(), SegmentIndex::default());
        assert_eq!(split_cap(&ctx), 225);
        let params = PageParams::new(0.5, ReadingDirection::Ltr).unwrap();
        let ctx = PageContext::new(100, 100, params, SegmentIndex::default());
        assert_eq!(split_cap(&ctx), 4);
    }

    #[test]
    fn rectangles_pass_through() {
        let ctx = PageContext::new(800, 600, PageParams::default(), SegmentIndex::default());
        let panels = vec![
            Panel::from_rect((10, 10, 390, 290)),
            Panel::from_rect((410, 10, 790, 290)),
        ];
        let out = split_panels(panels, &ctx);
        assert_eq!(out.len(), 2);
    }
}
