//! Containment merging and small-panel exclusion.

use itertools::Itertools;

use crate::layout::arena::{PanelArena, PanelId};
use crate::layout::elements::Panel;
use crate::layout::page::PageContext;

/// First pair where one panel contains the other, container first.
fn find_containment(arena: &PanelArena) -> Option<(PanelId, PanelId)> {
    arena
        .iter()
        .tuple_combinations()
        .find_map(|((a, pa), (b, pb))| {
            if pa.contains(pb) {
                Some((a, b))
            } else if pb.contains(pa) {
                Some((b, a))
            } else {
                None
            }
        })
}

/// Merges contained panels into their containers until no panel contains
/// another. Returns the number of merges.
///
/// The merged panel takes the container's slot. Every other live panel is an
/// obstacle for the merge.
pub(crate) fn merge_in_arena(arena: &mut PanelArena) -> usize {
    let mut merges = 0;
    while let Some((container, contained)) = find_containment(arena) {
        let obstacles = arena.others(&[container, contained]);
        let merged = match (arena.get(container), arena.get(contained)) {
            (Some(big), Some(small)) => big.merge(small, &obstacles),
            _ => break,
        };
        tracing::trace!(rect = ?merged.rect(), "merged contained panel");
        if let Some(slot) = arena.get_mut(container) {
            *slot = merged;
        }
        arena.remove(contained);
        merges += 1;
    }
    merges
}

/// Replaces every panel containing another by their merge, until stable.
pub fn merge_panels(panels: Vec<Panel>) -> Vec<Panel> {
    let mut arena = PanelArena::from(panels);
    merge_in_arena(&mut arena);
    arena.into_panels()
}

/// Drops panels below the smallness threshold.
pub fn exclude_small_panels(panels: Vec<Panel>, ctx: &PageContext) -> Vec<Panel> {
    panels.into_iter().filter(|p| !p.is_small(ctx)).collect()
}
