//! Panel storage with stable integer ids.
//!
//! Phases that create and discard panels refer to them by `PanelId`, so two
//! geometrically equal panels are never confused with each other.

use crate::layout::elements::Panel;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub usize);

#[derive(Debug, Clone, Default)]
pub struct PanelArena {
    slots: Vec<Option<Panel>>,
    live: usize,
}

impl PanelArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, panel: Panel) -> PanelId {
        let id = PanelId(self.slots.len());
        self.slots.push(Some(panel));
        self.live += 1;
        id
    }

    pub fn remove(&mut self, id: PanelId) -> Option<Panel> {
        let panel = self.slots.get_mut(id.0)?.take()?;
        self.live -= 1;
        Some(panel)
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.get(id).is_some()
    }

    /// Live ids in insertion order.
    pub fn ids(&self) -> Vec<PanelId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| PanelId(i))
            .collect()
    }

    /// Live panels with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &Panel)> + Clone {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (PanelId(i), p)))
    }

    /// Live panels other than `excluded`, cloned.
    pub fn others(&self, excluded: &[PanelId]) -> Vec<Panel> {
        self.iter()
            .filter(|(id, _)| !excluded.contains(id))
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live panels in insertion order.
    pub fn into_panels(self) -> Vec<Panel> {
        self.slots.into_iter().flatten().collect()
    }
}

impl From<Vec<Panel>> for PanelArena {
    fn from(panels: Vec<Panel>) -> Self {
        let live = panels.len();
        Self {
            slots: panels.into_iter().map(Some).collect(),
            live,
        }
    }
}
