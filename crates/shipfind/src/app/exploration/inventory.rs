use engine::{DisplayScale, Point, Rect};

use super::item::{Item, ItemId};
use super::profile::InventoryLayout;

pub(crate) const INVENTORY_CAPACITY: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddOutcome {
    Added,
    Duplicate,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InventoryEntry {
    pub(crate) item: ItemId,
    pub(crate) name: String,
}

/// Ordered, duplicate-free set of collected items. Entries refer to items
/// owned by their scenes; nothing is ever removed.
#[derive(Debug, Clone)]
pub(crate) struct Inventory {
    entries: Vec<InventoryEntry>,
    layout: InventoryLayout,
    scale: DisplayScale,
}

impl Inventory {
    pub(crate) fn new(layout: InventoryLayout) -> Self {
        Self {
            entries: Vec::with_capacity(INVENTORY_CAPACITY),
            layout,
            scale: DisplayScale::IDENTITY,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub(crate) fn try_add(&mut self, item: &Item) -> AddOutcome {
        if self.contains_name(item.name()) {
            return AddOutcome::Duplicate;
        }
        if self.entries.len() >= INVENTORY_CAPACITY {
            return AddOutcome::Full;
        }
        self.entries.push(InventoryEntry {
            item: item.id(),
            name: item.name().to_string(),
        });
        AddOutcome::Added
    }

    /// Returns `true` only when the item was inserted.
    #[cfg(test)]
    pub(crate) fn add(&mut self, item: &Item) -> bool {
        self.try_add(item) == AddOutcome::Added
    }

    pub(crate) fn rescale(&mut self, scale: DisplayScale) {
        self.scale = scale;
    }

    /// Display-space rectangle of slot `index`, whether or not it is filled.
    pub(crate) fn slot_rect(&self, index: usize) -> Rect {
        let layout = self.layout;
        let step = layout.slot_size + layout.spacing;
        let design = Rect::new(
            layout.origin.x,
            layout.origin.y + step * index as f32,
            layout.slot_size,
            layout.slot_size,
        );
        self.scale.apply_rect(design)
    }

    /// Filled slots in order, paired with their display rectangles.
    pub(crate) fn slots(&self) -> impl Iterator<Item = (Rect, &InventoryEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (self.slot_rect(index), entry))
    }

    pub(crate) fn item_at(&self, point: Point) -> Option<ItemId> {
        self.slots()
            .find(|(rect, _)| rect.contains(point))
            .map(|(_, entry)| entry.item)
    }
}
