use engine::{AssetStore, DisplayScale, ImageHandle, Point};

use crate::app::content::{ContentError, SceneDef};

use super::item::{Item, ItemId};

#[derive(Debug, Clone)]
pub(crate) struct Scene {
    index: usize,
    name: String,
    background_path: Option<String>,
    background: Option<ImageHandle>,
    items: Vec<Item>,
}

impl Scene {
    pub(crate) fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            background_path: None,
            background: None,
            items: Vec::new(),
        }
    }

    pub(crate) fn from_def(
        index: usize,
        def: &SceneDef,
        assets: &mut AssetStore,
    ) -> Result<Self, ContentError> {
        let mut scene = Scene::new(index, def.name.clone());
        if let Some(path) = &def.background {
            scene.background = assets.image_or_placeholder(path).image().cloned();
            scene.background_path = Some(path.clone());
        }
        for item_def in &def.items {
            let id = scene.next_item_id();
            let item = Item::from_def(id, &def.name, item_def, assets)?;
            scene.add(item);
        }
        Ok(scene)
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn background_path(&self) -> Option<&str> {
        self.background_path.as_deref()
    }

    pub(crate) fn background(&self) -> Option<&ImageHandle> {
        self.background.as_ref()
    }

    pub(crate) fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn item(&self, id: ItemId) -> Option<&Item> {
        if id.scene != self.index {
            return None;
        }
        self.items.get(id.index)
    }

    pub(crate) fn next_item_id(&self) -> ItemId {
        ItemId {
            scene: self.index,
            index: self.items.len(),
        }
    }

    /// Appends without deduplication; insertion order is hit-test priority.
    pub(crate) fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// First item, in insertion order, whose hotspot contains `point`.
    pub(crate) fn hit_test(&self, point: Point) -> Option<&Item> {
        self.items.iter().find(|item| item.contains_point(point))
    }

    pub(crate) fn rescale(&mut self, scale: DisplayScale) {
        for item in &mut self.items {
            item.rescale(scale);
        }
    }
}
