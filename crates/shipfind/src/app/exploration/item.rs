use engine::{AssetStore, DisplayScale, Hotspot, Point, Shape, Thumbnail};

use crate::app::content::{ContentError, ItemDef};

/// Stable handle to an item: the owning scene's index plus the item's
/// position in that scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ItemId {
    pub(crate) scene: usize,
    pub(crate) index: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Item {
    id: ItemId,
    name: String,
    description: String,
    hotspot: Hotspot,
    image_paths: Vec<String>,
    thumbnail: Thumbnail,
}

impl Item {
    pub(crate) fn new(id: ItemId, name: impl Into<String>, shape: Shape) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            hotspot: Hotspot::new(shape),
            image_paths: Vec::new(),
            thumbnail: Thumbnail::Placeholder,
        }
    }

    pub(crate) fn from_def(
        id: ItemId,
        scene_name: &str,
        def: &ItemDef,
        assets: &mut AssetStore,
    ) -> Result<Self, ContentError> {
        let shape = def.hotspot.to_shape(scene_name, &def.name)?;
        let thumbnail = def
            .images
            .iter()
            .map(|path| assets.image_or_placeholder(path))
            .find(|image| !image.is_placeholder())
            .unwrap_or_default();
        Ok(Self {
            description: def.description.clone(),
            image_paths: def.images.clone(),
            thumbnail,
            ..Self::new(id, def.name.clone(), shape)
        })
    }

    pub(crate) fn id(&self) -> ItemId {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn hotspot(&self) -> &Hotspot {
        &self.hotspot
    }

    pub(crate) fn image_paths(&self) -> &[String] {
        &self.image_paths
    }

    /// First decoded image, or the placeholder when none decoded.
    pub(crate) fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    /// `point` must be in display space.
    pub(crate) fn contains_point(&self, point: Point) -> bool {
        self.hotspot.contains(point)
    }

    pub(crate) fn rescale(&mut self, scale: DisplayScale) {
        self.hotspot.rescale(scale);
    }
}
