mod controller;
mod inventory;
mod item;
mod modal;
mod navigator;
mod profile;
mod scene;
mod screen;

use engine::AssetStore;
use tracing::info;

use crate::app::content::{ContentError, ContentTable};

pub(crate) use controller::InteractionController;
pub(crate) use profile::{DisplayProfile, ModalInputPolicy};
pub(crate) use scene::Scene;
pub(crate) use screen::ExplorationScreen;

pub(crate) fn build_scenes(
    table: &ContentTable,
    assets: &mut AssetStore,
) -> Result<Vec<Scene>, ContentError> {
    let scenes = table
        .scenes
        .iter()
        .enumerate()
        .map(|(index, def)| Scene::from_def(index, def, assets))
        .collect::<Result<Vec<_>, _>>()?;
    for scene in &scenes {
        info!(
            scene = scene.name(),
            items = scene.items().len(),
            background = scene.background_path().unwrap_or("none"),
            has_background = scene.background().is_some(),
            "scene_loaded"
        );
    }
    Ok(scenes)
}

#[cfg(test)]
mod tests;
