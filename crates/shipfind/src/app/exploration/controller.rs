use std::num::NonZeroUsize;

use engine::{
    CueSink, DiscDesc, DisplayScale, FrameDesc, Hotspot, ModalDesc, Point, Rect, SlotDesc,
    SoundCue, Thumbnail,
};
use tracing::{debug, info};

use super::inventory::{AddOutcome, Inventory};
use super::item::{Item, ItemId};
use super::modal::{ModalController, ModalState};
use super::navigator::SceneNavigator;
use super::profile::{DisplayProfile, Layout, ModalInputPolicy, NavButtonLayout};
use super::scene::Scene;

/// All mutable session state. Owned by the controller; never global.
#[derive(Debug, Clone)]
pub(crate) struct GameState {
    pub(crate) scenes: Vec<Scene>,
    pub(crate) navigator: SceneNavigator,
    pub(crate) inventory: Inventory,
    pub(crate) modal: ModalController,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DispatchOutcome {
    ModalClosed,
    NextScene,
    PrevScene,
    PickedUp { item: ItemId, newly_added: bool },
    Reopened { item: ItemId },
    Swallowed,
    Ignored,
}

#[derive(Debug, Clone)]
pub(crate) struct InteractionController {
    state: GameState,
    profile: DisplayProfile,
    layout: Layout,
    policy: ModalInputPolicy,
    scale: DisplayScale,
    display_size: Option<(u32, u32)>,
    next_button: Hotspot,
    prev_button: Hotspot,
}

impl InteractionController {
    /// Returns `None` for an empty scene list.
    pub(crate) fn new(
        profile: DisplayProfile,
        policy: ModalInputPolicy,
        scenes: Vec<Scene>,
    ) -> Option<Self> {
        let count = NonZeroUsize::new(scenes.len())?;
        let layout = profile.layout();
        let state = GameState {
            scenes,
            navigator: SceneNavigator::new(count),
            inventory: Inventory::new(layout.inventory),
            modal: ModalController::new(layout.modal_panel, layout.close_button()),
        };
        Some(Self {
            state,
            profile,
            layout,
            policy,
            scale: DisplayScale::IDENTITY,
            display_size: None,
            next_button: nav_hotspot(layout.next_button),
            prev_button: nav_hotspot(layout.prev_button),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_modal(mut self, modal: ModalController) -> Self {
        self.state.modal = modal;
        self.state.modal.rescale(self.scale);
        self
    }

    /// Rebuilds the screen furniture from `layout`. Scenes and navigation are kept.
    #[cfg(test)]
    pub(crate) fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self.state.inventory = Inventory::new(layout.inventory);
        self.state.inventory.rescale(self.scale);
        self.state.modal = ModalController::new(layout.modal_panel, layout.close_button());
        self.state.modal.rescale(self.scale);
        self.next_button = nav_hotspot(layout.next_button);
        self.next_button.rescale(self.scale);
        self.prev_button = nav_hotspot(layout.prev_button);
        self.prev_button.rescale(self.scale);
        self
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn scale(&self) -> DisplayScale {
        self.scale
    }

    pub(crate) fn current_scene(&self) -> &Scene {
        &self.state.scenes[self.state.navigator.index()]
    }

    pub(crate) fn find_item(&self, id: ItemId) -> Option<&Item> {
        self.state.scenes.get(id.scene)?.item(id)
    }

    /// Rescales every hotspot when the display size differs from the last
    /// one seen. Zero sizes are ignored.
    pub(crate) fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.display_size == Some((width, height)) {
            return false;
        }
        let Some(scale) =
            DisplayScale::between(self.profile.reference_size(), (width as f32, height as f32))
        else {
            return false;
        };
        self.display_size = Some((width, height));
        self.scale = scale;
        for scene in &mut self.state.scenes {
            scene.rescale(scale);
        }
        self.state.inventory.rescale(scale);
        self.state.modal.rescale(scale);
        self.next_button.rescale(scale);
        self.prev_button.rescale(scale);
        info!(
            width,
            height,
            scale_x = scale.x,
            scale_y = scale.y,
            "display_rescaled"
        );
        true
    }

    pub(crate) fn advance(&mut self) {
        self.state.modal.advance();
    }

    pub(crate) fn next_scene(&mut self) {
        let index = self.state.navigator.next();
        info!(scene = self.state.scenes[index].name(), index, "scene_changed");
    }

    pub(crate) fn prev_scene(&mut self) {
        let index = self.state.navigator.prev();
        info!(scene = self.state.scenes[index].name(), index, "scene_changed");
    }

    /// Resolves one pointer down (display space) in priority order, stopping
    /// at the first match.
    pub(crate) fn handle_pointer_down(
        &mut self,
        point: Point,
        cues: &mut dyn CueSink,
    ) -> DispatchOutcome {
        if self.state.modal.is_visible() && self.state.modal.hits_close_button(point) {
            self.state.modal.close();
            debug!(reason = "close_button", "modal_closing");
            return DispatchOutcome::ModalClosed;
        }

        if self.policy == ModalInputPolicy::Blocking && !self.state.modal.is_closed() {
            if self.state.modal.state() == ModalState::Open {
                self.state.modal.close();
                debug!(reason = "tap_outside", "modal_closing");
                return DispatchOutcome::ModalClosed;
            }
            return DispatchOutcome::Swallowed;
        }

        if self.next_button.contains(point) {
            self.next_scene();
            return DispatchOutcome::NextScene;
        }
        if self.prev_button.contains(point) {
            self.prev_scene();
            return DispatchOutcome::PrevScene;
        }

        if self.state.modal.is_closed() {
            let offset = self.scale.apply(self.layout.scene_offset);
            let local = point.offset_by(-offset.x, -offset.y);
            let scene = &self.state.scenes[self.state.navigator.index()];
            if let Some(item) = scene.hit_test(local) {
                let outcome = self.state.inventory.try_add(item);
                let newly_added = outcome == AddOutcome::Added;
                info!(
                    item = item.name(),
                    description = item.description(),
                    scene = scene.name(),
                    newly_added,
                    inventory_len = self.state.inventory.len(),
                    "item_picked_up"
                );
                if !newly_added {
                    debug!(item = item.name(), reason = ?outcome, "inventory_add_rejected");
                }
                cues.play(SoundCue::Confirm);
                self.state.modal.show(item.id());
                debug!(
                    item = item.name(),
                    images = item.image_paths().len(),
                    "modal_opening"
                );
                return DispatchOutcome::PickedUp {
                    item: item.id(),
                    newly_added,
                };
            }
        }

        if let Some(item) = self.state.inventory.item_at(point) {
            self.state.modal.show(item);
            debug!(scene = item.scene, index = item.index, "modal_reopened_from_inventory");
            return DispatchOutcome::Reopened { item };
        }

        DispatchOutcome::Ignored
    }

    pub(crate) fn frame(&self, show_hotspot_outlines: bool) -> FrameDesc {
        let scene = self.current_scene();
        let offset = self.scale.apply(self.layout.scene_offset);
        let scene_viewport = Rect::new(
            offset.x,
            offset.y,
            self.profile.reference_width * self.scale.x,
            self.profile.reference_height * self.scale.y,
        );

        let inventory_slots = self
            .state
            .inventory
            .slots()
            .map(|(rect, entry)| SlotDesc {
                rect,
                thumbnail: self
                    .find_item(entry.item)
                    .map(|item| item.thumbnail().clone())
                    .unwrap_or_default(),
            })
            .collect();

        let nav_buttons = [self.layout.next_button, self.layout.prev_button]
            .into_iter()
            .map(|button| DiscDesc {
                center: self.scale.apply(button.center),
                radius: button.radius * self.scale.uniform(),
            })
            .collect();

        let modal = self.modal_desc();

        let debug_outlines = if show_hotspot_outlines {
            scene
                .items()
                .iter()
                .filter_map(|item| item.hotspot().bounds())
                .map(|bounds| {
                    let rect = bounds.to_rect();
                    Rect::new(rect.x + offset.x, rect.y + offset.y, rect.width, rect.height)
                })
                .chain(
                    [&self.next_button, &self.prev_button]
                        .into_iter()
                        .filter_map(|button| button.bounds())
                        .map(|bounds| bounds.to_rect()),
                )
                .collect()
        } else {
            Vec::new()
        };

        FrameDesc {
            background: scene.background().cloned(),
            scene_viewport,
            inventory_slots,
            nav_buttons,
            modal,
            debug_outlines,
        }
    }

    fn modal_desc(&self) -> Option<ModalDesc> {
        let modal = &self.state.modal;
        let geometry = modal.geometry();
        if !geometry.visible {
            return None;
        }
        let image = modal
            .current_item()
            .and_then(|id| self.find_item(id))
            .map(|item| item.thumbnail().clone())
            .unwrap_or(Thumbnail::Placeholder);
        Some(ModalDesc {
            rect: geometry.rect,
            opacity: geometry.opacity,
            image,
            close_button: modal.close_button_rect(),
        })
    }
}

fn nav_hotspot(button: NavButtonLayout) -> Hotspot {
    Hotspot::circle(button.center, button.radius)
}
