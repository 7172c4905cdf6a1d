use engine::{CueSink, FrameDesc, InputAction, InputSnapshot, Screen, ScreenCommand};
use tracing::info;

use super::controller::InteractionController;
use super::inventory::INVENTORY_CAPACITY;

pub(crate) struct ExplorationScreen {
    controller: InteractionController,
    show_hotspot_outlines: bool,
}

impl ExplorationScreen {
    pub(crate) fn new(controller: InteractionController) -> Self {
        Self {
            controller,
            show_hotspot_outlines: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn controller(&self) -> &InteractionController {
        &self.controller
    }

    fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::NextScene => self.controller.next_scene(),
            InputAction::PrevScene => self.controller.prev_scene(),
            InputAction::ToggleHotspotOverlay => {
                self.show_hotspot_outlines = !self.show_hotspot_outlines;
                info!(
                    show_hotspot_outlines = self.show_hotspot_outlines,
                    "hotspot_overlay_toggled"
                );
            }
            InputAction::Quit => {}
        }
    }
}

impl Screen for ExplorationScreen {
    fn resize(&mut self, width: u32, height: u32) {
        self.controller.resize(width, height);
    }

    fn update(&mut self, input: &InputSnapshot, cues: &mut dyn CueSink) -> ScreenCommand {
        if input.quit_requested() {
            return ScreenCommand::Quit;
        }

        let (width, height) = input.window_size();
        self.controller.resize(width, height);
        self.controller.advance();

        for point in input.pointer_downs() {
            self.controller.handle_pointer_down(*point, cues);
        }
        for action in input.pressed_actions() {
            self.handle_action(action);
        }

        ScreenCommand::None
    }

    fn frame(&self) -> FrameDesc {
        self.controller.frame(self.show_hotspot_outlines)
    }

    fn title(&self) -> Option<String> {
        let state = self.controller.state();
        Some(format!(
            "Shipfind - {} ({}/{}) - inventory {}/{}",
            self.controller.current_scene().name(),
            state.navigator.index() + 1,
            state.navigator.count(),
            state.inventory.len(),
            INVENTORY_CAPACITY
        ))
    }
}
