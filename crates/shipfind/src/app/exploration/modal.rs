use engine::{DisplayScale, Point, Rect};

use super::item::ItemId;

/// Progress change per `advance` call.
pub(crate) const MODAL_STEP: f32 = 0.15;
/// Below this eased scale the modal ignores input.
pub(crate) const MODAL_INTERACTIVE_SCALE: f32 = 0.5;

const EASE_C1: f32 = 1.70158;
const EASE_C3: f32 = EASE_C1 + 1.0;

/// Overshoot-then-settle curve: 0 at 0, 1 at 1, peaks above 1 near the end.
pub(crate) fn ease_out_back(x: f32) -> f32 {
    let t = x - 1.0;
    1.0 + EASE_C3 * t.powi(3) + EASE_C1 * t.powi(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModalState {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ModalGeometry {
    pub(crate) rect: Rect,
    pub(crate) opacity: f32,
    pub(crate) visible: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ModalController {
    state: ModalState,
    progress: f32,
    current_item: Option<ItemId>,
    panel: Rect,
    close_button: Rect,
    scale: DisplayScale,
}

impl ModalController {
    /// `panel` and `close_button` are in design space.
    pub(crate) fn new(panel: Rect, close_button: Rect) -> Self {
        Self {
            state: ModalState::Closed,
            progress: 0.0,
            current_item: None,
            panel,
            close_button,
            scale: DisplayScale::IDENTITY,
        }
    }

    pub(crate) fn state(&self) -> ModalState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn progress(&self) -> f32 {
        self.progress
    }

    pub(crate) fn current_item(&self) -> Option<ItemId> {
        self.current_item
    }

    /// Starts opening with `item`. While already visible this restarts the
    /// animation from zero with the new item.
    pub(crate) fn show(&mut self, item: ItemId) {
        self.state = ModalState::Opening;
        self.progress = 0.0;
        self.current_item = Some(item);
    }

    /// Starts closing from the current progress. No effect unless visible.
    pub(crate) fn close(&mut self) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.state = ModalState::Closing;
        true
    }

    pub(crate) fn advance(&mut self) {
        match self.state {
            ModalState::Opening => {
                self.progress += MODAL_STEP;
                if self.progress >= 1.0 {
                    self.progress = 1.0;
                    self.state = ModalState::Open;
                }
            }
            ModalState::Closing => {
                self.progress -= MODAL_STEP;
                if self.progress <= 0.0 {
                    self.progress = 0.0;
                    self.state = ModalState::Closed;
                    self.current_item = None;
                }
            }
            ModalState::Closed | ModalState::Open => {}
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        matches!(self.state, ModalState::Open | ModalState::Opening)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state == ModalState::Closed
    }

    pub(crate) fn scale_factor(&self) -> f32 {
        if self.is_closed() {
            return 0.0;
        }
        ease_out_back(self.progress)
    }

    pub(crate) fn is_interactive(&self) -> bool {
        self.is_visible() && self.scale_factor() > MODAL_INTERACTIVE_SCALE
    }

    pub(crate) fn rescale(&mut self, scale: DisplayScale) {
        self.scale = scale;
    }

    /// Animated panel in display space. Drawn while opening, open or closing.
    pub(crate) fn geometry(&self) -> ModalGeometry {
        let scale = self.scale_factor();
        ModalGeometry {
            rect: self
                .scale
                .apply_rect(self.panel)
                .scaled_about_center(scale.max(0.0)),
            opacity: scale.clamp(0.0, 1.0),
            visible: !self.is_closed(),
        }
    }

    /// Display-space close button, present only while interactive. It keeps
    /// its offset and size relative to the animated panel.
    pub(crate) fn close_button_rect(&self) -> Option<Rect> {
        if !self.is_interactive() {
            return None;
        }
        let factor = self.scale_factor();
        let panel = self.scale.apply_rect(self.panel);
        let button = self.scale.apply_rect(self.close_button);
        let animated = panel.scaled_about_center(factor);
        Some(Rect::new(
            animated.x + (button.x - panel.x) * factor,
            animated.y + (button.y - panel.y) * factor,
            button.width * factor,
            button.height * factor,
        ))
    }

    pub(crate) fn hits_close_button(&self, point: Point) -> bool {
        self.close_button_rect()
            .is_some_and(|rect| rect.contains(point))
    }
}
