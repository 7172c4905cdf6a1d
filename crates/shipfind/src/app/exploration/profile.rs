use engine::{Point, Rect};

use crate::app::content::ContentError;

/// Reference resolution hotspots and layout are authored in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DisplayProfile {
    pub(crate) reference_width: f32,
    pub(crate) reference_height: f32,
    pub(crate) is_compact: bool,
}

impl DisplayProfile {
    pub(crate) const DESKTOP: DisplayProfile = DisplayProfile {
        reference_width: 1400.0,
        reference_height: 700.0,
        is_compact: false,
    };

    pub(crate) const COMPACT: DisplayProfile = DisplayProfile {
        reference_width: 360.0,
        reference_height: 640.0,
        is_compact: true,
    };

    pub(crate) fn from_name(name: &str) -> Result<DisplayProfile, ContentError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(DisplayProfile::DESKTOP),
            "compact" => Ok(DisplayProfile::COMPACT),
            _ => Err(ContentError::UnknownProfile {
                name: name.to_string(),
            }),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        if self.is_compact {
            "compact"
        } else {
            "desktop"
        }
    }

    pub(crate) fn reference_size(&self) -> (f32, f32) {
        (self.reference_width, self.reference_height)
    }

    pub(crate) fn default_modal_policy(&self) -> ModalInputPolicy {
        if self.is_compact {
            ModalInputPolicy::Blocking
        } else {
            ModalInputPolicy::PassThrough
        }
    }

    pub(crate) fn layout(&self) -> Layout {
        if self.is_compact {
            Layout {
                inventory: InventoryLayout {
                    origin: Point::new(10.0, 10.0),
                    slot_size: 40.0,
                    spacing: 5.0,
                },
                modal_panel: Rect::new(30.0, 120.0, 300.0, 400.0),
                close_button_size: 24.0,
                close_button_inset: 10.0,
                next_button: NavButtonLayout {
                    center: Point::new(320.0, 320.0),
                    radius: 15.0,
                },
                prev_button: NavButtonLayout {
                    center: Point::new(320.0, 270.0),
                    radius: 15.0,
                },
                scene_offset: Point::new(0.0, 0.0),
            }
        } else {
            Layout {
                inventory: InventoryLayout {
                    origin: Point::new(20.0, 40.0),
                    slot_size: 60.0,
                    spacing: 5.0,
                },
                modal_panel: Rect::new(300.0, 50.0, 800.0, 600.0),
                close_button_size: 30.0,
                close_button_inset: 10.0,
                next_button: NavButtonLayout {
                    center: Point::new(1340.0, 350.0),
                    radius: 25.0,
                },
                prev_button: NavButtonLayout {
                    center: Point::new(1340.0, 270.0),
                    radius: 25.0,
                },
                scene_offset: Point::new(0.0, 0.0),
            }
        }
    }
}

/// Whether a visible modal swallows pointer downs that miss its close button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModalInputPolicy {
    PassThrough,
    Blocking,
}

impl ModalInputPolicy {
    pub(crate) fn from_name(name: &str) -> Option<ModalInputPolicy> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pass-through" | "passthrough" => Some(ModalInputPolicy::PassThrough),
            "blocking" => Some(ModalInputPolicy::Blocking),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct InventoryLayout {
    pub(crate) origin: Point,
    pub(crate) slot_size: f32,
    pub(crate) spacing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NavButtonLayout {
    pub(crate) center: Point,
    pub(crate) radius: f32,
}

/// Screen furniture in design space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Layout {
    pub(crate) inventory: InventoryLayout,
    pub(crate) modal_panel: Rect,
    pub(crate) close_button_size: f32,
    pub(crate) close_button_inset: f32,
    pub(crate) next_button: NavButtonLayout,
    pub(crate) prev_button: NavButtonLayout,
    pub(crate) scene_offset: Point,
}

impl Layout {
    /// Square in the panel's top-right corner.
    pub(crate) fn close_button(&self) -> Rect {
        let panel = self.modal_panel;
        Rect::new(
            panel.right() - self.close_button_inset - self.close_button_size,
            panel.y + self.close_button_inset,
            self.close_button_size,
            self.close_button_size,
        )
    }
}
