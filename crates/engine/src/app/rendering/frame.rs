use crate::assets::{ImageHandle, Thumbnail};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone)]
pub struct SlotDesc {
    pub rect: Rect,
    pub thumbnail: Thumbnail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscDesc {
    pub center: Point,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct ModalDesc {
    pub rect: Rect,
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
    pub image: Thumbnail,
    /// Present only while the modal accepts input.
    pub close_button: Option<Rect>,
}

/// Everything the renderer needs for one frame, in window pixels.
#[derive(Debug, Clone, Default)]
pub struct FrameDesc {
    pub background: Option<ImageHandle>,
    pub scene_viewport: Rect,
    pub inventory_slots: Vec<SlotDesc>,
    pub nav_buttons: Vec<DiscDesc>,
    pub modal: Option<ModalDesc>,
    pub debug_outlines: Vec<Rect>,
}
