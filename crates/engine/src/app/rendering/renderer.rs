use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::assets::{Thumbnail, PLACEHOLDER_COLOR};
use crate::geometry::Rect;

use super::frame::{FrameDesc, ModalDesc, SlotDesc};
use super::raster::{
    draw_cross_blended, draw_image_stretched, fill_disc_blended, fill_frame, fill_rect_blended,
    rect_outline_blended,
};

const CLEAR_COLOR_WOOD: [u8; 4] = [52, 36, 24, 255];
const SLOT_BACKING_COLOR: [u8; 4] = [30, 22, 16, 255];
const SLOT_BORDER_COLOR: [u8; 4] = [140, 110, 70, 255];
const NAV_BUTTON_COLOR: [u8; 4] = [60, 120, 230, 255];
const NAV_BUTTON_OPACITY: f32 = 0.55;
const MODAL_FILL_COLOR: [u8; 4] = [18, 18, 24, 255];
const MODAL_FILL_OPACITY: f32 = 0.85;
const MODAL_BORDER_COLOR: [u8; 4] = [212, 175, 55, 255];
const MODAL_BORDER_PX: f32 = 2.0;
const MODAL_IMAGE_FRACTION: f32 = 0.8;
const CLOSE_BUTTON_COLOR: [u8; 4] = [235, 235, 235, 255];
const CLOSE_CROSS_THICKNESS_PX: i32 = 2;
const DEBUG_OUTLINE_COLOR: [u8; 4] = [80, 220, 255, 255];

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            width: size.width,
            height: size.height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render(&mut self, desc: &FrameDesc) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        draw_frame(self.pixels.frame_mut(), self.width, self.height, desc);
        self.pixels.render()
    }
}

pub(crate) fn draw_frame(frame: &mut [u8], width: u32, height: u32, desc: &FrameDesc) {
    fill_frame(frame, CLEAR_COLOR_WOOD);

    if let Some(background) = &desc.background {
        draw_image_stretched(frame, width, height, desc.scene_viewport, background, 1.0);
    }

    for slot in &desc.inventory_slots {
        draw_slot(frame, width, height, slot);
    }

    for button in &desc.nav_buttons {
        fill_disc_blended(
            frame,
            width,
            height,
            button.center,
            button.radius,
            NAV_BUTTON_COLOR,
            NAV_BUTTON_OPACITY,
        );
    }

    for outline in &desc.debug_outlines {
        rect_outline_blended(frame, width, height, *outline, 1.0, DEBUG_OUTLINE_COLOR, 1.0);
    }

    if let Some(modal) = &desc.modal {
        draw_modal(frame, width, height, modal);
    }
}

fn draw_thumbnail(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: Rect,
    thumbnail: &Thumbnail,
    opacity: f32,
) {
    match thumbnail {
        Thumbnail::Image(image) => draw_image_stretched(frame, width, height, rect, image, opacity),
        Thumbnail::Placeholder => {
            fill_rect_blended(frame, width, height, rect, PLACEHOLDER_COLOR, opacity)
        }
    }
}

fn draw_slot(frame: &mut [u8], width: u32, height: u32, slot: &SlotDesc) {
    fill_rect_blended(frame, width, height, slot.rect, SLOT_BACKING_COLOR, 1.0);
    draw_thumbnail(frame, width, height, slot.rect, &slot.thumbnail, 1.0);
    rect_outline_blended(frame, width, height, slot.rect, 1.0, SLOT_BORDER_COLOR, 1.0);
}

fn draw_modal(frame: &mut [u8], width: u32, height: u32, modal: &ModalDesc) {
    let opacity = modal.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || modal.rect.width <= 0.0 || modal.rect.height <= 0.0 {
        return;
    }

    fill_rect_blended(
        frame,
        width,
        height,
        modal.rect,
        MODAL_FILL_COLOR,
        MODAL_FILL_OPACITY * opacity,
    );
    rect_outline_blended(
        frame,
        width,
        height,
        modal.rect,
        MODAL_BORDER_PX,
        MODAL_BORDER_COLOR,
        opacity,
    );

    let image_rect = modal.rect.scaled_about_center(MODAL_IMAGE_FRACTION);
    draw_thumbnail(frame, width, height, image_rect, &modal.image, opacity);

    if let Some(close) = modal.close_button {
        draw_cross_blended(
            frame,
            width,
            height,
            close,
            CLOSE_CROSS_THICKNESS_PX,
            CLOSE_BUTTON_COLOR,
            opacity,
        );
    }
}
