use crate::assets::LoadedImage;
use crate::geometry::{Point, Rect};

/// Integer pixel span `[left, right) x [top, bottom)` already clipped to the
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelSpan {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelSpan {
    pub(crate) fn from_rect(rect: Rect) -> (i32, i32, i32, i32) {
        let left = rect.x.round() as i32;
        let top = rect.y.round() as i32;
        let right = (rect.x + rect.width).round() as i32;
        let bottom = (rect.y + rect.height).round() as i32;
        (left, top, right, bottom)
    }

    pub(crate) fn clipped(rect: Rect, width: u32, height: u32) -> Option<Self> {
        let (left, top, right, bottom) = Self::from_rect(rect);
        let span = Self {
            left: left.max(0),
            top: top.max(0),
            right: right.min(width as i32),
            bottom: bottom.min(height as i32),
        };
        (span.left < span.right && span.top < span.bottom).then_some(span)
    }
}

pub(crate) fn fill_frame(frame: &mut [u8], color: [u8; 4]) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

fn pixel_range(frame: &[u8], width: usize, x: i32, y: i32) -> Option<std::ops::Range<usize>> {
    if x < 0 || y < 0 || x as usize >= width {
        return None;
    }
    let pixel_offset = (y as usize).checked_mul(width)?.checked_add(x as usize)?;
    let byte_offset = pixel_offset.checked_mul(4)?;
    let end = byte_offset.checked_add(4)?;
    (end <= frame.len()).then_some(byte_offset..end)
}

pub(crate) fn write_pixel_rgba_clipped(
    frame: &mut [u8],
    width: usize,
    x: i32,
    y: i32,
    color: [u8; 4],
) {
    if let Some(range) = pixel_range(frame, width, x, y) {
        frame[range].copy_from_slice(&color);
    }
}

/// Source-over blend of `color` scaled by `opacity` onto an opaque frame.
pub(crate) fn blend_pixel_clipped(
    frame: &mut [u8],
    width: usize,
    x: i32,
    y: i32,
    color: [u8; 4],
    opacity: f32,
) {
    let Some(range) = pixel_range(frame, width, x, y) else {
        return;
    };
    let alpha = (color[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = &mut frame[range];
    for channel in 0..3 {
        let blended = color[channel] as f32 * alpha + dst[channel] as f32 * (1.0 - alpha);
        dst[channel] = blended.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = 255;
}

pub(crate) fn fill_rect_blended(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: Rect,
    color: [u8; 4],
    opacity: f32,
) {
    let Some(span) = PixelSpan::clipped(rect, width, height) else {
        return;
    };
    let width_usize = width as usize;
    for y in span.top..span.bottom {
        for x in span.left..span.right {
            blend_pixel_clipped(frame, width_usize, x, y, color, opacity);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn rect_outline_blended(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: Rect,
    thickness: f32,
    color: [u8; 4],
    opacity: f32,
) {
    if rect.width <= 1.0 || rect.height <= 1.0 || thickness <= 0.0 {
        return;
    }
    let t = thickness.min(rect.width / 2.0).min(rect.height / 2.0);
    let edges = [
        Rect::new(rect.x, rect.y, rect.width, t),
        Rect::new(rect.x, rect.bottom() - t, rect.width, t),
        Rect::new(rect.x, rect.y + t, t, rect.height - 2.0 * t),
        Rect::new(rect.right() - t, rect.y + t, t, rect.height - 2.0 * t),
    ];
    for edge in edges {
        fill_rect_blended(frame, width, height, edge, color, opacity);
    }
}

pub(crate) fn fill_disc_blended(
    frame: &mut [u8],
    width: u32,
    height: u32,
    center: Point,
    radius: f32,
    color: [u8; 4],
    opacity: f32,
) {
    if radius <= 0.0 {
        return;
    }
    let bounds = Rect::new(
        center.x - radius,
        center.y - radius,
        radius * 2.0,
        radius * 2.0,
    );
    let Some(span) = PixelSpan::clipped(bounds, width, height) else {
        return;
    };
    let radius_sq = radius * radius;
    let width_usize = width as usize;
    for y in span.top..span.bottom {
        for x in span.left..span.right {
            let sample = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if sample.distance_sq(center) <= radius_sq {
                blend_pixel_clipped(frame, width_usize, x, y, color, opacity);
            }
        }
    }
}

/// Two diagonals spanning `rect`, `thickness` pixels wide.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_cross_blended(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: Rect,
    thickness: i32,
    color: [u8; 4],
    opacity: f32,
) {
    let Some(span) = PixelSpan::clipped(rect, width, height) else {
        return;
    };
    let (left, top, right, bottom) = PixelSpan::from_rect(rect);
    let size = (right - left).min(bottom - top);
    let half = (thickness.max(1) - 1) / 2;
    let width_usize = width as usize;
    for step in 0..size {
        for offset in -half..=half {
            let points = [
                (left + step + offset, top + step),
                (right - 1 - step + offset, top + step),
            ];
            for (x, y) in points {
                if x >= span.left && x < span.right && y >= span.top && y < span.bottom {
                    blend_pixel_clipped(frame, width_usize, x, y, color, opacity);
                }
            }
        }
    }
}

/// Nearest-neighbour stretch of `image` into `rect`, blended by `opacity`
/// and the image's own alpha.
pub(crate) fn draw_image_stretched(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: Rect,
    image: &LoadedImage,
    opacity: f32,
) {
    if image.width() == 0 || image.height() == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let Some(span) = PixelSpan::clipped(rect, width, height) else {
        return;
    };
    let (left, top, right, bottom) = PixelSpan::from_rect(rect);
    let dest_w = (right - left).max(1) as f32;
    let dest_h = (bottom - top).max(1) as f32;
    let src_w = image.width();
    let src_h = image.height();
    let rgba = image.rgba();
    let opaque = opacity >= 1.0;
    let width_usize = width as usize;

    for out_y in span.top..span.bottom {
        let v = (out_y - top) as f32 / dest_h;
        let src_y = ((v * src_h as f32) as u32).min(src_h - 1) as usize;
        let src_row = src_y * src_w as usize * 4;
        for out_x in span.left..span.right {
            let u = (out_x - left) as f32 / dest_w;
            let src_x = ((u * src_w as f32) as u32).min(src_w - 1) as usize;
            let src = src_row + src_x * 4;
            let texel = [rgba[src], rgba[src + 1], rgba[src + 2], rgba[src + 3]];
            if texel[3] == 0 {
                continue;
            }
            if opaque && texel[3] == 255 {
                write_pixel_rgba_clipped(frame, width_usize, out_x, out_y, texel);
            } else {
                blend_pixel_clipped(frame, width_usize, out_x, out_y, texel, opacity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * width + x) * 4;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        write_pixel_rgba_clipped(&mut frame, 4, -1, 0, [255; 4]);
        write_pixel_rgba_clipped(&mut frame, 4, 4, 0, [255; 4]);
        write_pixel_rgba_clipped(&mut frame, 4, 0, 4, [255; 4]);
        assert!(frame.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn tiny_viewports_never_panic_or_write_oob() {
        let mut frame_1x1 = vec![0u8; 4];
        fill_rect_blended(
            &mut frame_1x1,
            1,
            1,
            Rect::new(-10.0, -10.0, 50.0, 50.0),
            [255, 0, 0, 255],
            1.0,
        );
        assert_eq!(pixel(&frame_1x1, 1, 0, 0), [255, 0, 0, 255]);

        let mut empty = Vec::new();
        fill_disc_blended(&mut empty, 0, 8, Point::new(0.0, 0.0), 4.0, [1; 4], 1.0);
        draw_cross_blended(&mut empty, 8, 0, Rect::new(0.0, 0.0, 8.0, 8.0), 2, [1; 4], 1.0);
    }

    #[test]
    fn half_opacity_blends_towards_color() {
        let mut frame = vec![0u8; 4];
        blend_pixel_clipped(&mut frame, 1, 0, 0, [200, 100, 0, 255], 0.5);
        assert_eq!(pixel(&frame, 1, 0, 0), [100, 50, 0, 255]);
    }

    #[test]
    fn zero_opacity_leaves_frame_untouched() {
        let mut frame = vec![7u8; 2 * 2 * 4];
        fill_rect_blended(
            &mut frame,
            2,
            2,
            Rect::new(0.0, 0.0, 2.0, 2.0),
            [255; 4],
            0.0,
        );
        assert!(frame.iter().all(|byte| *byte == 7));
    }

    #[test]
    fn stretched_image_fills_destination_with_nearest_texels() {
        let image = LoadedImage::from_rgba(
            2,
            1,
            vec![255, 0, 0, 255, 0, 0, 255, 255],
        )
        .expect("image");
        let mut frame = vec![0u8; 4 * 2 * 4];
        draw_image_stretched(&mut frame, 4, 2, Rect::new(0.0, 0.0, 4.0, 2.0), &image, 1.0);

        assert_eq!(pixel(&frame, 4, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 4, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 4, 2, 0), [0, 0, 255, 255]);
        assert_eq!(pixel(&frame, 4, 3, 1), [0, 0, 255, 255]);
    }

    #[test]
    fn disc_covers_center_but_not_corners() {
        let mut frame = vec![0u8; 10 * 10 * 4];
        fill_disc_blended(&mut frame, 10, 10, Point::new(5.0, 5.0), 4.0, [9, 9, 9, 255], 1.0);
        assert_eq!(pixel(&frame, 10, 5, 5), [9, 9, 9, 255]);
        assert_eq!(pixel(&frame, 10, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut frame = vec![0u8; 10 * 10 * 4];
        rect_outline_blended(
            &mut frame,
            10,
            10,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            2.0,
            [5, 5, 5, 255],
            1.0,
        );
        assert_eq!(pixel(&frame, 10, 0, 0), [5, 5, 5, 255]);
        assert_eq!(pixel(&frame, 10, 1, 5), [5, 5, 5, 255]);
        assert_eq!(pixel(&frame, 10, 5, 5), [0, 0, 0, 0]);
    }
}
