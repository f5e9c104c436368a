//! Box Overlay
//!
//! Draws the bounding quadrilateral of each detected fragment onto a copy
//! of the card image for visual confirmation. Pure rendering; the original
//! image is never modified.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::{Deserialize, Serialize};

use crate::ocr::Fragment;

/// Outline style for fragment boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Stroke color (RGBA)
    pub color: [u8; 4],
    /// Stroke width in pixels
    pub width: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        // Yellow, 2 px
        Self {
            color: [255, 255, 0, 255],
            width: 2,
        }
    }
}

/// Render a copy of `image` with each fragment's quadrilateral outlined.
pub fn draw_boxes(image: &DynamicImage, fragments: &[Fragment], style: &OverlayStyle) -> RgbaImage {
    let mut canvas = image.to_rgba8();
    let color = Rgba(style.color);

    for fragment in fragments {
        let quad = fragment.quad;
        for i in 0..4 {
            let from = quad[i];
            let to = quad[(i + 1) % 4];
            draw_thick_line(&mut canvas, from, to, style.width, color);
        }
    }

    canvas
}

/// Draw a line with approximate thickness by repeating the 1 px segment
/// at offsets perpendicular to its dominant direction.
fn draw_thick_line(
    canvas: &mut RgbaImage,
    from: (f32, f32),
    to: (f32, f32),
    width: u32,
    color: Rgba<u8>,
) {
    let horizontal = (to.0 - from.0).abs() >= (to.1 - from.1).abs();
    for t in 0..width.max(1) {
        let offset = t as f32;
        let (dx, dy) = if horizontal { (0.0, offset) } else { (offset, 0.0) };
        draw_line_segment_mut(
            canvas,
            (from.0 + dx, from.1 + dy),
            (to.0 + dx, to.1 + dy),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_pixels(canvas: &RgbaImage, color: [u8; 4]) -> usize {
        canvas.pixels().filter(|p| p.0 == color).count()
    }

    #[test]
    fn test_boxes_drawn_on_copy() {
        let image = DynamicImage::new_rgba8(100, 100);
        let fragments = vec![Fragment::from_rect("x", 10.0, 10.0, 40.0, 20.0, 1.0)];
        let style = OverlayStyle::default();

        let canvas = draw_boxes(&image, &fragments, &style);
        assert!(count_pixels(&canvas, style.color) > 0);
        // Source untouched
        assert_eq!(count_pixels(&image.to_rgba8(), style.color), 0);
    }

    #[test]
    fn test_no_fragments_draws_nothing() {
        let image = DynamicImage::new_rgba8(50, 50);
        let style = OverlayStyle::default();
        let canvas = draw_boxes(&image, &[], &style);
        assert_eq!(count_pixels(&canvas, style.color), 0);
    }

    #[test]
    fn test_wider_stroke_covers_more_pixels() {
        let image = DynamicImage::new_rgba8(100, 100);
        let fragments = vec![Fragment::from_rect("x", 10.0, 10.0, 60.0, 30.0, 1.0)];

        let thin = draw_boxes(&image, &fragments, &OverlayStyle { width: 1, ..Default::default() });
        let thick = draw_boxes(&image, &fragments, &OverlayStyle { width: 3, ..Default::default() });

        let color = OverlayStyle::default().color;
        assert!(count_pixels(&thick, color) > count_pixels(&thin, color));
    }
}
