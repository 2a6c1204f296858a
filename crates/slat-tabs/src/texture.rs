//! CPU rasterization of the tab shape.
//!
//! Each entry's texture is a filled rounded rectangle covering the whole
//! pixel box, rasterized with analytic antialiasing from the signed
//! distance to the shape boundary. Output is sRGB RGBA8 with straight
//! alpha, ready for upload.

use slat_core::Color;

/// Rasterize a rounded rectangle filling a `width` x `height` buffer.
pub(crate) fn rasterize_tab(width: u32, height: u32, rounding: f32, color: Color) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);

    let half_w = width as f32 * 0.5;
    let half_h = height as f32 * 0.5;
    let radius = rounding.clamp(0.0, half_w.min(half_h));

    for y in 0..height {
        for x in 0..width {
            // Sample at the pixel center, relative to the shape center.
            let px = x as f32 + 0.5 - half_w;
            let py = y as f32 + 0.5 - half_h;

            let d = rounded_rect_distance(px, py, half_w, half_h, radius);
            let coverage = (0.5 - d).clamp(0.0, 1.0);
            pixels.extend_from_slice(&color.scaled(coverage).to_srgba_u8());
        }
    }

    pixels
}

/// Signed distance from a point to the boundary of a rounded rectangle
/// centered at the origin. Negative inside.
fn rounded_rect_distance(px: f32, py: f32, half_w: f32, half_h: f32, radius: f32) -> f32 {
    let qx = px.abs() - (half_w - radius);
    let qy = py.abs() - (half_h - radius);

    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(pixels: &[u8], width: u32, x: u32, y: u32) -> u8 {
        pixels[((y * width + x) * 4 + 3) as usize]
    }

    #[test]
    fn test_buffer_dimensions() {
        let pixels = rasterize_tab(8, 4, 0.0, Color::from_srgba_u8(255, 255, 255, 255));
        assert_eq!(pixels.len(), 8 * 4 * 4);
    }

    #[test]
    fn test_zero_size_is_empty() {
        assert!(rasterize_tab(0, 4, 0.0, Color::TRANSPARENT).is_empty());
    }

    #[test]
    fn test_square_corners_without_rounding() {
        let white = Color::from_srgba_u8(255, 255, 255, 255);
        let pixels = rasterize_tab(16, 8, 0.0, white);
        assert_eq!(alpha_at(&pixels, 16, 0, 0), 255);
        assert_eq!(alpha_at(&pixels, 16, 15, 7), 255);
        assert_eq!(alpha_at(&pixels, 16, 8, 4), 255);
    }

    #[test]
    fn test_rounding_clears_corners_keeps_center() {
        let white = Color::from_srgba_u8(255, 255, 255, 255);
        let pixels = rasterize_tab(16, 16, 6.0, white);

        // Corner pixel lies well outside the rounded boundary.
        assert_eq!(alpha_at(&pixels, 16, 0, 0), 0);
        // Center and edge midpoints stay fully covered.
        assert_eq!(alpha_at(&pixels, 16, 8, 8), 255);
        assert_eq!(alpha_at(&pixels, 16, 8, 0), 255);
        assert_eq!(alpha_at(&pixels, 16, 0, 8), 255);
    }

    #[test]
    fn test_oversized_rounding_is_clamped() {
        let white = Color::from_srgba_u8(255, 255, 255, 255);
        // Radius larger than half the extent degenerates to a capsule, not
        // an empty shape.
        let pixels = rasterize_tab(16, 8, 100.0, white);
        assert_eq!(alpha_at(&pixels, 16, 8, 4), 255);
    }
}
