use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

use super::Surface;
use super::glyph::GlyphRasterizer;

/// Offscreen RGBA target.
///
/// Surface coordinates are multiplied by `scale` before rasterizing, so
/// widths and glyph sizes grow with positions instead of being resampled.
pub struct RasterSurface<'a> {
    image: RgbaImage,
    scale: f32,
    glyphs: &'a GlyphRasterizer,
}

impl<'a> RasterSurface<'a> {
    /// A fully transparent `width × height` pixel image
    pub fn new(width: u32, height: u32, scale: f32, glyphs: &'a GlyphRasterizer) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            scale,
            glyphs,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn to_pixels(&self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x * self.scale, pos.y * self.scale)
    }

    /// Source-over blend of `color` at `coverage` into one pixel
    fn blend(&mut self, x: u32, y: u32, color: [u8; 4], coverage: f32) {
        let src_a = color[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let Rgba(dst) = *self.image.get_pixel(x, y);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let mut out = [0u8; 4];
        for channel in 0..3 {
            let src_c = color[channel] as f32;
            let dst_c = dst[channel] as f32;
            let value = (src_c * src_a + dst_c * dst_a * (1.0 - src_a)) / out_a;
            out[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;

        self.image.put_pixel(x, y, Rgba(out));
    }

    /// Clamp a pixel-space span to the image, as a half-open range
    fn span(&self, min: f32, max: f32, limit: u32) -> (u32, u32) {
        let lo = min.floor().max(0.0) as u32;
        let hi = (max.ceil().max(0.0) as u32).min(limit);
        (lo.min(hi), hi)
    }
}

impl Surface for RasterSurface<'_> {
    fn fill(&mut self, color: Color32) {
        let fill = Rgba(color.to_srgba_unmultiplied());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.is_empty() {
            return;
        }

        let points: Vec<Pos2> = points.iter().map(|p| self.to_pixels(*p)).collect();
        let half = width * self.scale / 2.0;
        let reach = half + 1.0;

        // Coverage is accumulated per stroke so overlapping segments don't
        // darken their shared joints
        let (mut min, mut max) = (points[0], points[0]);
        for p in &points {
            min = min.min(*p);
            max = max.max(*p);
        }
        let (x0, x1) = self.span(min.x - reach, max.x + reach, self.image.width());
        let (y0, y1) = self.span(min.y - reach, max.y + reach, self.image.height());
        if x0 == x1 || y0 == y1 {
            return;
        }

        let box_width = (x1 - x0) as usize;
        let mut coverage = vec![0.0_f32; box_width * (y1 - y0) as usize];

        let segments: Vec<(Pos2, Pos2)> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|pair| (pair[0], pair[1])).collect()
        };

        for (start, end) in segments {
            let (sx0, sx1) = self.span(start.x.min(end.x) - reach, start.x.max(end.x) + reach, x1);
            let (sy0, sy1) = self.span(start.y.min(end.y) - reach, start.y.max(end.y) + reach, y1);
            for y in sy0.max(y0)..sy1 {
                for x in sx0.max(x0)..sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let distance = distance_to_segment(center, start, end);
                    let c = (half + 0.5 - distance).clamp(0.0, 1.0);
                    let cell = &mut coverage[(y - y0) as usize * box_width + (x - x0) as usize];
                    *cell = cell.max(c);
                }
            }
        }

        let rgba = color.to_srgba_unmultiplied();
        for (index, c) in coverage.into_iter().enumerate() {
            if c > 0.0 {
                let x = x0 + (index % box_width) as u32;
                let y = y0 + (index / box_width) as u32;
                self.blend(x, y, rgba, c);
            }
        }
    }

    fn glyph(&mut self, text: &str, center: Pos2, size: f32, rotation: f32, color: Color32) {
        let Some(bitmap) = self.glyphs.rasterize(text, size * self.scale) else {
            return;
        };

        let center = self.to_pixels(center);
        let (cos, sin) = (rotation.cos(), rotation.sin());

        // Farthest bitmap corner from the pivot bounds the rotated footprint
        let (cx, cy) = bitmap.center;
        let radius = [
            Vec2::new(cx, cy),
            Vec2::new(bitmap.width as f32 - cx, cy),
            Vec2::new(cx, bitmap.height as f32 - cy),
            Vec2::new(bitmap.width as f32 - cx, bitmap.height as f32 - cy),
        ]
        .iter()
        .map(|v| v.length())
        .fold(0.0_f32, f32::max)
            + 1.0;

        let (x0, x1) = self.span(center.x - radius, center.x + radius, self.image.width());
        let (y0, y1) = self.span(center.y - radius, center.y + radius, self.image.height());
        let rgba = color.to_srgba_unmultiplied();

        for y in y0..y1 {
            for x in x0..x1 {
                // Inverse-rotate the pixel centre into bitmap space
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let sx = dx * cos + dy * sin + cx;
                let sy = -dx * sin + dy * cos + cy;
                let c = bitmap.sample(sx, sy);
                if c > 0.0 {
                    self.blend(x, y, rgba, c);
                }
            }
        }
    }
}

/// Distance from `point` to the segment `start..end`
pub(crate) fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line = end - start;
    let to_point = point - start;

    let length = line.length();
    if length == 0.0 {
        return to_point.length();
    }

    let t = (to_point.dot(line) / length).clamp(0.0, length);
    let projection = start + line * (t / length);
    (point - projection).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let start = Pos2::new(0.0, 0.0);
        let end = Pos2::new(10.0, 0.0);
        assert!((distance_to_segment(Pos2::new(5.0, 3.0), start, end) - 3.0).abs() < 1e-6);
        assert!((distance_to_segment(Pos2::new(13.0, 4.0), start, end) - 5.0).abs() < 1e-6);
        assert!((distance_to_segment(Pos2::new(1.0, 1.0), start, start) - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_polyline_is_scaled_with_surface() {
        let glyphs = GlyphRasterizer::from_egui_defaults();
        let mut surface = RasterSurface::new(40, 40, 2.0, &glyphs);
        surface.polyline(&[Pos2::new(2.0, 10.0), Pos2::new(18.0, 10.0)], 4.0, Color32::RED);
        let image = surface.into_image();

        // Centre line lands at y = 20 in pixels, 8 px thick
        assert_eq!(image.get_pixel(20, 20).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(20, 17).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(20, 10).0[3], 0);
    }

    #[test]
    fn test_single_point_draws_dot() {
        let glyphs = GlyphRasterizer::from_egui_defaults();
        let mut surface = RasterSurface::new(20, 20, 1.0, &glyphs);
        surface.polyline(&[Pos2::new(10.0, 10.0)], 6.0, Color32::BLUE);
        let image = surface.into_image();
        assert_eq!(image.get_pixel(10, 10).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_fill_covers_every_pixel() {
        let glyphs = GlyphRasterizer::from_egui_defaults();
        let mut surface = RasterSurface::new(8, 8, 1.0, &glyphs);
        surface.fill(Color32::WHITE);
        assert!(surface.into_image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
