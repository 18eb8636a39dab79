use ab_glyph::{Font, FontVec, OutlinedGlyph, PxScale, ScaleFont, point};
use egui::{FontDefinitions, FontFamily};

/// Coverage mask of a laid-out glyph string
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Row-major coverage in 0..=1
    pub coverage: Vec<f32>,
    /// Centre of the text's advance box, in bitmap pixels
    pub center: (f32, f32),
}

impl GlyphBitmap {
    /// Bilinear coverage lookup; zero outside the bitmap
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x = x - 0.5;
        let y = y - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let at = |xi: f32, yi: f32| -> f32 {
            if xi < 0.0 || yi < 0.0 || xi >= self.width as f32 || yi >= self.height as f32 {
                0.0
            } else {
                self.coverage[yi as usize * self.width + xi as usize]
            }
        };

        let top = at(x0, y0) * (1.0 - fx) + at(x0 + 1.0, y0) * fx;
        let bottom = at(x0, y0 + 1.0) * (1.0 - fx) + at(x0 + 1.0, y0 + 1.0) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

/// Rasterizes text for offscreen surfaces using the same font stack the live
/// canvas gets from egui, so stamps look alike on screen and in exports.
pub struct GlyphRasterizer {
    /// Fallback order: first font with a glyph for the char wins
    fonts: Vec<FontVec>,
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

impl GlyphRasterizer {
    /// Load egui's bundled proportional font family
    pub fn from_egui_defaults() -> Self {
        let definitions = FontDefinitions::default();
        let mut fonts = Vec::new();

        let names = definitions
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        for name in names {
            let Some(data) = definitions.font_data.get(&name) else {
                continue;
            };
            match FontVec::try_from_vec_and_index(data.font.to_vec(), data.index) {
                Ok(font) => fonts.push(font),
                Err(err) => log::warn!("Skipping font {}: {}", name, err),
            }
        }

        if fonts.is_empty() {
            log::warn!("No fonts available; glyphs will not be rasterized");
        }
        Self { fonts }
    }

    fn font_for(&self, ch: char) -> Option<&FontVec> {
        self.fonts
            .iter()
            .find(|font| font.glyph_id(ch).0 != 0)
            .or_else(|| self.fonts.first())
    }

    /// Lay out `text` on one line at `size` px. `None` if nothing is visible.
    pub fn rasterize(&self, text: &str, size: f32) -> Option<GlyphBitmap> {
        let primary = self.fonts.first()?;
        let scale = PxScale::from(size);
        let metrics = primary.as_scaled(scale);
        let ascent = metrics.ascent();
        let line_height = ascent - metrics.descent();

        let mut outlines: Vec<OutlinedGlyph> = Vec::new();
        let mut caret = 0.0_f32;
        for ch in text.chars() {
            let Some(font) = self.font_for(ch) else {
                continue;
            };
            let id = font.glyph_id(ch);
            let glyph = id.with_scale_and_position(scale, point(caret, ascent));
            caret += font.as_scaled(scale).h_advance(id);
            if let Some(outlined) = font.outline_glyph(glyph) {
                outlines.push(outlined);
            }
        }

        if outlines.is_empty() {
            return None;
        }

        // Union of the advance box and every glyph's pixel bounds
        let mut min_x = 0.0_f32;
        let mut min_y = 0.0_f32;
        let mut max_x = caret;
        let mut max_y = line_height;
        for outlined in &outlines {
            let bounds = outlined.px_bounds();
            min_x = min_x.min(bounds.min.x);
            min_y = min_y.min(bounds.min.y);
            max_x = max_x.max(bounds.max.x);
            max_y = max_y.max(bounds.max.y);
        }
        let min_x = min_x.floor();
        let min_y = min_y.floor();

        let width = (max_x.ceil() - min_x) as usize;
        let height = (max_y.ceil() - min_y) as usize;
        if width == 0 || height == 0 {
            return None;
        }

        let mut coverage = vec![0.0_f32; width * height];
        for outlined in &outlines {
            let bounds = outlined.px_bounds();
            let offset_x = (bounds.min.x - min_x) as i64;
            let offset_y = (bounds.min.y - min_y) as i64;
            outlined.draw(|x, y, c| {
                let px = offset_x + x as i64;
                let py = offset_y + y as i64;
                if px >= 0 && py >= 0 && (px as usize) < width && (py as usize) < height {
                    let cell = &mut coverage[py as usize * width + px as usize];
                    *cell = (*cell + c).min(1.0);
                }
            });
        }

        Some(GlyphBitmap {
            width,
            height,
            coverage,
            center: (caret / 2.0 - min_x, line_height / 2.0 - min_y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fonts_load() {
        let glyphs = GlyphRasterizer::from_egui_defaults();
        assert!(!glyphs.fonts.is_empty());
    }

    #[test]
    fn test_rasterize_letter_has_ink() {
        let glyphs = GlyphRasterizer::from_egui_defaults();
        let bitmap = glyphs.rasterize("W", 32.0).unwrap();
        assert!(bitmap.width > 10 && bitmap.height > 10);
        assert!(bitmap.coverage.iter().any(|c| *c > 0.5));
    }

    #[test]
    fn test_whitespace_has_no_bitmap() {
        let glyphs = GlyphRasterizer::from_egui_defaults();
        assert!(glyphs.rasterize(" ", 32.0).is_none());
    }
}
