use std::cell::OnceCell;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use egui::Color32;
use image::{ImageFormat, RgbaImage};

use crate::config::SketchConfig;
use crate::error::ExportError;
use crate::mark::Mark;
use crate::render::{GlyphRasterizer, RasterSurface, render_marks};

/// Largest export side, in pixels, after scaling
pub const MAX_EXPORT_SIDE: u32 = 16_384;

/// Largest stamp font size, in export pixels
pub const MAX_EXPORT_GLYPH_SIZE: f32 = 4_096.0;

/// Export background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// No fill step at all; untouched pixels keep zero alpha
    Transparent,
    /// Fill with the configured background color first
    Opaque,
}

/// Encoded export, ready to be handed to whatever saves or downloads it
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ExportedImage {
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, &self.png)?;
        log::info!("Saved {}x{} export to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Replays marks onto an upscaled offscreen surface
#[derive(Debug)]
pub struct Exporter {
    canvas_width: u32,
    canvas_height: u32,
    scale: u32,
    background: Color32,
    /// Fonts are only parsed on first export
    glyphs: OnceCell<GlyphRasterizer>,
}

impl Exporter {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            scale: config.export_scale.max(1),
            background: config.background_color(),
            glyphs: OnceCell::new(),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Pixel size of an export, refused when either side passes
    /// [`MAX_EXPORT_SIDE`]
    pub fn output_size(&self) -> Result<(u32, u32), ExportError> {
        let scaled = |side: u32| side.checked_mul(self.scale).filter(|px| *px <= MAX_EXPORT_SIDE);
        match (scaled(self.canvas_width), scaled(self.canvas_height)) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(ExportError::TooLarge {
                width: self.canvas_width,
                height: self.canvas_height,
                scale: self.scale,
                max: MAX_EXPORT_SIDE,
            }),
        }
    }

    /// Draw `marks` exactly as the live canvas does, at export scale
    pub fn rasterize<'a>(
        &self,
        marks: impl IntoIterator<Item = &'a Mark>,
        background: Background,
    ) -> Result<RgbaImage, ExportError> {
        let (width, height) = self.output_size()?;
        let glyphs = self.glyphs.get_or_init(GlyphRasterizer::from_egui_defaults);
        let mut surface = RasterSurface::new(width, height, self.scale as f32, glyphs);

        let fill = match background {
            Background::Transparent => None,
            Background::Opaque => Some(self.background),
        };
        render_marks(&mut surface, fill, marks);

        Ok(surface.into_image())
    }

    /// Rasterize and PNG-encode
    pub fn export<'a>(&self, marks: impl IntoIterator<Item = &'a Mark>, background: Background) -> Result<ExportedImage, ExportError> {
        let image = self.rasterize(marks, background)?;

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        log::info!(
            "Exported {}x{} image ({:?} background, {} bytes)",
            image.width(),
            image.height(),
            background,
            png.len()
        );

        Ok(ExportedImage {
            width: image.width(),
            height: image.height(),
            png,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_size_is_canvas_times_scale() {
        let exporter = Exporter::new(&SketchConfig::default());
        assert_eq!(exporter.output_size().unwrap(), (1024, 1024));
    }

    #[test]
    fn test_overflowing_scale_is_refused() {
        let config = SketchConfig {
            canvas_width: 70_000,
            canvas_height: 70_000,
            export_scale: 70_000,
            ..SketchConfig::default()
        };
        let exporter = Exporter::new(&config);
        assert!(matches!(exporter.output_size(), Err(ExportError::TooLarge { scale: 70_000, .. })));
        assert!(matches!(exporter.export(std::iter::empty(), Background::Opaque), Err(ExportError::TooLarge { .. })));
    }

    #[test]
    fn test_side_just_past_limit_is_refused() {
        let config = SketchConfig {
            canvas_width: MAX_EXPORT_SIDE / 4 + 1,
            canvas_height: 16,
            export_scale: 4,
            ..SketchConfig::default()
        };
        assert!(Exporter::new(&config).output_size().is_err());
    }
}
