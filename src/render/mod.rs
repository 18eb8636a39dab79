//! Full-surface redraw of the mark list, shared by the live canvas and the
//! exporter.
//!
//! Every change repaints from scratch: background, then every mark oldest
//! first, then the tool preview. Both targets implement [`Surface`], so a
//! mark draws identically on screen and in an export.

use egui::{Color32, Pos2};

use crate::mark::{Mark, STAMP_INK};
use crate::session::DrawingSession;
use crate::tool::{STROKE_PREVIEW_GLYPH, ToolState};

mod glyph;
mod painter;
mod raster;

pub use glyph::{GlyphBitmap, GlyphRasterizer};
pub use painter::PainterSurface;
pub use raster::RasterSurface;

/// Opacity of the tool preview under the pointer
pub const PREVIEW_OPACITY: f32 = 0.5;

/// Smallest font size used for the stroke preview dot
const MIN_PREVIEW_SIZE: f32 = 8.0;

/// A drawing target in surface coordinates
pub trait Surface {
    /// Cover the whole surface with `color`
    fn fill(&mut self, color: Color32);

    /// Round-capped, round-joined line through `points`. A single point
    /// draws a dot of diameter `width`.
    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// `text` at font size `size`, centred on `center` and rotated by
    /// `rotation` radians around it
    fn glyph(&mut self, text: &str, center: Pos2, size: f32, rotation: f32, color: Color32);
}

/// Draw `marks` in order over an optional background
pub fn render_marks<'a>(surface: &mut dyn Surface, background: Option<Color32>, marks: impl IntoIterator<Item = &'a Mark>) {
    if let Some(background) = background {
        surface.fill(background);
    }
    for mark in marks {
        mark.render(surface);
    }
}

/// Draw the live tool indicator. Unlike marks, it reflects the current tool
/// settings.
pub fn render_preview(surface: &mut dyn Surface, position: Pos2, tools: &ToolState) {
    match tools.selected_glyph() {
        Some(glyph) => {
            surface.glyph(
                glyph,
                position,
                tools.stamp_size(),
                0.0,
                STAMP_INK.gamma_multiply(PREVIEW_OPACITY),
            );
        }
        None => {
            // The bullet's dot is roughly a third of the font size
            let size = (tools.stroke_width() as f32 * 3.0).max(MIN_PREVIEW_SIZE);
            surface.glyph(
                STROKE_PREVIEW_GLYPH,
                position,
                size,
                0.0,
                tools.color().gamma_multiply(PREVIEW_OPACITY),
            );
        }
    }
}

/// Repaints the live canvas
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
}

impl Renderer {
    pub fn new(background: Color32) -> Self {
        Self { background }
    }

    pub fn render(&self, surface: &mut dyn Surface, session: &DrawingSession) {
        render_marks(surface, Some(self.background), session.history().snapshot());
        if let Some(position) = session.cursor_preview() {
            render_preview(surface, position, session.tools());
        }
    }
}
