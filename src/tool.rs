use egui::Color32;

use crate::config::SketchConfig;
use crate::error::ToolError;

/// Placeholder shown under the pointer while the stroke tool is active
pub const STROKE_PREVIEW_GLYPH: &str = "•";

/// Which kind of mark the next press creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolMode {
    Stroke,
    Stamp { glyph: String },
}

/// The user's current drawing configuration.
///
/// Changes here only affect marks created afterwards; existing marks keep
/// the values they captured.
#[derive(Debug, Clone)]
pub struct ToolState {
    mode: ToolMode,
    stroke_width: u32,
    max_stroke_width: u32,
    color: Color32,
    stamp_size: f32,
    glyphs: Vec<String>,
}

impl ToolState {
    pub fn new(config: &SketchConfig) -> Self {
        let mut tools = Self {
            mode: ToolMode::Stroke,
            stroke_width: 1,
            max_stroke_width: config.max_stroke_width.max(1),
            color: config.default_color(),
            stamp_size: config.stamp_size,
            glyphs: Vec::new(),
        };
        tools.stroke_width = tools.clamp_width(config.default_stroke_width);
        for glyph in &config.glyphs {
            tools.push_glyph(glyph);
        }
        tools
    }

    pub fn mode(&self) -> &ToolMode {
        &self.mode
    }

    pub fn is_stamp(&self) -> bool {
        matches!(self.mode, ToolMode::Stamp { .. })
    }

    pub fn selected_glyph(&self) -> Option<&str> {
        match &self.mode {
            ToolMode::Stamp { glyph } => Some(glyph),
            ToolMode::Stroke => None,
        }
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stamp_size(&self) -> f32 {
        self.stamp_size
    }

    /// Stamp palette, in registration order
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Select a stroke width and switch back to the stroke tool.
    ///
    /// Zero is refused; widths above the configured maximum are clamped.
    pub fn select_stroke_width(&mut self, width: u32) -> Result<(), ToolError> {
        if width == 0 {
            return Err(ToolError::InvalidWidth);
        }
        self.stroke_width = self.clamp_width(width);
        self.mode = ToolMode::Stroke;
        log::debug!("Stroke width {}", self.stroke_width);
        Ok(())
    }

    /// Colors are always opaque RGB
    pub fn select_color(&mut self, rgb: [u8; 3]) {
        let [r, g, b] = rgb;
        self.color = Color32::from_rgb(r, g, b);
    }

    /// Switch to the stamp tool with `glyph`
    pub fn select_glyph(&mut self, glyph: &str) -> Result<(), ToolError> {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            return Err(ToolError::EmptyGlyph);
        }
        self.mode = ToolMode::Stamp {
            glyph: glyph.to_owned(),
        };
        log::debug!("Stamp glyph {:?}", glyph);
        Ok(())
    }

    /// Add a glyph from outside the built-in palette and select it
    pub fn register_custom_glyph(&mut self, glyph: &str) -> Result<(), ToolError> {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            return Err(ToolError::EmptyGlyph);
        }
        self.push_glyph(glyph);
        self.select_glyph(glyph)
    }

    fn push_glyph(&mut self, glyph: &str) {
        let glyph = glyph.trim();
        if !glyph.is_empty() && !self.glyphs.iter().any(|g| g == glyph) {
            self.glyphs.push(glyph.to_owned());
        }
    }

    fn clamp_width(&self, width: u32) -> u32 {
        width.clamp(1, self.max_stroke_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> ToolState {
        ToolState::new(&SketchConfig::default())
    }

    #[test]
    fn test_defaults_come_from_config() {
        let tools = tools();
        assert_eq!(tools.mode(), &ToolMode::Stroke);
        assert_eq!(tools.stroke_width(), 2);
        assert_eq!(tools.color(), Color32::BLACK);
        assert_eq!(tools.glyphs().len(), 3);
    }

    #[test]
    fn test_zero_width_is_refused() {
        let mut tools = tools();
        assert_eq!(tools.select_stroke_width(0), Err(ToolError::InvalidWidth));
        assert_eq!(tools.stroke_width(), 2);
    }

    #[test]
    fn test_width_is_clamped() {
        let mut tools = tools();
        tools.select_stroke_width(1000).unwrap();
        assert_eq!(tools.stroke_width(), 64);
    }

    #[test]
    fn test_glyph_and_width_switch_modes() {
        let mut tools = tools();
        tools.select_glyph("👻").unwrap();
        assert_eq!(tools.selected_glyph(), Some("👻"));

        tools.select_stroke_width(6).unwrap();
        assert_eq!(tools.mode(), &ToolMode::Stroke);
        assert_eq!(tools.selected_glyph(), None);
    }

    #[test]
    fn test_custom_glyph_is_added_once() {
        let mut tools = tools();
        tools.register_custom_glyph(" 🌵 ").unwrap();
        tools.register_custom_glyph("🌵").unwrap();
        assert_eq!(tools.glyphs().iter().filter(|g| *g == "🌵").count(), 1);
        assert_eq!(tools.selected_glyph(), Some("🌵"));
        assert_eq!(tools.register_custom_glyph("  "), Err(ToolError::EmptyGlyph));
    }
}
