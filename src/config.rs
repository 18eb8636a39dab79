use std::fs;
use std::path::{Path, PathBuf};

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::{MAX_EXPORT_GLYPH_SIZE, MAX_EXPORT_SIDE};

/// Default file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sketchpad.json";

/// Settings for a drawing session, loaded from JSON.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// RGB fill of the live canvas and of opaque exports
    pub background: [u8; 3],
    /// Uniform upscale applied to positions and widths on export
    pub export_scale: u32,
    pub default_stroke_width: u32,
    /// Width buttons offered by the tool panel (thin, thick, ...)
    pub stroke_width_presets: Vec<u32>,
    pub max_stroke_width: u32,
    pub default_color: [u8; 3],
    /// Initial stamp palette
    pub glyphs: Vec<String>,
    /// Font size of a stamp, in surface units
    pub stamp_size: f32,
    pub export_path: PathBuf,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 256,
            canvas_height: 256,
            background: [255, 255, 255],
            export_scale: 4,
            default_stroke_width: 2,
            stroke_width_presets: vec![2, 6],
            max_stroke_width: 64,
            default_color: [0, 0, 0],
            glyphs: vec!["🎃".to_owned(), "👻".to_owned(), "🍕".to_owned()],
            stamp_size: 32.0,
            export_path: PathBuf::from("sketchpad.png"),
        }
    }
}

impl SketchConfig {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be non-zero, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.export_scale == 0 {
            return Err(ConfigError::Invalid("export_scale must be at least 1".to_owned()));
        }
        let fits = |side: u32| side.checked_mul(self.export_scale).is_some_and(|px| px <= MAX_EXPORT_SIDE);
        if !fits(self.canvas_width) || !fits(self.canvas_height) {
            return Err(ConfigError::Invalid(format!(
                "{}x{} canvas at {}x export exceeds {} pixels per side",
                self.canvas_width, self.canvas_height, self.export_scale, MAX_EXPORT_SIDE
            )));
        }
        if self.max_stroke_width == 0 {
            return Err(ConfigError::Invalid("max_stroke_width must be at least 1".to_owned()));
        }
        if self.stamp_size.is_nan() || self.stamp_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stamp_size must be positive, got {}",
                self.stamp_size
            )));
        }
        if self.stamp_size * self.export_scale as f32 > MAX_EXPORT_GLYPH_SIZE {
            return Err(ConfigError::Invalid(format!(
                "stamp_size {} at {}x export exceeds {} pixels",
                self.stamp_size, self.export_scale, MAX_EXPORT_GLYPH_SIZE
            )));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }

    pub fn default_color(&self) -> Color32 {
        let [r, g, b] = self.default_color;
        Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SketchConfig = serde_json::from_str(r#"{ "export_scale": 3 }"#).unwrap();
        assert_eq!(config.export_scale, 3);
        assert_eq!(config.canvas_width, 256);
        assert_eq!(config.background_color(), Color32::WHITE);
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let config = SketchConfig {
            export_scale: 0,
            ..SketchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_export_is_rejected() {
        let config: SketchConfig =
            serde_json::from_str(r#"{ "canvas_width": 70000, "canvas_height": 70000, "export_scale": 70000 }"#)
                .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = SketchConfig {
            canvas_height: MAX_EXPORT_SIDE,
            export_scale: 2,
            ..SketchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SketchConfig {
            canvas_width: MAX_EXPORT_SIDE / 4,
            canvas_height: MAX_EXPORT_SIDE / 4,
            ..SketchConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_stamp_is_rejected() {
        let config = SketchConfig {
            stamp_size: f32::INFINITY,
            ..SketchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SketchConfig {
            stamp_size: MAX_EXPORT_GLYPH_SIZE,
            ..SketchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = SketchConfig::load_or_default(Path::new("does/not/exist.json"));
        assert_eq!(config, SketchConfig::default());
    }
}
