use thiserror::Error;

/// Errors raised while loading or validating a [`crate::config::SketchConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Errors raised when a tool parameter is refused at the tool-state boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Stroke width must be at least 1")]
    InvalidWidth,

    #[error("Glyph identifier must not be empty")]
    EmptyGlyph,
}

/// Errors that can occur while exporting the canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),

    #[error("Export of {width}x{height} canvas at {scale}x exceeds {max} pixels per side")]
    TooLarge { width: u32, height: u32, scale: u32, max: u32 },
}

/// Any error the crate surfaces to its host
#[derive(Debug, Error)]
pub enum SketchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for host-facing operations
pub type SketchResult<T> = Result<T, SketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::SketchConfig;
    use crate::tool::ToolState;

    fn refuse_width() -> SketchResult<()> {
        ToolState::new(&SketchConfig::default()).select_stroke_width(0)?;
        Ok(())
    }

    fn refuse_config() -> SketchResult<()> {
        let config = SketchConfig {
            export_scale: 0,
            ..SketchConfig::default()
        };
        config.validate()?;
        Ok(())
    }

    #[test]
    fn test_leaf_errors_convert_with_question_mark() {
        assert!(matches!(refuse_width(), Err(SketchError::Tool(ToolError::InvalidWidth))));
        assert!(matches!(refuse_config(), Err(SketchError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_wrapped_error_keeps_leaf_message() {
        let err = SketchError::from(ToolError::EmptyGlyph);
        assert_eq!(err.to_string(), "Glyph identifier must not be empty");
    }
}
