#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod history;
pub mod input;
pub mod mark;
pub mod panels;
pub mod render;
pub mod session;
pub mod tool;

pub use app::SketchApp;
pub use config::SketchConfig;
pub use error::{ConfigError, ExportError, SketchError, SketchResult, ToolError};
pub use export::{Background, ExportedImage, Exporter};
pub use history::{MarkHandle, MarkHistory};
pub use input::{InputHandler, PointerEvent};
pub use mark::{Mark, MarkId, StampMark, StrokeMark};
pub use render::{Renderer, Surface};
pub use session::{DrawingSession, InteractionState};
pub use tool::{ToolMode, ToolState};
