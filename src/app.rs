use egui::{Key, KeyboardShortcut, Modifiers, Rect};

use crate::config::SketchConfig;
use crate::error::{SketchError, SketchResult};
use crate::export::ExportedImage;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::render::Renderer;
use crate::session::DrawingSession;

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
const REDO_SHIFT_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    },
    Key::Z,
);

/// Host UI around a [`DrawingSession`]
pub struct SketchApp {
    session: DrawingSession,
    renderer: Renderer,
    input: InputHandler,
    config: SketchConfig,
    /// Text box for custom stamp glyphs
    custom_glyph: String,
    transparent_export: bool,
    /// Color picker state, pushed to the session on change
    color: [u8; 3],
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let app = Self::with_config(config);

        let ctx = cc.egui_ctx.clone();
        app.session.subscribe(move || ctx.request_repaint());

        app
    }

    /// Build without a window, e.g. for tests
    pub fn with_config(config: SketchConfig) -> Self {
        Self {
            session: DrawingSession::new(&config),
            renderer: Renderer::new(config.background_color()),
            input: InputHandler::new(),
            color: config.default_color,
            custom_glyph: String::new(),
            transparent_export: false,
            status: None,
            config,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DrawingSession {
        &mut self.session
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn color_mut(&mut self) -> &mut [u8; 3] {
        &mut self.color
    }

    pub fn apply_color(&mut self) {
        self.session.select_color(self.color);
    }

    pub fn custom_glyph_mut(&mut self) -> &mut String {
        &mut self.custom_glyph
    }

    pub fn transparent_export_mut(&mut self) -> &mut bool {
        &mut self.transparent_export
    }

    pub fn select_stroke_width(&mut self, width: u32) {
        if let Err(err) = self.session.select_stroke_width(width) {
            self.report(err.into());
        }
    }

    pub fn select_glyph(&mut self, glyph: &str) {
        if let Err(err) = self.session.select_glyph(glyph) {
            self.report(err.into());
        }
    }

    /// Register whatever is in the custom glyph box
    pub fn register_custom_glyph(&mut self) {
        let glyph = std::mem::take(&mut self.custom_glyph);
        match self.session.register_custom_glyph(&glyph) {
            Ok(()) => log::info!("Registered custom glyph {:?}", glyph.trim()),
            Err(err) => self.report(err.into()),
        }
    }

    /// Export and write the PNG to the configured path
    pub fn export_to_file(&self) -> SketchResult<ExportedImage> {
        let image = self.session.export(self.transparent_export)?;
        image.save(&self.config.export_path)?;
        Ok(image)
    }

    /// [`Self::export_to_file`], reporting the outcome in the status line
    pub fn export(&mut self) {
        match self.export_to_file() {
            Ok(image) => {
                self.status = Some(format!(
                    "Exported {}x{} to {}",
                    image.width,
                    image.height,
                    self.config.export_path.display()
                ));
            }
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: SketchError) {
        match &err {
            SketchError::Tool(_) => log::warn!("{}", err),
            SketchError::Config(_) | SketchError::Export(_) => log::error!("{}", err),
        }
        self.status = Some(err.to_string());
    }

    /// Feed this frame's pointer events on the canvas to the session
    pub fn handle_input(&mut self, ctx: &egui::Context, response: &egui::Response, canvas_rect: Rect) {
        for event in self.input.process_input(ctx, response, canvas_rect) {
            log::trace!("{:?}", event);
            self.session.handle_pointer(event);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Check the shifted variant first; Ctrl+Z would swallow it otherwise
        let redo = ctx.input_mut(|i| i.consume_shortcut(&REDO_SHIFT_SHORTCUT) || i.consume_shortcut(&REDO_SHORTCUT));
        let undo = ctx.input_mut(|i| i.consume_shortcut(&UNDO_SHORTCUT));
        if redo {
            self.session.redo();
        }
        if undo {
            self.session.undo();
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
