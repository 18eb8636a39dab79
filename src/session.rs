use egui::{Pos2, Vec2};

use crate::config::SketchConfig;
use crate::error::{ExportError, ToolError};
use crate::export::{Background, ExportedImage, Exporter};
use crate::history::{MarkHandle, MarkHistory};
use crate::input::PointerEvent;
use crate::tool::ToolState;

/// Whether a drag is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Drawing { handle: MarkHandle },
}

/// A drawing surface's complete state: tool settings, mark history and the
/// pointer interaction in progress.
///
/// The host UI owns one session, feeds it pointer and tool events in arrival
/// order, and repaints when the history's change signal fires.
#[derive(Debug)]
pub struct DrawingSession {
    canvas_size: Vec2,
    tools: ToolState,
    history: MarkHistory,
    state: InteractionState,
    /// Last pointer position over the surface, cleared on leave
    hover: Option<Pos2>,
    exporter: Exporter,
}

impl DrawingSession {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            canvas_size: config.canvas_size(),
            tools: ToolState::new(config),
            history: MarkHistory::new(),
            state: InteractionState::Idle,
            hover: None,
            exporter: Exporter::new(config),
        }
    }

    /// Register a callback for the "state changed" signal
    pub fn subscribe(&self, handler: impl FnMut() + 'static) {
        self.history.subscribe(handler);
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn history(&self) -> &MarkHistory {
        &self.history
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, InteractionState::Drawing { .. })
    }

    /// Where to draw the tool preview, if the pointer is over the surface and
    /// no drag is in progress
    pub fn cursor_preview(&self) -> Option<Pos2> {
        match self.state {
            InteractionState::Idle => self.hover,
            InteractionState::Drawing { .. } => None,
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press(pos) => self.pointer_press(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Release(pos) => self.pointer_release(pos),
            PointerEvent::Enter => self.pointer_enter(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_press(&mut self, pos: Pos2) {
        self.finish_drawing();
        self.hover = Some(pos);
        let handle = self.history.begin_action(pos, &self.tools);
        self.state = InteractionState::Drawing { handle };
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.hover = Some(pos);
        match self.state {
            InteractionState::Drawing { handle } => self.history.extend_action(handle, pos),
            InteractionState::Idle => self.history.notify_changed(),
        }
    }

    /// Ends the drag. The release point itself is not added; the last move
    /// already delivered it.
    pub fn pointer_release(&mut self, pos: Pos2) {
        self.hover = Some(pos);
        if !self.finish_drawing() {
            log::debug!("Release at {:?} without a drag", pos);
        }
    }

    /// The preview reappears with the next move
    pub fn pointer_enter(&mut self) {
        log::debug!("Pointer entered surface");
    }

    /// Losing the pointer ends the drag where it is
    pub fn pointer_leave(&mut self) {
        self.finish_drawing();
        if self.hover.take().is_some() {
            self.history.notify_changed();
        }
    }

    pub fn select_stroke_width(&mut self, width: u32) -> Result<(), ToolError> {
        self.tools.select_stroke_width(width)
    }

    pub fn select_color(&mut self, rgb: [u8; 3]) {
        self.tools.select_color(rgb);
    }

    pub fn select_glyph(&mut self, glyph: &str) -> Result<(), ToolError> {
        self.tools.select_glyph(glyph)
    }

    pub fn register_custom_glyph(&mut self, glyph: &str) -> Result<(), ToolError> {
        self.tools.register_custom_glyph(glyph)
    }

    pub fn undo(&mut self) {
        self.finish_drawing();
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.finish_drawing();
        self.history.redo();
    }

    /// Not undoable; see [`MarkHistory::clear_all`]
    pub fn clear(&mut self) {
        self.finish_drawing();
        self.history.clear_all();
    }

    /// Rasterize the visible marks at the configured export scale and encode
    /// them as PNG. Works in any interaction state and changes nothing.
    pub fn export(&self, transparent_background: bool) -> Result<ExportedImage, ExportError> {
        let background = if transparent_background {
            Background::Transparent
        } else {
            Background::Opaque
        };
        self.exporter.export(self.history.snapshot(), background)
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Commit the open drag, if any. Returns whether one was open.
    fn finish_drawing(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            InteractionState::Drawing { handle } => {
                self.history.commit_action(handle);
                true
            }
            InteractionState::Idle => false,
        }
    }
}
