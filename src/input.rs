use egui::{Context, Pos2, Rect, Response};

/// Pointer input in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Pos2),
    Move(Pos2),
    Release(Pos2),
    Enter,
    Leave,
}

/// Turns egui's per-frame pointer state into discrete [`PointerEvent`]s for
/// the canvas.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last pointer position inside the canvas, surface-local
    last_pos: Option<Pos2>,
    pressed_on_canvas: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's events for the canvas occupying `canvas_rect`
    pub fn process_input(&mut self, ctx: &Context, response: &Response, canvas_rect: Rect) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        let (latest, pressed, released) = ctx.input(|input| {
            (
                input.pointer.latest_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });

        let inside = latest.filter(|pos| canvas_rect.contains(*pos));
        let to_local = |pos: Pos2| (pos - canvas_rect.min).to_pos2();

        match (self.last_pos, inside) {
            (None, Some(pos)) => {
                events.push(PointerEvent::Enter);
                events.push(PointerEvent::Move(to_local(pos)));
            }
            (Some(last), Some(pos)) if last != to_local(pos) => {
                events.push(PointerEvent::Move(to_local(pos)));
            }
            (Some(_), None) => {
                events.push(PointerEvent::Leave);
                self.pressed_on_canvas = false;
            }
            _ => {}
        }
        self.last_pos = inside.map(to_local);

        if let Some(pos) = self.last_pos {
            if pressed && response.hovered() {
                events.push(PointerEvent::Press(pos));
                self.pressed_on_canvas = true;
            }
            if released && self.pressed_on_canvas {
                events.push(PointerEvent::Release(pos));
                self.pressed_on_canvas = false;
            }
        }

        events
    }
}
