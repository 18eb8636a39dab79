use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use super::Surface;

/// Live canvas target: an egui painter clipped to the canvas rect, with
/// surface coordinates measured from its top-left corner
pub struct PainterSurface {
    painter: Painter,
    rect: Rect,
}

impl PainterSurface {
    pub fn new(painter: &Painter, rect: Rect) -> Self {
        Self {
            painter: painter.with_clip_rect(rect),
            rect,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.rect.min + pos.to_vec2()
    }
}

impl Surface for PainterSurface {
    fn fill(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let radius = width / 2.0;
        let screen: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();

        if screen.len() > 1 {
            self.painter.add(Shape::line(screen.clone(), Stroke::new(width, color)));
        }
        // egui lines have butt caps and mitre-less joins; round them off
        if screen.len() == 1 || width > 2.0 {
            for point in screen {
                self.painter.circle_filled(point, radius, color);
            }
        }
    }

    fn glyph(&mut self, text: &str, center: Pos2, size: f32, rotation: f32, color: Color32) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), FontId::proportional(size), color);
        // Text shapes rotate around their top-left corner
        let half = galley.size() / 2.0;
        let top_left = self.to_screen(center) - Rot2::from_angle(rotation) * half;
        self.painter
            .add(TextShape::new(top_left, galley, color).with_angle(rotation));
    }
}
