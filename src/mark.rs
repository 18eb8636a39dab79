use egui::{Color32, Pos2};

use crate::render::Surface;

/// Ink used for stamp glyphs; stamps carry no color of their own
pub const STAMP_INK: Color32 = Color32::BLACK;

/// Identifies a mark for the lifetime of a [`crate::history::MarkHistory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

/// Freehand line with the width and color captured when it was started
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeMark {
    points: Vec<Pos2>,
    width: u32,
    color: Color32,
}

impl StrokeMark {
    pub fn new(start: Pos2, width: u32, color: Color32) -> Self {
        Self {
            points: vec![start],
            width,
            color,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub(crate) fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }
}

/// A glyph placed at a point, rotated towards the drag that created it
#[derive(Debug, Clone, PartialEq)]
pub struct StampMark {
    glyph: String,
    position: Pos2,
    rotation: f32,
    size: f32,
}

impl StampMark {
    pub fn new(glyph: impl Into<String>, position: Pos2, size: f32) -> Self {
        Self {
            glyph: glyph.into(),
            position,
            rotation: 0.0,
            size,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Radians in (-π, π]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Point the stamp towards `target`. A drag back onto the placement point
    /// keeps the previous angle.
    pub(crate) fn aim_at(&mut self, target: Pos2) {
        let delta = target - self.position;
        if delta.x != 0.0 || delta.y != 0.0 {
            let angle = delta.y.atan2(delta.x);
            self.rotation = if angle <= -std::f32::consts::PI {
                std::f32::consts::PI
            } else {
                angle
            };
        }
    }
}

/// One undoable unit of drawn content
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Stroke(StrokeMark),
    Stamp(StampMark),
}

impl Mark {
    pub fn kind(&self) -> &'static str {
        match self {
            Mark::Stroke(_) => "stroke",
            Mark::Stamp(_) => "stamp",
        }
    }

    pub fn as_stroke(&self) -> Option<&StrokeMark> {
        match self {
            Mark::Stroke(stroke) => Some(stroke),
            Mark::Stamp(_) => None,
        }
    }

    pub fn as_stamp(&self) -> Option<&StampMark> {
        match self {
            Mark::Stamp(stamp) => Some(stamp),
            Mark::Stroke(_) => None,
        }
    }

    /// Continue the drag that owns this mark: strokes grow by one point,
    /// stamps re-aim at the pointer.
    pub(crate) fn extend(&mut self, point: Pos2) {
        match self {
            Mark::Stroke(stroke) => stroke.add_point(point),
            Mark::Stamp(stamp) => stamp.aim_at(point),
        }
    }

    /// Draw with the captured width, color and glyph
    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Mark::Stroke(stroke) => {
                surface.polyline(&stroke.points, stroke.width as f32, stroke.color);
            }
            Mark::Stamp(stamp) => {
                surface.glyph(
                    &stamp.glyph,
                    stamp.position,
                    stamp.size,
                    stamp.rotation,
                    STAMP_INK,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_stroke_starts_with_one_point() {
        let stroke = StrokeMark::new(Pos2::new(3.0, 4.0), 2, Color32::RED);
        assert_eq!(stroke.points(), &[Pos2::new(3.0, 4.0)]);
    }

    #[test]
    fn test_stamp_rotation_follows_drag() {
        let mut stamp = StampMark::new("x", Pos2::new(10.0, 10.0), 32.0);
        stamp.aim_at(Pos2::new(10.0, 20.0));
        assert!((stamp.rotation() - FRAC_PI_2).abs() < 1e-6);

        stamp.aim_at(Pos2::new(0.0, 10.0));
        assert!((stamp.rotation() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_stamp_keeps_angle_on_zero_vector() {
        let mut stamp = StampMark::new("x", Pos2::new(10.0, 10.0), 32.0);
        stamp.aim_at(Pos2::new(20.0, 20.0));
        let angle = stamp.rotation();
        stamp.aim_at(Pos2::new(10.0, 10.0));
        assert_eq!(stamp.rotation(), angle);
    }
}
