use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

use super::Stroke;

/// Rounded rectangle with optional fill and stroke.
///
/// `radius` is the effective radius, clamped once at construction so fill and
/// stroke trace the same outline.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RoundedRectCmd {
    #[inline]
    pub fn new(rect: Rect, radius: f32, fill: Option<Color>, stroke: Option<Stroke>) -> Self {
        Self { radius: rect.clamp_radius(radius), rect, fill, stroke }
    }
}

impl DrawList {
    #[inline]
    pub fn push_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        self.push(DrawCmd::RoundedRect(RoundedRectCmd::new(rect, radius, fill, stroke)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_clamped_once_for_fill_and_stroke() {
        let cmd = RoundedRectCmd::new(
            Rect::new(0.0, 0.0, 200.0, 12.0),
            10.0,
            Some(Color::transparent()),
            Some(Stroke::new(1.0, Color::transparent())),
        );
        assert_eq!(cmd.radius, 6.0);
    }
}
