use lumen_engine::coords::{Rect, Vec2, Viewport};
use lumen_engine::paint::Color;
use lumen_engine::text::TextBaseline;

use crate::context::UiContext;
use crate::geometry::RoundedRect;

use super::outline;

pub const PILL_PADDING_X: f32 = 8.0;
pub const PILL_HEIGHT: f32 = 22.0;
pub const PILL_RADIUS: f32 = 10.0;

/// Fills the whole surface with the background color.
pub fn clear(ui: &mut UiContext<'_>) {
    let rect = Viewport::new(ui.width, ui.height).rect();
    let bg = ui.theme.bg;
    ui.surface().push_solid_rect(rect, bg);
}

/// Large heading, vertically centred on `y`.
pub fn title(ui: &mut UiContext<'_>, text: &str, x: f32, y: f32) {
    let theme = ui.theme;
    let font = theme.title_font;
    ui.surface().push_text(text, font.font, font.size, theme.text, Vec2::new(x, y), TextBaseline::Middle);
}

/// Body text in the secondary color.
pub fn label(ui: &mut UiContext<'_>, text: &str, x: f32, y: f32) {
    let color = ui.theme.subtext;
    label_colored(ui, text, x, y, color);
}

pub fn label_colored(ui: &mut UiContext<'_>, text: &str, x: f32, y: f32, color: Color) {
    let font = ui.theme.body_font;
    ui.surface().push_text(text, font.font, font.size, color, Vec2::new(x, y), TextBaseline::Middle);
}

/// Bordered tag centred on `y`. Returns its width,
/// `measured text width + 2 * PILL_PADDING_X`, for placing what follows.
pub fn pill(ui: &mut UiContext<'_>, text: &str, x: f32, y: f32) -> f32 {
    let theme = ui.theme;
    let font = theme.body_font;
    let w = ui.text_width(text, font) + PILL_PADDING_X * 2.0;
    let shape = RoundedRect::new(Rect::new(x, y - PILL_HEIGHT * 0.5, w, PILL_HEIGHT), PILL_RADIUS);

    let list = ui.surface();
    list.push_rounded_rect(shape.rect, shape.radius, Some(theme.panel), outline(theme.border));
    list.push_text(
        text,
        font.font,
        font.size,
        theme.subtext,
        Vec2::new(x + PILL_PADDING_X, y),
        TextBaseline::Middle,
    );
    w
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::harness::Harness;
    use lumen_engine::scene::DrawCmd;

    #[test]
    fn clear_covers_viewport() {
        let mut h = Harness::new();
        h.frame(|ui| clear(ui));
        match &h.list.items()[0].cmd {
            DrawCmd::Rect(r) => {
                assert_eq!(r.rect, Rect::new(0.0, 0.0, 1024.0, 768.0));
                assert_eq!(r.color, h.theme.bg);
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn title_uses_title_font_and_middle_baseline() {
        let mut h = Harness::new();
        h.frame(|ui| title(ui, "Ops", 24.0, 36.0));
        let t = h.texts()[0];
        assert_eq!(t.size, 28.0);
        assert_eq!(t.baseline, TextBaseline::Middle);
        assert_eq!(t.origin, Vec2::new(24.0, 36.0));
    }

    #[test]
    fn label_defaults_to_subtext() {
        let mut h = Harness::new();
        h.frame(|ui| label(ui, "bmi", 24.0, 66.0));
        assert_eq!(h.texts()[0].color, h.theme.subtext);
    }

    #[test]
    fn pill_sizes_to_text_plus_padding() {
        let mut h = Harness::new();
        // 10 chars * 7px = 70px of text.
        let (w, _) = h.frame(|ui| pill(ui, "Canvas UI!", 28.0, 110.0));
        assert_eq!(w, 70.0 + 16.0);

        let bg = h.rounded()[0];
        assert_eq!(bg.rect, Rect::new(28.0, 99.0, 86.0, 22.0));
        assert_eq!(bg.radius, 10.0);
        assert!(bg.stroke.is_some());
        assert_eq!(h.texts()[0].origin, Vec2::new(36.0, 110.0));
    }
}
