use lumen_engine::coords::Rect;
use lumen_engine::text::TextBaseline;

use crate::context::UiContext;
use crate::geometry::{centered_text_origin, RoundedRect};

use super::outline;

pub const BUTTON_RADIUS: f32 = 10.0;

/// Push button with centred text. Returns `true` on the frame it is clicked.
///
/// A click counts when the primary button is released over `rect`, wherever
/// the press began. Hover only changes the colors. A rect with a zero or
/// negative extent draws nothing and is never clicked.
pub fn button(ui: &mut UiContext<'_>, id: &str, rect: Rect, text: &str) -> bool {
    if rect.is_empty() {
        return false;
    }
    let theme = ui.theme;
    let hover = ui.state.hovers(rect);
    let shape = RoundedRect::new(rect, BUTTON_RADIUS);

    let (fill, stroke) = if hover {
        (theme.hover_fill, theme.accent)
    } else {
        (theme.panel, theme.border)
    };

    let origin = centered_text_origin(ui.measure(), text, theme.body_font, rect);
    let list = ui.surface();
    list.push_rounded_rect(shape.rect, shape.radius, Some(fill), outline(stroke));
    list.push_text(
        text,
        theme.body_font.font,
        theme.body_font.size,
        theme.text,
        origin,
        TextBaseline::Middle,
    );

    let clicked = ui.state.clicked && hover;
    if clicked {
        log::debug!("button `{id}` clicked");
    }
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::harness::Harness;
    use lumen_engine::coords::Vec2;

    const R: Rect = Rect::new(24.0, 600.0, 140.0, 38.0);

    fn at(h: &mut Harness, x: f32, y: f32, clicked: bool) -> bool {
        h.state.pointer = Some(Vec2::new(x, y));
        h.state.clicked = clicked;
        h.frame(|ui| button(ui, "predict_btn", R, "Predict")).0
    }

    // ── click attribution ─────────────────────────────────────────────────

    #[test]
    fn click_inside_returns_true() {
        let mut h = Harness::new();
        assert!(at(&mut h, 50.0, 610.0, true));
    }

    #[test]
    fn click_on_edges_counts() {
        let mut h = Harness::new();
        assert!(at(&mut h, 24.0, 600.0, true));
        assert!(at(&mut h, 164.0, 638.0, true));
    }

    #[test]
    fn click_outside_returns_false() {
        let mut h = Harness::new();
        assert!(!at(&mut h, 165.0, 610.0, true));
        assert!(!at(&mut h, 50.0, 599.0, true));
    }

    #[test]
    fn hover_without_click_returns_false() {
        let mut h = Harness::new();
        assert!(!at(&mut h, 50.0, 610.0, false));
    }

    #[test]
    fn no_pointer_never_clicks() {
        let mut h = Harness::new();
        h.state.clicked = true;
        let (clicked, _) = h.frame(|ui| button(ui, "b", R, "x"));
        assert!(!clicked);
    }

    #[test]
    fn negative_extent_draws_nothing_and_never_clicks() {
        let mut h = Harness::new();
        h.state.pointer = Some(Vec2::new(75.0, 110.0));
        h.state.clicked = true;
        let (clicked, _) = h.frame(|ui| button(ui, "b", Rect::new(100.0, 100.0, -50.0, 30.0), "x"));
        assert!(!clicked);
        assert!(h.list.items().is_empty());
    }

    // ── paint ─────────────────────────────────────────────────────────────

    #[test]
    fn hover_changes_fill_and_stroke() {
        let mut h = Harness::new();
        at(&mut h, 50.0, 610.0, false);
        let hovered = h.rounded()[0].clone();
        at(&mut h, 500.0, 10.0, false);
        let idle = h.rounded()[0].clone();

        assert_eq!(hovered.fill, Some(h.theme.hover_fill));
        assert_eq!(idle.fill, Some(h.theme.panel));
        assert_eq!(hovered.stroke.map(|s| s.color), Some(h.theme.accent));
        assert_eq!(idle.stroke.map(|s| s.color), Some(h.theme.border));
    }

    #[test]
    fn text_is_centred() {
        let mut h = Harness::new();
        at(&mut h, 0.0, 0.0, false);
        // "Predict" = 7 * 7px = 49px.
        assert_eq!(h.texts()[0].origin, Vec2::new(24.0 + (140.0 - 49.0) / 2.0, 619.0));
    }
}
