use lumen_engine::coords::{Rect, Vec2};
use lumen_engine::text::TextBaseline;

use crate::context::UiContext;
use crate::geometry::RoundedRect;

use super::outline;

pub const CODE_RADIUS: f32 = 10.0;
pub const CODE_PADDING: f32 = 10.0;
pub const CODE_LINE_HEIGHT: f32 = 18.0;

/// Lines a block of `height` shows: `floor(height / CODE_LINE_HEIGHT) - 1`,
/// never negative. The last slot is bottom padding.
#[inline]
pub fn visible_lines(height: f32) -> usize {
    let n = (height / CODE_LINE_HEIGHT).floor() - 1.0;
    if n > 0.0 { n as usize } else { 0 }
}

/// Read-only monospace panel. Lines that do not fit are dropped; long lines
/// are clipped at the rounded border, not wrapped.
pub fn code_block(ui: &mut UiContext<'_>, text: &str, rect: Rect) {
    let theme = ui.theme;
    let font = theme.code_font;
    let shape = RoundedRect::new(rect, CODE_RADIUS);

    let list = ui.surface();
    list.push_rounded_rect(shape.rect, shape.radius, Some(theme.code_bg), outline(theme.border));

    list.with_clip(shape.clip(), |list| {
        // Anchor of the first line's middle.
        let top = rect.origin.y + CODE_PADDING + 8.0;
        for (i, line) in text.split('\n').take(visible_lines(rect.size.y)).enumerate() {
            if line.is_empty() {
                continue;
            }
            list.push_text(
                line,
                font.font,
                font.size,
                theme.subtext,
                Vec2::new(rect.origin.x + CODE_PADDING, top + i as f32 * CODE_LINE_HEIGHT),
                TextBaseline::Middle,
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::harness::Harness;

    fn many_lines(n: usize) -> String {
        (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn capacity_formula() {
        assert_eq!(visible_lines(300.0), 15);
        assert_eq!(visible_lines(36.0), 1);
        assert_eq!(visible_lines(35.0), 0);
        assert_eq!(visible_lines(0.0), 0);
        assert_eq!(visible_lines(-40.0), 0);
    }

    #[test]
    fn never_draws_more_than_capacity() {
        let mut h = Harness::new();
        for height in [20.0, 54.0, 100.0, 300.0] {
            h.frame(|ui| code_block(ui, &many_lines(40), Rect::new(0.0, 0.0, 400.0, height)));
            let drawn = h.texts().len();
            assert!(drawn as f32 <= ((height / 18.0).floor() - 1.0).max(0.0), "height {height}");
            assert_eq!(drawn, visible_lines(height));
        }
    }

    #[test]
    fn short_text_draws_every_line() {
        let mut h = Harness::new();
        h.frame(|ui| code_block(ui, "{\n  \"a\": 1\n}", Rect::new(344.0, 80.0, 600.0, 300.0)));
        let texts = h.texts();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].origin, Vec2::new(354.0, 80.0 + 10.0 + 8.0));
        assert_eq!(texts[2].origin.y, 80.0 + 10.0 + 2.0 * 18.0 + 8.0);
    }

    #[test]
    fn lines_are_clipped_to_block() {
        let mut h = Harness::new();
        let r = Rect::new(10.0, 10.0, 50.0, 100.0);
        h.frame(|ui| code_block(ui, "a rather long line of json", r));
        let clipped = h
            .list
            .items()
            .iter()
            .filter(|i| i.cmd.as_text().is_some())
            .all(|i| i.clip.map(|c| c.rect) == Some(r));
        assert!(clipped);
    }
}
