use lumen_engine::coords::{Rect, Vec2};
use lumen_engine::text::TextBaseline;

use crate::context::UiContext;
use crate::geometry::RoundedRect;
use crate::state::KeySymbol;

use super::outline;

pub const INPUT_RADIUS: f32 = 8.0;
pub const INPUT_PADDING: f32 = 10.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputOptions {
    /// Shown in the secondary color while the value is empty.
    pub placeholder: Option<String>,
    /// Accept only ASCII digits, `.` and `-`.
    pub numeric: bool,
}

impl TextInputOptions {
    pub fn numeric() -> Self {
        Self { placeholder: None, numeric: true }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[inline]
    fn accepts(&self, c: char) -> bool {
        !self.numeric || c.is_ascii_digit() || c == '.' || c == '-'
    }
}

/// Single-line text field.
///
/// A click inside takes focus; a click elsewhere while focused drops it.
/// While focused, the frame's key edits the value: `Backspace` removes the
/// last character, a character is appended if the options accept it, named
/// keys do nothing. Every key seen while focused calls `set_value`, even
/// when the value is unchanged.
///
/// The key is applied if the field is focused when this widget runs, so the
/// click that blurs it does not stop that frame's key from landing. A field
/// that loses focus to an earlier widget in the same frame gets no key.
pub fn text_input(
    ui: &mut UiContext<'_>,
    id: &str,
    rect: Rect,
    value: &str,
    set_value: impl FnOnce(String),
    opts: &TextInputOptions,
) {
    ui.register_focusable(id);

    let theme = ui.theme;
    let hover = ui.state.hovers(rect);
    let focused = ui.state.is_focused(id);
    let shape = RoundedRect::new(rect, INPUT_RADIUS);

    let border = if focused {
        theme.input_focus
    } else if hover {
        theme.accent
    } else {
        theme.input_border
    };

    let (shown, color) = if value.is_empty() {
        (opts.placeholder.as_deref().unwrap_or(""), theme.subtext)
    } else {
        (value, theme.text)
    };

    let font = theme.body_font;
    let list = ui.surface();
    list.push_rounded_rect(shape.rect, shape.radius, Some(theme.input_bg), outline(border));
    if !shown.is_empty() {
        list.with_clip(shape.clip(), |list| {
            list.push_text(
                shown,
                font.font,
                font.size,
                color,
                Vec2::new(rect.origin.x + INPUT_PADDING, rect.origin.y + rect.size.y * 0.5),
                TextBaseline::Middle,
            );
        });
    }

    let state = &mut *ui.state;
    if state.clicked && hover {
        state.focused_id = Some(id.to_string());
    } else if state.clicked && focused {
        state.focused_id = None;
    }

    if !focused {
        return;
    }
    let Some(key) = &state.key else {
        return;
    };

    let mut out = value.to_string();
    match key {
        KeySymbol::Backspace => {
            out.pop();
        }
        KeySymbol::Char(c) if opts.accepts(*c) => out.push(*c),
        KeySymbol::Char(_) | KeySymbol::Named(_) => {}
    }
    set_value(out);
}
