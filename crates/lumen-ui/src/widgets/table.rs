use lumen_engine::coords::{Rect, Vec2};
use lumen_engine::paint::Color;
use lumen_engine::text::TextBaseline;

use crate::context::UiContext;
use crate::geometry::RoundedRect;

use super::outline;

pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_RADIUS: f32 = 10.0;
pub const CELL_PADDING: f32 = 10.0;

/// Header band: panel fill, secondary text.
pub fn table_header<S: AsRef<str>>(
    ui: &mut UiContext<'_>,
    cols: &[S],
    x: f32,
    y: f32,
    w: f32,
    col_widths: &[f32],
) {
    let theme = ui.theme;
    band(ui, cols, x, y, w, col_widths, theme.panel, theme.subtext);
}

/// One body row. `stripe` picks the alternate background; callers decide
/// parity and advance `y` between rows.
pub fn table_row<S: AsRef<str>>(
    ui: &mut UiContext<'_>,
    cells: &[S],
    x: f32,
    y: f32,
    w: f32,
    col_widths: &[f32],
    stripe: bool,
) {
    let theme = ui.theme;
    let fill = if stripe { theme.row_stripe } else { theme.row };
    band(ui, cells, x, y, w, col_widths, fill, theme.text);
}

/// Cell `i` starts at `x + CELL_PADDING + sum(col_widths[..i])`. Cells
/// without a width, and widths without a cell, draw nothing.
#[allow(clippy::too_many_arguments)]
fn band<S: AsRef<str>>(
    ui: &mut UiContext<'_>,
    cells: &[S],
    x: f32,
    y: f32,
    w: f32,
    col_widths: &[f32],
    fill: Color,
    text: Color,
) {
    let theme = ui.theme;
    let font = theme.body_font;
    let shape = RoundedRect::new(Rect::new(x, y, w, ROW_HEIGHT), ROW_RADIUS);

    let list = ui.surface();
    list.push_rounded_rect(shape.rect, shape.radius, Some(fill), outline(theme.border));

    let mut cx = x + CELL_PADDING;
    for (cell, width) in cells.iter().zip(col_widths) {
        list.push_text(
            cell.as_ref(),
            font.font,
            font.size,
            text,
            Vec2::new(cx, y + ROW_HEIGHT * 0.5),
            TextBaseline::Middle,
        );
        cx += width;
    }
}
