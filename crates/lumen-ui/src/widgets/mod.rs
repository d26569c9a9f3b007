//! Widget primitives.
//!
//! Every widget is a plain function of the frame's [`UiContext`](crate::UiContext)
//! plus its geometry and content. Positions are absolute logical pixels; text
//! is anchored at its vertical middle.

mod button;
mod code_block;
mod table;
mod text;
mod text_input;

pub use button::{button, BUTTON_RADIUS};
pub use code_block::{code_block, visible_lines, CODE_LINE_HEIGHT, CODE_PADDING, CODE_RADIUS};
pub use table::{table_header, table_row, CELL_PADDING, ROW_HEIGHT, ROW_RADIUS};
pub use text::{clear, label, label_colored, pill, title, PILL_HEIGHT, PILL_PADDING_X, PILL_RADIUS};
pub use text_input::{text_input, TextInputOptions, INPUT_PADDING, INPUT_RADIUS};

use lumen_engine::paint::Color;
use lumen_engine::scene::Stroke;

/// Outline width used by every bordered widget.
pub(crate) const OUTLINE: f32 = 1.0;

#[inline]
pub(crate) fn outline(color: Color) -> Option<Stroke> {
    Some(Stroke::new(OUTLINE, color))
}

#[cfg(test)]
pub(crate) mod harness {
    use lumen_engine::coords::Viewport;
    use lumen_engine::scene::{DrawList, RoundedRectCmd, TextCmd};
    use lumen_engine::text::FixedAdvance;

    use crate::context::{FrameOutcome, UiContext};
    use crate::state::UiState;
    use crate::theme::Theme;

    /// One UI surface driven frame by frame, measured with 0.5em advances.
    pub(crate) struct Harness {
        pub list: DrawList,
        pub measure: FixedAdvance,
        pub theme: Theme,
        pub state: UiState,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                list: DrawList::new(),
                measure: FixedAdvance::default(),
                theme: Theme::dark(),
                state: UiState::default(),
            }
        }

        pub fn frame<R>(&mut self, f: impl FnOnce(&mut UiContext<'_>) -> R) -> (R, FrameOutcome) {
            self.list.clear();
            let mut ui = UiContext::new(
                &mut self.list,
                &self.measure,
                Viewport::new(1024.0, 768.0),
                &self.theme,
                &mut self.state,
            );
            let r = f(&mut ui);
            (r, ui.finish())
        }

        pub fn texts(&self) -> Vec<&TextCmd> {
            self.list.items().iter().filter_map(|i| i.cmd.as_text()).collect()
        }

        pub fn rounded(&self) -> Vec<&RoundedRectCmd> {
            self.list.items().iter().filter_map(|i| i.cmd.as_rounded_rect()).collect()
        }
    }
}
