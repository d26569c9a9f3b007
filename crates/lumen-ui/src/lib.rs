//! Lumen UI: immediate-mode widgets on top of `lumen-engine`.
//!
//! There is no widget tree. Each frame the host builds a [`UiContext`] over a
//! fresh `DrawList` and calls the active scene, which calls widget functions
//! in paint order:
//!
//! ```rust,ignore
//! use lumen_ui::prelude::*;
//!
//! let mut ui = UiContext::new(&mut list, &measure, viewport, &theme, &mut state);
//! clear(&mut ui);
//! title(&mut ui, "Prediction", 24.0, 36.0);
//! text_input(&mut ui, "bmi", Rect::new(24.0, 80.0, 290.0, 34.0), &bmi.clone(), |v| bmi = v,
//!            &TextInputOptions::numeric());
//! if button(&mut ui, "go", Rect::new(24.0, 134.0, 140.0, 38.0), "Predict") {
//!     // start work, then `ui.request_redraw()` when it lands
//! }
//! let outcome = ui.finish();
//! ```
//!
//! Interaction facts for the frame live in [`UiState`]; the focused widget id is
//! the only thing that survives between frames.

pub mod context;
pub mod error;
pub mod geometry;
pub mod state;
pub mod theme;
pub mod widgets;

pub use context::{FrameOutcome, UiContext};
pub use error::UiError;
pub use state::{KeyQueue, KeySymbol, UiState};
pub use theme::{FontSpec, Theme};

/// Everything a scene needs.
pub mod prelude {
    pub use crate::context::{FrameOutcome, UiContext};
    pub use crate::error::UiError;
    pub use crate::geometry::{centered_text_origin, effective_radius, point_in_rect, RoundedRect};
    pub use crate::state::{KeyQueue, KeySymbol, UiState};
    pub use crate::theme::{FontSpec, Theme};
    pub use crate::widgets::{
        button, clear, code_block, label, label_colored, pill, table_header, table_row,
        text_input, title, TextInputOptions,
    };

    pub use lumen_engine::coords::{Rect, Vec2, Viewport};
    pub use lumen_engine::paint::Color;
    pub use lumen_engine::text::FontId;
}
