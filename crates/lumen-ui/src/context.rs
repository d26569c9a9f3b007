use std::collections::HashSet;

use lumen_engine::coords::Viewport;
use lumen_engine::scene::DrawList;
use lumen_engine::text::TextMeasure;

use crate::error::UiError;
use crate::state::UiState;
use crate::theme::{FontSpec, Theme};

/// Everything a widget needs for one frame.
///
/// Built by the host over a cleared `DrawList`, passed by `&mut` to the scene
/// and every widget, then consumed by [`finish`](Self::finish).
pub struct UiContext<'a> {
    surface: &'a mut DrawList,
    measure: &'a dyn TextMeasure,
    /// Surface size in logical pixels.
    pub width: f32,
    pub height: f32,
    pub theme: &'a Theme,
    pub state: &'a mut UiState,

    redraw: bool,
    focusable_ids: HashSet<String>,
    duplicate_ids: Vec<String>,
}

impl<'a> UiContext<'a> {
    pub fn new(
        surface: &'a mut DrawList,
        measure: &'a dyn TextMeasure,
        viewport: Viewport,
        theme: &'a Theme,
        state: &'a mut UiState,
    ) -> Self {
        Self {
            surface,
            measure,
            width: viewport.width,
            height: viewport.height,
            theme,
            state,
            redraw: false,
            focusable_ids: HashSet::new(),
            duplicate_ids: Vec::new(),
        }
    }

    #[inline]
    pub fn surface(&mut self) -> &mut DrawList {
        &mut *self.surface
    }

    #[inline]
    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure
    }

    #[inline]
    pub fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        self.measure.measure(text, font.font, font.size)
    }

    /// Asks the host for another frame after this one.
    #[inline]
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Records a focusable widget id. A second use in the same frame is
    /// reported through [`FrameOutcome`].
    pub(crate) fn register_focusable(&mut self, id: &str) {
        if !self.focusable_ids.insert(id.to_string()) && !self.duplicate_ids.iter().any(|d| d == id) {
            log::debug!("duplicate focusable widget id `{id}`");
            self.duplicate_ids.push(id.to_string());
        }
    }

    pub fn finish(self) -> FrameOutcome {
        FrameOutcome {
            redraw: self.redraw,
            duplicate_ids: self.duplicate_ids,
        }
    }
}

/// What a frame asks of the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Draw another frame even if no input arrives.
    pub redraw: bool,
    /// Focusable ids registered more than once, in first-repeat order.
    pub duplicate_ids: Vec<String>,
}

impl FrameOutcome {
    pub fn check(&self) -> Result<(), UiError> {
        match self.duplicate_ids.first() {
            Some(id) => Err(UiError::DuplicateWidgetId(id.clone())),
            None => Ok(()),
        }
    }
}
