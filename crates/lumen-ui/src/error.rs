use thiserror::Error;

/// Caller-contract violations detected while running a frame.
///
/// Widgets never fail mid-frame; these are collected and reported by
/// [`FrameOutcome::check`](crate::FrameOutcome::check) once the frame is done.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UiError {
    #[error("widget id `{0}` was used by more than one focusable widget in a frame")]
    DuplicateWidgetId(String),
}
