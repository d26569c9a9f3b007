use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command.
///
/// Adding a shape: new payload under `scene::shapes`, a variant here, and a
/// matching arm in `render::Renderer`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Text(TextCmd),
}

impl DrawCmd {
    #[inline]
    pub fn as_text(&self) -> Option<&TextCmd> {
        match self {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_rounded_rect(&self) -> Option<&RoundedRectCmd> {
        match self {
            DrawCmd::RoundedRect(r) => Some(r),
            _ => None,
        }
    }
}
