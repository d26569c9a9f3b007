//! Stateless geometry helpers shared by the widgets.

use lumen_engine::coords::{Rect, Vec2};
use lumen_engine::scene::ClipRegion;
use lumen_engine::text::TextMeasure;

use crate::theme::FontSpec;

/// Closed-interval hit test: every edge of `rect` counts as inside.
///
/// The rectangle is the exact target; no slop is added.
#[inline]
pub fn point_in_rect(p: Vec2, rect: Rect) -> bool {
    rect.contains_inclusive(p)
}

/// Corner radius actually drawn for `rect`: `min(radius, w / 2, h / 2)`.
#[inline]
pub fn effective_radius(rect: Rect, radius: f32) -> f32 {
    rect.clamp_radius(radius)
}

/// Rectangle with its clamped corner radius.
///
/// Fill, stroke and clip of one widget all come from the same value so the
/// outline never drifts from the fill.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f32,
}

impl RoundedRect {
    #[inline]
    pub fn new(rect: Rect, radius: f32) -> Self {
        Self { rect, radius: effective_radius(rect, radius) }
    }

    #[inline]
    pub fn clip(self) -> ClipRegion {
        ClipRegion::new(self.rect, self.radius)
    }
}

/// Origin for `text` centred in `rect`, for a middle-anchored baseline.
///
/// Text wider than `rect` starts left of it.
pub fn centered_text_origin(
    measure: &dyn TextMeasure,
    text: &str,
    font: FontSpec,
    rect: Rect,
) -> Vec2 {
    let tw = measure.measure(text, font.font, font.size);
    Vec2::new(
        rect.origin.x + (rect.size.x - tw) * 0.5,
        rect.origin.y + rect.size.y * 0.5,
    )
}
