//! Fonts and text measurement.
//!
//! UI code measures text through [`TextMeasure`] so it can run against a real
//! [`FontSystem`] or against [`FixedAdvance`] when no font is available.

mod font_system;

pub use font_system::{FontLoadError, FontSystem};

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// The first font loaded. Draw commands referencing it fall back to
    /// nothing when no font was loaded at all.
    pub const DEFAULT: FontId = FontId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vertical anchor of a text run's `origin.y`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextBaseline {
    /// `y` is the top of the line box.
    #[default]
    Top,
    /// `y` is the vertical centre of the line box.
    Middle,
}

impl TextBaseline {
    /// Offset from the anchor to the top of a line box of `line_height`.
    #[inline]
    pub fn top_offset(self, line_height: f32) -> f32 {
        match self {
            TextBaseline::Top => 0.0,
            TextBaseline::Middle => -line_height * 0.5,
        }
    }
}

/// Width and line metrics of single-line text, in logical pixels.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: FontId, size: f32) -> f32;

    /// Ascent minus descent at `size` (no line gap).
    fn line_height(&self, font: FontId, size: f32) -> f32;
}

/// Monospace approximation: every char advances `advance_em * size`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedAdvance {
    pub advance_em: f32,
}

impl FixedAdvance {
    #[inline]
    pub const fn new(advance_em: f32) -> Self {
        Self { advance_em }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, _font: FontId, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance_em * size
    }

    fn line_height(&self, _font: FontId, size: f32) -> f32 {
        size * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_advance_counts_chars_not_bytes() {
        let m = FixedAdvance::new(0.5);
        assert_eq!(m.measure("abcd", FontId::DEFAULT, 10.0), 20.0);
        assert_eq!(m.measure("éé", FontId::DEFAULT, 10.0), 10.0);
        assert_eq!(m.measure("", FontId::DEFAULT, 10.0), 0.0);
    }

    #[test]
    fn middle_baseline_lifts_by_half_line() {
        assert_eq!(TextBaseline::Middle.top_offset(20.0), -10.0);
        assert_eq!(TextBaseline::Top.top_offset(20.0), 0.0);
    }
}
