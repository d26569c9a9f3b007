use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use thiserror::Error;

use super::{FontId, TextMeasure};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Owns the loaded fonts.
///
/// Fonts are immutable after loading. The host owns the system and hands it to
/// `TextRenderer` each frame so glyphs can be rasterized on demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {} ({} glyphs)", id.0, self.fonts[id.0].glyph_count());
        Ok(id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Ascent and descent (descent negative) at `size`.
    pub(crate) fn vertical_metrics(&self, id: FontId, size: f32) -> (f32, f32) {
        self.get(id)
            .and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((size * 0.9, -size * 0.3))
    }

    /// Advance width of a single line laid out at `size * scale`, returned in
    /// logical pixels.
    ///
    /// Pass the renderer's raster scale so measured widths match the glyph
    /// positions the renderer produces in physical pixels.
    pub fn measure_scaled(&self, text: &str, id: FontId, size: f32, scale: f32) -> f32 {
        let Some(font) = self.get(id) else {
            return 0.0;
        };

        let scale = scale.max(0.01);
        let phys_size = size * scale;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, phys_size, 0));

        // Pen position after each glyph, not the bitmap's right edge.
        layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, phys_size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max)
            / scale
    }
}

impl TextMeasure for FontSystem {
    fn measure(&self, text: &str, font: FontId, size: f32) -> f32 {
        self.measure_scaled(text, font, size, 1.0)
    }

    fn line_height(&self, font: FontId, size: f32) -> f32 {
        let (ascent, descent) = self.vertical_metrics(font, size);
        ascent - descent
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(b"not a font").is_err());
        assert!(fs.is_empty());
    }

    #[test]
    fn missing_font_measures_zero() {
        let fs = FontSystem::new();
        assert_eq!(fs.measure("hello", FontId::DEFAULT, 14.0), 0.0);
        assert!(fs.line_height(FontId::DEFAULT, 10.0) > 0.0);
    }
}
