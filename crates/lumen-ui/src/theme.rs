use lumen_engine::paint::Color;
use lumen_engine::text::FontId;

/// Font face and pixel size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontSpec {
    pub font: FontId,
    pub size: f32,
}

impl FontSpec {
    #[inline]
    pub const fn new(font: FontId, size: f32) -> Self {
        Self { font, size }
    }
}

/// Palette and fonts shared by every widget. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub bg: Color,
    pub panel: Color,
    pub text: Color,
    pub subtext: Color,
    pub accent: Color,
    pub danger: Color,
    pub border: Color,
    pub input_bg: Color,
    pub input_border: Color,
    pub input_focus: Color,
    pub code_bg: Color,

    /// Button fill under the pointer.
    pub hover_fill: Color,
    pub row: Color,
    pub row_stripe: Color,
    pub error_text: Color,

    pub title_font: FontSpec,
    pub body_font: FontSpec,
    pub code_font: FontSpec,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::from_rgb_hex(0x0f1221),
            panel: Color::from_rgb_hex(0x161a2a),
            text: Color::from_rgb_hex(0xeaf0ff),
            subtext: Color::from_rgb_hex(0xa5b0cf),
            accent: Color::from_rgb_hex(0x77b5ff),
            danger: Color::from_rgb_hex(0xff6b6b),
            border: Color::from_rgb_hex(0x27304b),
            input_bg: Color::from_rgb_hex(0x0f1424),
            input_border: Color::from_rgb_hex(0x2c3552),
            input_focus: Color::from_rgb_hex(0x80c0ff),
            code_bg: Color::from_rgb_hex(0x0c0f1c),

            hover_fill: Color::from_rgb_hex(0x1f2640),
            row: Color::from_rgb_hex(0x101527),
            row_stripe: Color::from_rgb_hex(0x141a2c),
            error_text: Color::from_rgb_hex(0xff8e8e),

            title_font: FontSpec::new(FontId::DEFAULT, 28.0),
            body_font: FontSpec::new(FontId::DEFAULT, 14.0),
            code_font: FontSpec::new(FontId::DEFAULT, 14.0),
        }
    }

    /// Same palette with specific faces for titles, body text and code.
    pub fn with_fonts(mut self, title: FontId, body: FontId, code: FontId) -> Self {
        self.title_font.font = title;
        self.body_font.font = body;
        self.code_font.font = code;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_is_opaque() {
        let t = Theme::dark();
        for c in [t.bg, t.panel, t.text, t.border, t.code_bg, t.row, t.row_stripe] {
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn with_fonts_keeps_sizes() {
        let t = Theme::dark().with_fonts(FontId::DEFAULT, FontId::DEFAULT, FontId::DEFAULT);
        assert_eq!(t.title_font.size, 28.0);
        assert_eq!(t.body_font.size, 14.0);
    }
}
