use thiserror::Error;

/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
///
/// Surfaces are configured with an sRGB format, so constructors taking sRGB
/// input decode to linear before storing.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    #[error("color `{0}` must have 6 or 8 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied linear color from straight sRGB bytes.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        )
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (straight alpha, sRGB).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }

        let byte = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorParseError::BadDigit(s.to_string()))
        };

        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// `0xRRGGBB` literal, opaque. Used for compile-time palettes.
    #[inline]
    pub fn from_rgb_hex(rgb: u32) -> Self {
        Self::from_srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha linear components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// wgpu clear value. Premultiplied linear maps directly.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── from_srgb_u8 ──────────────────────────────────────────────────────

    #[test]
    fn white_and_black_are_exact() {
        assert_eq!(Color::from_srgb_u8(255, 255, 255, 255), Color::from_premul(1.0, 1.0, 1.0, 1.0));
        assert_eq!(Color::from_srgb_u8(0, 0, 0, 255), Color::from_premul(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn mid_grey_decodes_to_linear() {
        let c = Color::from_srgb_u8(128, 128, 128, 255);
        assert!(close(c.r, 0.2158), "got {}", c.r);
    }

    #[test]
    fn alpha_premultiplies() {
        let c = Color::from_srgb_u8(255, 255, 255, 0);
        assert_eq!(c, Color::transparent());
    }

    // ── from_hex ──────────────────────────────────────────────────────────

    #[test]
    fn hex_matches_bytes() {
        let a = Color::from_hex("#77b5ff").unwrap();
        let b = Color::from_srgb_u8(0x77, 0xb5, 0xff, 255);
        assert_eq!(a, b);
        assert_eq!(Color::from_rgb_hex(0x77b5ff), b);
    }

    #[test]
    fn hex_with_alpha() {
        let c = Color::from_hex("#ffffff80").unwrap();
        assert!(close(c.a, 128.0 / 255.0));
    }

    #[test]
    fn hex_errors() {
        assert!(matches!(Color::from_hex("77b5ff"), Err(ColorParseError::MissingHash(_))));
        assert!(matches!(Color::from_hex("#fff"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(Color::from_hex("#gg0000"), Err(ColorParseError::BadDigit(_))));
    }
}
