//! CSS color values and the alpha compositing used to flatten backgrounds.
//!
//! 色は `(r, g, b, a)` の不変値で、r/g/b は 0–255、a は 0–1。

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Alpha values within this distance of 1 are treated as fully opaque.
pub const ALPHA_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// アルファは [0, 1] に丸める（NaN は 0 扱い）
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn a(&self) -> f32 {
        self.a
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0 - ALPHA_EPSILON
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Color::new(self.r, self.g, self.b, a)
    }

    /// Parses computed color text, mapping `transparent` to `(0, 0, 0, 0)`.
    pub fn parse(text: &str) -> Result<Color, ColorParseError> {
        ColorValue::parse(text).map(ColorValue::to_color)
    }

    /// Folds an independent opacity multiplier into the alpha channel.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is outside `[0, 1]`. Callers are expected to have
    /// validated the opacity they got from the style interface.
    pub fn scale_alpha(self, factor: f32) -> Color {
        assert!(
            (0.0..=1.0).contains(&factor),
            "opacity factor out of range: {factor}"
        );
        Color::new(self.r, self.g, self.b, self.a * factor)
    }

    /// `foreground` over `background`.
    ///
    /// ```text
    /// a' = fgA + bgA * (1 - fgA)
    /// c' = (fgC * fgA + bgC * bgA * (1 - fgA)) / a'
    /// ```
    ///
    /// Channels are rounded half away from zero. When `a'` is zero the result
    /// is `(0, 0, 0, 0)`. Not commutative.
    pub fn composite(foreground: Color, background: Color) -> Color {
        let fg_a = foreground.a;
        let bg_a = background.a;
        let a = fg_a + bg_a * (1.0 - fg_a);
        if a <= 0.0 {
            return Color::TRANSPARENT;
        }

        let blend = |fg: u8, bg: u8| -> u8 {
            let c = (fg as f32 * fg_a + bg as f32 * bg_a * (1.0 - fg_a)) / a;
            c.round().clamp(0.0, 255.0) as u8
        };

        Color::new(
            blend(foreground.r, background.r),
            blend(foreground.g, background.g),
            blend(foreground.b, background.b),
            a,
        )
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Result of parsing a computed `background-color`.
///
/// `transparent` is kept distinct from an explicit `rgba(0, 0, 0, 0)` so the
/// keyword never has to be compared as a raw string further up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    NoColorSpecified,
    Rgba(Color),
}

impl ColorValue {
    pub fn parse(text: &str) -> Result<ColorValue, ColorParseError> {
        let s = text.trim();

        if s.eq_ignore_ascii_case("transparent") {
            return Ok(ColorValue::NoColorSpecified);
        }

        if s.starts_with('#') {
            return parse_hex(s).map(ColorValue::Rgba);
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb(") || lower.starts_with("rgba(") {
            return parse_rgb(s).map(ColorValue::Rgba);
        }

        Err(ColorParseError::InvalidFormat(s.to_string()))
    }

    pub fn to_color(self) -> Color {
        match self {
            ColorValue::NoColorSpecified => Color::TRANSPARENT,
            ColorValue::Rgba(c) => c,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
    #[error("invalid color format: {0}")]
    InvalidFormat(String),
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid color component: {0}")]
    InvalidComponent(String),
}

/// #RGB, #RGBA, #RRGGBB, #RRGGBBAA
fn parse_hex(s: &str) -> Result<Color, ColorParseError> {
    let err = || ColorParseError::InvalidHex(s.to_string());
    // from_str_radix は先頭の `+` を許すので、桁は自前で確認する
    let hex = s.strip_prefix('#').ok_or_else(err)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err());
    }

    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).map_err(|_| err());
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

    match hex.len() {
        3 => Ok(Color::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Ok(Color::new(
            short(0)?,
            short(1)?,
            short(2)?,
            short(3)? as f32 / 255.0,
        )),
        6 => Ok(Color::rgb(long(0)?, long(2)?, long(4)?)),
        8 => Ok(Color::new(
            long(0)?,
            long(2)?,
            long(4)?,
            long(6)? as f32 / 255.0,
        )),
        _ => Err(err()),
    }
}

/// rgb()/rgba(), comma separated or space separated with `/ alpha`
fn parse_rgb(s: &str) -> Result<Color, ColorParseError> {
    let open = s
        .find('(')
        .ok_or_else(|| ColorParseError::InvalidFormat(s.to_string()))?;
    let close = s
        .rfind(')')
        .filter(|&close| close > open && s[close + 1..].trim().is_empty())
        .ok_or_else(|| ColorParseError::InvalidFormat(s.to_string()))?;
    let inner = &s[open + 1..close];

    let parts: Vec<&str> = if inner.contains(',') {
        inner.split(',').map(str::trim).collect()
    } else {
        inner
            .split(|c: char| c.is_whitespace() || c == '/')
            .filter(|p| !p.is_empty())
            .collect()
    };

    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorParseError::InvalidFormat(s.to_string()));
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => parse_alpha(alpha)?,
        None => 1.0,
    };

    Ok(Color::new(r, g, b, a))
}

/// 0–255 の数値、または 0–100%
fn parse_channel(s: &str) -> Result<u8, ColorParseError> {
    let value = match s.strip_suffix('%') {
        Some(percent) => parse_number(percent, s)? / 100.0 * 255.0,
        None => parse_number(s, s)?,
    };
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: &str) -> Result<f32, ColorParseError> {
    let value = match s.strip_suffix('%') {
        Some(percent) => parse_number(percent, s)? / 100.0,
        None => parse_number(s, s)?,
    };
    Ok(value.clamp(0.0, 1.0))
}

fn parse_number(num: &str, original: &str) -> Result<f32, ColorParseError> {
    num.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorParseError::InvalidComponent(original.to_string()))
}
