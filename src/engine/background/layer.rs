//! An element's own background, ignoring everything behind it.

use super::error::BackgroundError;
use crate::engine::bridge::{StyleProperty, StyleQuery};
use crate::engine::css::values::{Color, ColorValue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalBackground {
    /// `a = 1`
    Opaque(Color),
    /// `0 < a < 1`
    Translucent(Color),
    /// `a = 0`; contributes nothing but does not stop the walk.
    Transparent,
    /// Image background, cannot be reduced to a flat color.
    Indeterminate,
}

impl LocalBackground {
    pub fn classify(color: Color) -> Self {
        if color.is_opaque() {
            LocalBackground::Opaque(color)
        } else if color.is_transparent() {
            LocalBackground::Transparent
        } else {
            LocalBackground::Translucent(color)
        }
    }

    /// Color pushed on the compositing stack; `None` when indeterminate.
    pub fn color(&self) -> Option<Color> {
        match *self {
            LocalBackground::Opaque(c) | LocalBackground::Translucent(c) => Some(c),
            LocalBackground::Transparent => Some(Color::TRANSPARENT),
            LocalBackground::Indeterminate => None,
        }
    }
}

/// Reads background-image, background-color and opacity of `element`.
pub fn resolve_local<H>(host: &H, element: &H::Element) -> Result<LocalBackground, BackgroundError>
where
    H: StyleQuery + ?Sized,
{
    let image = host.computed_value(element, StyleProperty::BackgroundImage);
    if has_background_image(&image) {
        return Ok(LocalBackground::Indeterminate);
    }

    let text = host.computed_value(element, StyleProperty::BackgroundColor);
    let color = ColorValue::parse(&text)
        .map_err(|source| BackgroundError::InvalidColor {
            property: StyleProperty::BackgroundColor,
            text: text.clone(),
            source,
        })?
        .to_color();

    let opacity = parse_opacity(&host.computed_value(element, StyleProperty::Opacity))?;

    Ok(LocalBackground::classify(color.scale_alpha(opacity)))
}

/// True for an image background or a fully opaque color.
pub fn is_opaque<H>(host: &H, element: &H::Element) -> Result<bool, BackgroundError>
where
    H: StyleQuery + ?Sized,
{
    Ok(matches!(
        resolve_local(host, element)?,
        LocalBackground::Opaque(_) | LocalBackground::Indeterminate
    ))
}

fn has_background_image(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case("none")
}

fn parse_opacity(text: &str) -> Result<f32, BackgroundError> {
    let trimmed = text.trim();
    let value = match trimmed.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f32>().map(|v| v / 100.0),
        None => trimmed.parse::<f32>(),
    };
    match value {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(BackgroundError::InvalidOpacity(text.to_string())),
    }
}
