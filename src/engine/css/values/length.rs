//! CSS length values used by box offsets (`top`, `right`, `bottom`, `left`).

use std::fmt;

/// CSSの長さ単位を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// 絶対値 (px)
    Px(f32),
    /// 相対値 (em)
    Em(f32),
    /// パーセンテージ (%)
    Percent(f32),
    /// 自動 (auto)
    Auto,
}

impl Length {
    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    /// CSS文字列からLength
    ///
    /// A bare `0` is accepted as `0px`, anything unrecognised yields `None`.
    pub fn from_css(value: &str) -> Option<Length> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Some(Length::Auto);
        }
        if let Some(num) = value.strip_suffix("px") {
            return num.trim().parse::<f32>().ok().map(Length::Px);
        }
        if let Some(num) = value.strip_suffix("em") {
            return num.trim().parse::<f32>().ok().map(Length::Em);
        }
        if let Some(num) = value.strip_suffix('%') {
            return num.trim().parse::<f32>().ok().map(Length::Percent);
        }
        match value.parse::<f32>() {
            Ok(v) if v == 0.0 => Some(Length::Px(0.0)),
            _ => None,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Auto
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", v),
            Length::Em(v) => write!(f, "{}em", v),
            Length::Percent(v) => write!(f, "{}%", v),
            Length::Auto => write!(f, "auto"),
        }
    }
}
