//! Host document abstraction consumed by background resolution.
//!
//! # Overview
//!
//! Background resolution never touches a live rendering tree directly.
//! It asks the host for computed values and geometry through the traits
//! below, so the same algorithm runs against a browser binding or an
//! in-memory fixture.
//!
//! # Responsibilities
//!
//! - Walk the element tree upward (`Document`)
//! - Answer computed style queries as CSS text (`StyleQuery`)
//! - Report bounding rectangles, containment and, optionally, hit-tests
//!   (`GeometryQuery`)
//! - Scroll an element into view on request (`Viewport`)
//!
//! # Non-Responsibilities
//!
//! - Parsing of the returned CSS text
//! - Any notion of stacking order beyond the hit-test result

use std::fmt::{self, Debug};

use super::geometry::{Point, Rect};

/* ============================
 * Tree
 * ============================ */

pub trait Document {
    /// Non-owning handle into the host document.
    type Element: Clone + PartialEq + Debug;

    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Whether `element` is the document root (`<html>`).
    fn is_root(&self, element: &Self::Element) -> bool;
}

/* ============================
 * Style
 * ============================ */

/// Computed properties the resolver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    BackgroundImage,
    BackgroundColor,
    Opacity,
    Position,
    Top,
    Right,
    Bottom,
    Left,
}

impl StyleProperty {
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::BackgroundImage => "background-image",
            Self::BackgroundColor => "background-color",
            Self::Opacity => "opacity",
            Self::Position => "position",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    pub fn from_css_name(name: &str) -> Option<Self> {
        Some(match name {
            "background-image" => Self::BackgroundImage,
            "background-color" => Self::BackgroundColor,
            "opacity" => Self::Opacity,
            "position" => Self::Position,
            "top" => Self::Top,
            "right" => Self::Right,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            _ => return None,
        })
    }

    /// CSS initial value, as serialized by `getComputedStyle`.
    pub fn initial_value(&self) -> &'static str {
        match self {
            Self::BackgroundImage => "none",
            Self::BackgroundColor => "transparent",
            Self::Opacity => "1",
            Self::Position => "static",
            Self::Top | Self::Right | Self::Bottom | Self::Left => "auto",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

pub trait StyleQuery: Document {
    /// Computed value of `property` as CSS text.
    fn computed_value(&self, element: &Self::Element, property: StyleProperty) -> String;

    /// Rendered height in CSS pixels.
    fn rendered_height(&self, element: &Self::Element) -> f32;
}

/* ============================
 * Geometry
 * ============================ */

pub trait GeometryQuery: Document {
    /// Bounding rectangle in viewport coordinates.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Whether `container` visually covers the whole rectangle of `element`.
    fn visually_contains(&self, container: &Self::Element, element: &Self::Element) -> bool;

    /// Point hit-testing is an optional capability.
    fn supports_hit_testing(&self) -> bool {
        false
    }

    /// Elements rendered at `point`, nearest first.
    ///
    /// Only called when [`supports_hit_testing`](Self::supports_hit_testing)
    /// returns `true`.
    fn elements_from_point(&self, _point: Point) -> Vec<Self::Element> {
        Vec::new()
    }
}

/* ============================
 * Viewport
 * ============================ */

pub trait Viewport: Document {
    /// Best-effort; changes the viewport scroll position and is not undone.
    fn scroll_into_view(&mut self, element: &Self::Element);
}

/// Everything background resolution needs from the host.
pub trait Host: StyleQuery + GeometryQuery + Viewport {}

impl<T: StyleQuery + GeometryQuery + Viewport> Host for T {}
