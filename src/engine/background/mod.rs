//! Flattened background color behind an element.
//!
//! # Overview
//!
//! Answers "what single opaque color does a viewer see behind this element"
//! from computed style and layout metadata alone, without rasterizing.
//!
//! ```text
//! resolve_local(target) ─┬─ image      → Indeterminate
//!                        ├─ opaque     → that color
//!                        └─ otherwise  → scroll into view
//!                                        ordered_ancestors(target)
//!                                        push layers until covered
//!                                        flatten back to front
//! ```
//!
//! # Side effects
//!
//! Resolving a non-opaque element scrolls it into view exactly once, and
//! may issue one hit-test. The scroll position is left where it ends up.

pub mod config;
pub mod error;
pub mod layer;
pub mod stack;
pub mod stacking;

pub use config::ResolverConfig;
pub use error::BackgroundError;
pub use layer::{LocalBackground, is_opaque, resolve_local};
pub use stack::{ColorStack, VisualLayer};
pub use stacking::{StackingSource, VisualParents, ordered_ancestors};

use log::{debug, trace};

use crate::engine::bridge::Host;
use crate::engine::css::values::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Exact,
    /// Stacking was ambiguous and tree order had to be trusted anyway.
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndeterminateReason {
    /// The target or a layer behind it has an image background.
    BackgroundImage,
    /// A layer behind the target does not cover its whole rectangle.
    NotContained,
    /// Ran out of layers before reaching an opaque one.
    NoOpaqueAncestor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Resolved {
        /// Always fully opaque.
        color: Color,
        confidence: Confidence,
    },
    Indeterminate(IndeterminateReason),
}

impl Resolution {
    pub fn color(&self) -> Option<Color> {
        match self {
            Resolution::Resolved { color, .. } => Some(*color),
            Resolution::Indeterminate(_) => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Resolution::Indeterminate(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackgroundResolver {
    config: ResolverConfig,
}

impl BackgroundResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn resolve<H: Host>(
        &self,
        host: &mut H,
        element: &H::Element,
    ) -> Result<Resolution, BackgroundError> {
        let mut visited = Vec::new();
        self.resolve_into(host, element, &mut visited)
    }

    /// Like [`resolve`](Self::resolve), appending every element looked at
    /// to `visited` in visit order, zero-alpha ones included.
    pub fn resolve_into<H: Host>(
        &self,
        host: &mut H,
        element: &H::Element,
        visited: &mut Vec<H::Element>,
    ) -> Result<Resolution, BackgroundError> {
        let local = resolve_local(&*host, element)?;
        visited.push(element.clone());

        let own = match local {
            LocalBackground::Indeterminate => {
                debug!("{:?} has a background image", element);
                return Ok(Resolution::Indeterminate(
                    IndeterminateReason::BackgroundImage,
                ));
            }
            LocalBackground::Opaque(color) => {
                return Ok(Resolution::Resolved {
                    color: color.with_alpha(1.0),
                    confidence: Confidence::Exact,
                });
            }
            LocalBackground::Translucent(color) => color,
            LocalBackground::Transparent => Color::TRANSPARENT,
        };

        host.scroll_into_view(element);
        let rect = host.bounding_rect(element);

        let mut stack = ColorStack::new(own, Some(element.clone()));
        let mut parents = ordered_ancestors(&*host, element, rect, &self.config);
        let confidence = if parents.source().is_exact() {
            Confidence::Exact
        } else {
            Confidence::BestEffort
        };

        let mut frontier = element.clone();
        while !stack.is_covered() {
            let Some(candidate) = parents.next() else {
                if host.is_root(&frontier) {
                    let canvas = self.config.canvas_color.with_alpha(1.0);
                    debug!("nothing behind the root, assuming {}", canvas);
                    stack.push(canvas, None);
                    break;
                }
                debug!("no opaque layer behind {:?}", element);
                return Ok(Resolution::Indeterminate(
                    IndeterminateReason::NoOpaqueAncestor,
                ));
            };

            if !host.visually_contains(&candidate, element) {
                debug!("{:?} does not contain {:?}", candidate, element);
                return Ok(Resolution::Indeterminate(IndeterminateReason::NotContained));
            }

            let local = resolve_local(&*host, &candidate)?;
            visited.push(candidate.clone());
            let Some(color) = local.color() else {
                debug!("{:?} has a background image", candidate);
                return Ok(Resolution::Indeterminate(
                    IndeterminateReason::BackgroundImage,
                ));
            };

            trace!("layer {} from {:?}", color, candidate);
            stack.push(color, Some(candidate.clone()));
            frontier = candidate;
        }

        let layers = stack.len();
        let color = stack.flatten().with_alpha(1.0);
        debug!("{:?} flattened {} layers to {}", element, layers, color);

        Ok(Resolution::Resolved { color, confidence })
    }
}

/// [`BackgroundResolver::resolve`] with the default configuration.
pub fn resolve<H: Host>(
    host: &mut H,
    element: &H::Element,
) -> Result<Resolution, BackgroundError> {
    BackgroundResolver::default().resolve(host, element)
}
