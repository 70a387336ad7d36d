//! Which elements sit visually behind a target, nearest first.
//!
//! Ancestry only reflects painting order while nothing on the way up is
//! positioned. Once a `position` other than `static`, or a `relative` box
//! with an explicit offset, is seen, the order comes from a hit-test at the
//! target's top-left corner instead, when the host can do one.

use log::{debug, warn};

use super::config::ResolverConfig;
use crate::engine::bridge::{GeometryQuery, Point, Rect, StyleProperty, StyleQuery};
use crate::engine::css::values::{Length, Position};

/// How an ancestor order was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackingSource {
    /// No positioned box on the way up; tree order is painting order.
    FlowOrder,
    /// Ambiguous; the host's hit-test result was used.
    HitTest,
    /// Ambiguous, but no usable hit-test; tree order used anyway.
    AmbiguousFlowOrder,
}

impl StackingSource {
    pub fn is_exact(&self) -> bool {
        !matches!(self, StackingSource::AmbiguousFlowOrder)
    }
}

/// One-shot iterator over the elements behind a target.
#[derive(Debug)]
pub struct VisualParents<E> {
    parents: std::vec::IntoIter<E>,
    source: StackingSource,
}

impl<E> VisualParents<E> {
    pub fn source(&self) -> StackingSource {
        self.source
    }
}

impl<E> Iterator for VisualParents<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.parents.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.parents.size_hint()
    }
}

/// Elements rendered behind `element`, nearest first.
///
/// `reference` is the target's bounding rectangle in viewport coordinates;
/// it is only used to place the hit-test point.
pub fn ordered_ancestors<H>(
    host: &H,
    element: &H::Element,
    reference: Rect,
    config: &ResolverConfig,
) -> VisualParents<H::Element>
where
    H: StyleQuery + GeometryQuery + ?Sized,
{
    let mut parents = Vec::new();
    let mut ambiguous = false;
    let mut current = Some(element.clone());

    while let Some(node) = current {
        if !ambiguous && breaks_flow_order(host, &node) {
            debug!("{:?} is positioned, ancestor order is ambiguous", node);
            ambiguous = true;
        }
        current = host.parent_element(&node);
        if let Some(parent) = &current {
            if !is_zero_height(host.rendered_height(parent)) {
                parents.push(parent.clone());
            }
        }
    }

    let source = if !ambiguous {
        StackingSource::FlowOrder
    } else if !host.supports_hit_testing() {
        debug!("hit-testing unsupported, keeping ancestor order");
        StackingSource::AmbiguousFlowOrder
    } else {
        let point = Point::new(
            (reference.left + config.hit_test_inset).ceil(),
            (reference.top + config.hit_test_inset).ceil(),
        );
        let hits = host.elements_from_point(point);
        match hits.iter().position(|e| e == element) {
            Some(index) if index + 1 < hits.len() => {
                debug!(
                    "hit-test at ({}, {}) found {} elements behind {:?}",
                    point.x,
                    point.y,
                    hits.len() - index - 1,
                    element
                );
                parents = hits.into_iter().skip(index + 1).collect();
                StackingSource::HitTest
            }
            Some(_) => {
                warn!(
                    "{:?} is the last hit at ({}, {}), keeping ancestor order",
                    element, point.x, point.y
                );
                StackingSource::AmbiguousFlowOrder
            }
            // 対象が当たらなければ、ヒットした要素すべてを背後とみなす
            None if !hits.is_empty() => {
                debug!(
                    "{:?} not hit at ({}, {}), using all {} hits",
                    element,
                    point.x,
                    point.y,
                    hits.len()
                );
                parents = hits;
                StackingSource::HitTest
            }
            None => {
                warn!("nothing hit at ({}, {}), keeping ancestor order", point.x, point.y);
                StackingSource::AmbiguousFlowOrder
            }
        }
    };

    VisualParents {
        parents: parents.into_iter(),
        source,
    }
}

/// `position` other than static, or relative with any offset set.
pub fn breaks_flow_order<H>(host: &H, element: &H::Element) -> bool
where
    H: StyleQuery + ?Sized,
{
    match Position::from_css(&host.computed_value(element, StyleProperty::Position)) {
        Some(Position::Static) => false,
        Some(Position::Relative) => [
            StyleProperty::Top,
            StyleProperty::Right,
            StyleProperty::Bottom,
            StyleProperty::Left,
        ]
        .into_iter()
        .any(|side| {
            Length::from_css(&host.computed_value(element, side)).is_none_or(|l| !l.is_auto())
        }),
        // 未知の値は保守的に扱う
        _ => true,
    }
}

/// Heights under one pixel count as zero.
fn is_zero_height(height: f32) -> bool {
    height.trunc() == 0.0
}
