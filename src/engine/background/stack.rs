//! Last-in-first-out stack of background layers.
//!
//! Layers are pushed nearest first, so the top of the stack is the layer
//! furthest back. [`ColorStack::flatten`] folds from the top down.

use crate::engine::css::values::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct VisualLayer<E> {
    pub color: Color,
    /// `None` for the synthesized canvas behind the document root.
    pub element: Option<E>,
}

#[derive(Debug, Clone)]
pub struct ColorStack<E> {
    layers: Vec<VisualLayer<E>>,
}

impl<E> ColorStack<E> {
    /// A stack always holds at least the target element's own layer.
    pub fn new(color: Color, element: Option<E>) -> Self {
        Self {
            layers: vec![VisualLayer { color, element }],
        }
    }

    pub fn push(&mut self, color: Color, element: Option<E>) {
        self.layers.push(VisualLayer { color, element });
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn top(&self) -> &VisualLayer<E> {
        &self.layers[self.layers.len() - 1]
    }

    /// The furthest layer hides everything behind it.
    pub fn is_covered(&self) -> bool {
        self.top().color.is_opaque()
    }

    /// Composites back to front: pop the two topmost layers, put
    /// `composite(nearer, farther)` back, repeat until one color is left.
    pub fn flatten(mut self) -> Color {
        let mut farther = self.layers.pop().map_or(Color::TRANSPARENT, |l| l.color);
        while let Some(nearer) = self.layers.pop() {
            farther = Color::composite(nearer.color, farther);
        }
        farther
    }
}
