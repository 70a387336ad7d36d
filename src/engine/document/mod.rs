//! In-memory document host.
//!
//! `StaticDocument` is a fixed element tree with document-space rectangles
//! and inline declarations. It implements every host trait in
//! [`crate::engine::bridge`], which makes background resolution usable
//! without a rendering engine (tests, snapshots, offline analysis).
//!
//! Hit-testing paints in a simplified order: higher `z-index` first, then
//! positioned boxes above static ones, then later boxes in tree order above
//! earlier ones.

pub mod declarations;

pub use declarations::Declarations;

use std::fmt;
use std::rc::Rc;

use anyhow::{Result, anyhow};

use crate::engine::bridge::{
    Document, GeometryQuery, Point, Rect, StyleProperty, StyleQuery, Viewport,
};
use crate::engine::css::values::Position;
use crate::engine::tree::{NodeRef, Tree, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

pub struct ElementData {
    pub id: ElementId,
    pub tag: String,
    /// Document coordinates.
    pub rect: Rect,
    pub declarations: Declarations,
}

impl fmt::Debug for ElementData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}#{}> {}x{} @ ({}, {})",
            self.tag,
            self.id.0,
            self.rect.width,
            self.rect.height,
            self.rect.left,
            self.rect.top
        )?;
        if let Some(bg) = self.declarations.get(StyleProperty::BackgroundColor) {
            write!(f, " bg={bg}")?;
        }
        Ok(())
    }
}

pub struct StaticDocument {
    tree: Tree<ElementData>,
    nodes: Vec<NodeRef<ElementData>>,
    hit_testing: bool,
    scroll: Point,
    scroll_log: Vec<ElementId>,
}

impl StaticDocument {
    /// A document whose root `<html>` covers `root_rect`.
    pub fn new(root_rect: Rect) -> Self {
        let tree = Tree::new(ElementData {
            id: ElementId(0),
            tag: "html".to_string(),
            rect: root_rect,
            declarations: Declarations::default(),
        });
        let nodes = vec![Rc::clone(&tree.root)];
        Self {
            tree,
            nodes,
            hit_testing: true,
            scroll: Point::default(),
            scroll_log: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Appends an element under `parent`. `declarations` is an inline style
    /// block such as `"background-color: rgb(1, 2, 3); opacity: 0.5"`.
    pub fn append(
        &mut self,
        parent: ElementId,
        tag: &str,
        rect: Rect,
        declarations: &str,
    ) -> Result<ElementId> {
        let parent_node = self
            .node(parent)
            .cloned()
            .ok_or_else(|| anyhow!("unknown parent element {:?}", parent))?;
        let declarations = Declarations::parse(declarations)?;

        let id = ElementId(self.nodes.len());
        let node = TreeNode::add_child_value(
            &parent_node,
            ElementData {
                id,
                tag: tag.to_string(),
                rect,
                declarations,
            },
        );
        self.nodes.push(node);
        Ok(id)
    }

    /// Merges more declarations into an existing element.
    pub fn set_style(&mut self, id: ElementId, declarations: &str) -> Result<()> {
        let node = self
            .node(id)
            .ok_or_else(|| anyhow!("unknown element {:?}", id))?;
        node.borrow_mut().value.declarations.merge(declarations)
    }

    /// Switches the hit-test capability on or off (on by default).
    pub fn set_hit_testing(&mut self, enabled: bool) {
        self.hit_testing = enabled;
    }

    pub fn tag(&self, id: ElementId) -> Option<String> {
        self.node(id).map(|n| n.borrow().value.tag.clone())
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Elements passed to `scroll_into_view`, in call order.
    pub fn scroll_log(&self) -> &[ElementId] {
        &self.scroll_log
    }

    fn node(&self, id: ElementId) -> Option<&NodeRef<ElementData>> {
        self.nodes.get(id.0)
    }

    fn document_rect(&self, id: ElementId) -> Option<Rect> {
        self.node(id).map(|n| n.borrow().value.rect)
    }

    /// (z-index, positioned, tree order); larger paints on top.
    fn paint_key(data: &ElementData, order: usize) -> (i32, bool, usize) {
        let positioned = Position::from_css(data.declarations.computed(StyleProperty::Position))
            .is_none_or(|p| p.is_positioned());
        let z = if positioned {
            data.declarations.z_index().unwrap_or(0)
        } else {
            0
        };
        (z, positioned, order)
    }
}

impl fmt::Display for StaticDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

impl Document for StaticDocument {
    type Element = ElementId;

    fn parent_element(&self, element: &ElementId) -> Option<ElementId> {
        let node = self.node(*element)?;
        let parent = node.borrow().parent()?;
        let id = parent.borrow().value.id;
        Some(id)
    }

    fn is_root(&self, element: &ElementId) -> bool {
        *element == self.root()
    }
}

impl StyleQuery for StaticDocument {
    fn computed_value(&self, element: &ElementId, property: StyleProperty) -> String {
        match self.node(*element) {
            Some(node) => node.borrow().value.declarations.computed(property).to_string(),
            None => property.initial_value().to_string(),
        }
    }

    fn rendered_height(&self, element: &ElementId) -> f32 {
        self.document_rect(*element).map_or(0.0, |r| r.height)
    }
}

impl GeometryQuery for StaticDocument {
    fn bounding_rect(&self, element: &ElementId) -> Rect {
        self.document_rect(*element)
            .unwrap_or_default()
            .translate(-self.scroll.x, -self.scroll.y)
    }

    fn visually_contains(&self, container: &ElementId, element: &ElementId) -> bool {
        match (self.document_rect(*container), self.document_rect(*element)) {
            (Some(outer), Some(inner)) => outer.contains_rect(&inner),
            _ => false,
        }
    }

    fn supports_hit_testing(&self) -> bool {
        self.hit_testing
    }

    fn elements_from_point(&self, point: Point) -> Vec<ElementId> {
        let doc_point = Point::new(point.x + self.scroll.x, point.y + self.scroll.y);

        let mut hits = Vec::new();
        let mut order = 0;
        self.tree.traverse_preorder(&mut |node| {
            let node = node.borrow();
            let data = &node.value;
            if data.rect.contains_point(doc_point) {
                hits.push((Self::paint_key(data, order), data.id));
            }
            order += 1;
        });

        hits.sort_by(|a, b| b.0.cmp(&a.0));
        hits.into_iter().map(|(_, id)| id).collect()
    }
}

impl Viewport for StaticDocument {
    fn scroll_into_view(&mut self, element: &ElementId) {
        if let Some(rect) = self.document_rect(*element) {
            self.scroll = Point::new(rect.left.max(0.0), rect.top.max(0.0));
        }
        self.scroll_log.push(*element);
    }
}
