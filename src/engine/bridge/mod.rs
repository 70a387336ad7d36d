//! Boundary between the engine and the document host.

pub mod dom;
pub mod geometry;

pub use dom::{Document, GeometryQuery, Host, StyleQuery, StyleProperty, Viewport};
pub use geometry::{Point, Rect};
