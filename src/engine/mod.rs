pub mod background;
pub mod bridge;
pub mod css;
pub mod document;
pub mod tree;
