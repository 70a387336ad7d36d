//! Flattened background color resolution for rendered documents.
//!
//! Given an element, [`engine::background`] works out the single opaque
//! color a viewer sees behind it by alpha-compositing the layers stacked
//! under it, or reports that no such color can be established.

pub mod engine;

pub use engine::background::{
    BackgroundError, BackgroundResolver, Confidence, IndeterminateReason, Resolution,
    ResolverConfig, resolve,
};
pub use engine::css::values::Color;
