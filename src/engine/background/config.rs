use crate::engine::css::values::Color;

/// Tunables for [`BackgroundResolver`](super::BackgroundResolver).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Inward offset from the target's top-left corner before the hit-test
    /// point is rounded up, keeping the hit-test point off the element's edge.
    pub hit_test_inset: f32,

    /// Backdrop assumed behind a root without an explicit background.
    /// Always used as fully opaque.
    pub canvas_color: Color,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            hit_test_inset: 1.0,
            canvas_color: Color::WHITE,
        }
    }
}
