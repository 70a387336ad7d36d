//! CSS `position` プロパティ値

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    pub fn from_css(value: &str) -> Option<Position> {
        match value.trim().to_ascii_lowercase().as_str() {
            "static" => Some(Position::Static),
            "relative" => Some(Position::Relative),
            "absolute" => Some(Position::Absolute),
            "fixed" => Some(Position::Fixed),
            "sticky" => Some(Position::Sticky),
            _ => None,
        }
    }

    /// Anything but `static` takes part in positioned painting.
    pub fn is_positioned(&self) -> bool {
        !matches!(self, Position::Static)
    }
}
