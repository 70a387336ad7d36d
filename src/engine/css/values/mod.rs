pub mod color;
pub mod length;
pub mod position;

pub use color::{ALPHA_EPSILON, Color, ColorParseError, ColorValue};
pub use length::Length;
pub use position::Position;
