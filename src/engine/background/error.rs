use thiserror::Error;

use crate::engine::bridge::StyleProperty;
use crate::engine::css::values::ColorParseError;

/// Host data outside its documented contract.
///
/// An indeterminate background is not an error; see
/// [`Resolution::Indeterminate`](super::Resolution::Indeterminate).
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("invalid {property} value {text:?}: {source}")]
    InvalidColor {
        property: StyleProperty,
        text: String,
        #[source]
        source: ColorParseError,
    },

    #[error("opacity {0:?} is not a number in [0, 1]")]
    InvalidOpacity(String),
}
