//! CSS value types read back from computed style.

pub mod values;
