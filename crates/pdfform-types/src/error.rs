use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("Element name must not be empty")]
    EmptyName,

    #[error("Element {name} expects a {expected} value")]
    ValueTypeMismatch { name: String, expected: &'static str },

    #[error("Invalid font size: {0}")]
    InvalidFontSize(f64),

    #[error("Font color channels must be within 0..=1, got {0:?}")]
    InvalidFontColor((f64, f64, f64)),

    #[error("Invalid render defaults: {0}")]
    InvalidDefaults(String),
}
