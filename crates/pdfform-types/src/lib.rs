//! Field middleware model shared by the form-filling crates.
//!
//! An [`Element`] is the caller-side view of one form field: its key, its
//! kind, the value to render and the text settings used to draw it.

pub mod element;
pub mod error;

pub use element::{Element, ElementType, ElementValue, RenderDefaults};
pub use error::ElementError;
