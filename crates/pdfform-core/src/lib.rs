//! Form field location, classification and draw geometry over lopdf documents
//!
//! This crate walks the annotation records of an already-parsed PDF and
//! answers three questions about each interactive field:
//! - which records are form fields (`template::iterate_elements`)
//! - what their key and kind are (`template::element_key`, `template::element_type`)
//! - where a value should be drawn (`geometry`)
//!
//! Parsing and serialization are delegated to lopdf, glyph widths to a
//! caller-supplied [`FontMetrics`].

pub mod constants;
pub mod error;
pub mod geometry;
pub mod merge;
pub mod metrics;
pub mod object;
pub mod patterns;
pub mod template;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::FormError;
pub use geometry::{FieldRect, TextAlignment};
pub use metrics::{FixedAdvance, FontMetrics};
pub use patterns::{
    Pattern, PatternEntry, PatternValue, TypePattern, ELEMENT_KEY_PATTERNS, ELEMENT_TYPE_PATTERNS,
};
pub use template::Annotation;

pub use pdfform_types::{Element, ElementType, ElementValue, RenderDefaults};

/// Parse PDF bytes into a lopdf document
pub fn parse_document(bytes: &[u8]) -> Result<lopdf::Document, FormError> {
    lopdf::Document::load_mem(bytes).map_err(|e| FormError::ParseError(e.to_string()))
}
