//! Stream helpers and checkbox/radio rendering defaults

use crate::constants::{CHECKBOX_OFF, CHECKBOX_ON, CHECK_SYMBOL, POINTS_PER_PIXEL, RADIO_SYMBOL};
use crate::error::FormError;
use crate::geometry::FieldRect;
use crate::merge::merge_documents;
use lopdf::{Document, Object};
use pdfform_types::{Element, ElementType, ElementValue, RenderDefaults};
use std::collections::BTreeMap;

/// Serialize a document back to PDF bytes
pub fn generate_stream(doc: &mut Document) -> Result<Vec<u8>, FormError> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| FormError::SerializationError(e.to_string()))?;
    Ok(buffer)
}

/// Append the pages of `second` after those of `first`
pub fn merge_two_pdfs(first: &[u8], second: &[u8]) -> Result<Vec<u8>, FormError> {
    merge_documents(vec![first.to_vec(), second.to_vec()])
}

/// Appearance state name for a checkbox value
pub fn bool_to_checkbox(value: bool) -> Object {
    let state = if value { CHECKBOX_ON } else { CHECKBOX_OFF };
    Object::Name(state.to_vec())
}

/// Convert a filled-in data map to PDF values: booleans become checkbox
/// states, text becomes literal strings, radio selections stay indexes.
pub fn bool_to_checkboxes(data: &BTreeMap<String, ElementValue>) -> BTreeMap<String, Object> {
    data.iter()
        .map(|(key, value)| {
            let object = match value {
                ElementValue::Checked(checked) => bool_to_checkbox(*checked),
                ElementValue::Text(text) => Object::string_literal(text.as_str()),
                ElementValue::Selected(index) => Object::Integer(*index as i64),
            };
            (key.clone(), object)
        })
        .collect()
}

/// Font size that fills a checkbox or radio rectangle
pub fn checkbox_radio_font_size(rect: &FieldRect) -> f64 {
    (rect.width() * rect.height()).sqrt() * POINTS_PER_PIXEL
}

/// The text element drawn in place of a checkbox tick or a radio dot
pub fn checkbox_radio_to_draw(element: &Element, font_size: f64) -> Element {
    let symbol = match element.element_type {
        ElementType::Radio => RADIO_SYMBOL,
        _ => CHECK_SYMBOL,
    };

    Element::with_defaults(
        element.name.clone(),
        ElementType::Text,
        Some(ElementValue::Text(symbol.to_string())),
        &RenderDefaults::default(),
    )
    .font_size(font_size)
}
