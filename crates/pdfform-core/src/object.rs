//! Small read helpers over lopdf objects

use crate::constants::PARENT_KEY;
use lopdf::{Dictionary, Document, Object, StringFormat};
use tracing::trace;

/// Longest chain of indirect references followed before giving up
const MAX_REFERENCE_DEPTH: usize = 32;

/// Follow indirect references until a direct object is reached.
///
/// A dangling reference resolves to itself so callers treat it like any
/// other value of the wrong kind.
pub fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    let mut current = object;
    for _ in 0..MAX_REFERENCE_DEPTH {
        match current {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(next) => current = next,
                Err(_) => {
                    trace!(?id, "dangling reference");
                    return current;
                }
            },
            _ => return current,
        }
    }
    current
}

/// Look up `key` in `dict`, resolving the value
pub fn get<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    dict.get(key).ok().map(|value| resolve(doc, value))
}

pub fn get_dict<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    get(doc, dict, key).and_then(|value| value.as_dict().ok())
}

/// The field group a widget belongs to, if any
pub fn parent<'a>(doc: &'a Document, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    get_dict(doc, dict, PARENT_KEY)
}

/// Look up `key` on the record, then on its parent
pub fn get_inherited<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    get(doc, dict, key).or_else(|| parent(doc, dict).and_then(|p| get(doc, p, key)))
}

/// Whether a value counts as set: null, `false` and empty containers do not
pub fn is_truthy(object: &Object) -> bool {
    match object {
        Object::Null => false,
        Object::Boolean(value) => *value,
        Object::String(bytes, _) => !bytes.is_empty(),
        Object::Name(name) => !name.is_empty(),
        Object::Array(items) => !items.is_empty(),
        Object::Dictionary(dict) => !dict.is_empty(),
        _ => true,
    }
}

pub fn name_eq(object: &Object, expected: &[u8]) -> bool {
    matches!(object, Object::Name(name) if name.as_slice() == expected)
}

pub fn as_number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value as f64),
        _ => None,
    }
}

pub fn as_integer(object: &Object) -> Option<i64> {
    match object {
        Object::Integer(value) => Some(*value),
        Object::Real(value) if value.fract() == 0.0 => Some(*value as i64),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with byte order mark, otherwise
/// UTF-8 with a Latin-1 fallback.
pub fn decode_text(object: &Object) -> Option<String> {
    let bytes = match object {
        Object::String(bytes, _) => bytes.as_slice(),
        Object::Name(name) => name.as_slice(),
        _ => return None,
    };

    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return Some(String::from_utf16_lossy(&units));
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text.to_string()),
        Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Encode a text string the way `decode_text` reads it back: ASCII as a
/// literal, anything else as UTF-16BE with a byte order mark.
pub fn encode_text(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}
