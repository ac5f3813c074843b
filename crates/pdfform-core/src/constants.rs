//! PDF dictionary keys and drawing constants used by form handling

/// Page entry holding the annotation array
pub const ANNOTATION_KEY: &[u8] = b"Annots";
/// Partial field name
pub const ANNOTATION_FIELD_KEY: &[u8] = b"T";
pub const ANNOTATION_RECTANGLE_KEY: &[u8] = b"Rect";
pub const SUBTYPE_KEY: &[u8] = b"Subtype";
pub const WIDGET_SUBTYPE_KEY: &[u8] = b"Widget";
/// Field type entry
pub const ELEMENT_TYPE_KEY: &[u8] = b"FT";
/// Button field type, shared by checkboxes and radio groups
pub const SELECTABLE_IDENTIFIER: &[u8] = b"Btn";
pub const TEXT_FIELD_IDENTIFIER: &[u8] = b"Tx";
pub const TEXT_FIELD_MAX_LENGTH_KEY: &[u8] = b"MaxLen";
/// Quadding: 0 left, 1 centered, 2 right
pub const TEXT_FIELD_ALIGNMENT_IDENTIFIER: &[u8] = b"Q";
/// Appearance state of a checkbox or radio widget
pub const CHECKBOX_FIELD_VALUE_KEY: &[u8] = b"AS";
pub const PARENT_KEY: &[u8] = b"Parent";
pub const FIELD_FLAG_KEY: &[u8] = b"Ff";

pub const CHECKBOX_ON: &[u8] = b"Yes";
pub const CHECKBOX_OFF: &[u8] = b"Off";

/// Zero-based bit of `Ff` marking a comb text field
pub const COMB_FLAG_BIT: u32 = 24;

/// Joins a field's base key and its uuid tag
pub const SEPARATOR: &str = ",";

/// Points per pixel
pub const POINTS_PER_PIXEL: f64 = 72.0 / 96.0;

pub const CHECKBOX_DRAW_X_OFFSET: f64 = 5.0;
pub const CHECKBOX_DRAW_Y_OFFSET: f64 = 4.0;
pub const TEXT_DRAW_Y_OFFSET: f64 = 2.0;

/// Glyph drawn for a checked checkbox
pub const CHECK_SYMBOL: &str = "\u{2713}";
/// Glyph drawn for a selected radio button
pub const RADIO_SYMBOL: &str = "\u{25CF}";
