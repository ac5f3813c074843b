//! Draw coordinates for rendering field values
//!
//! All coordinates are in PDF user space: origin at the bottom left of the
//! page, `y` growing upwards. The returned point is the text baseline start.

use crate::constants::{
    ANNOTATION_RECTANGLE_KEY, CHECKBOX_DRAW_X_OFFSET, CHECKBOX_DRAW_Y_OFFSET,
    TEXT_DRAW_Y_OFFSET, TEXT_FIELD_ALIGNMENT_IDENTIFIER,
};
use crate::metrics::FontMetrics;
use crate::object::{as_integer, as_number, get, get_inherited, resolve};
use lopdf::{Dictionary, Document};
use pdfform_types::Element;
use tracing::trace;

/// A field's `Rect` entry, corners as stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl FieldRect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Read the rectangle of an annotation record. Anything but four numbers yields `None`.
    pub fn from_annotation(doc: &Document, element: &Dictionary) -> Option<Self> {
        let items = get(doc, element, ANNOTATION_RECTANGLE_KEY)?.as_array().ok()?;
        let numbers: Vec<f64> = items
            .iter()
            .filter_map(|item| as_number(resolve(doc, item)))
            .collect();

        match numbers.as_slice() {
            [x1, y1, x2, y2] => Some(Self::new(*x1, *y1, *x2, *y2)),
            _ => {
                trace!(len = numbers.len(), "rectangle without four numbers");
                None
            }
        }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x2).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y2).abs()
    }

    pub fn mid_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    /// Map a quadding value. Unknown values draw from the left edge.
    pub fn from_quadding(q: i64) -> Self {
        match q {
            1 => TextAlignment::Center,
            2 => TextAlignment::Right,
            _ => TextAlignment::Left,
        }
    }

    /// The field's `Q` entry, inherited from its parent when absent
    pub fn from_annotation(doc: &Document, element: &Dictionary) -> Self {
        get_inherited(doc, element, TEXT_FIELD_ALIGNMENT_IDENTIFIER)
            .and_then(as_integer)
            .map(Self::from_quadding)
            .unwrap_or_default()
    }
}

/// Fixed-offset position for a checkbox or radio mark
pub fn checkbox_radio_draw_coordinates(rect: &FieldRect) -> (f64, f64) {
    (
        rect.mid_x() - CHECKBOX_DRAW_X_OFFSET,
        rect.mid_y() - CHECKBOX_DRAW_Y_OFFSET,
    )
}

/// Baseline that vertically centres a line of `font_size` text around the rectangle's middle
fn centered_baseline(rect: &FieldRect, font_size: f64) -> f64 {
    let string_height = font_size * 96.0 / 72.0;
    let mid_y = rect.mid_y();
    (mid_y - string_height / 2.0 + mid_y) / 2.0
}

/// Position that centres the element's glyph in a checkbox or radio rectangle
pub fn checkbox_radio_glyph_coordinates(
    rect: &FieldRect,
    element: &Element,
    metrics: &impl FontMetrics,
) -> (f64, f64) {
    let width = metrics.string_width(element.text_value(), &element.font, element.font_size);
    (
        rect.mid_x() - width / 2.0,
        centered_baseline(rect, element.font_size),
    )
}

/// Fixed-offset position for a text value: left edge, just under the middle
pub fn text_draw_coordinates(rect: &FieldRect) -> (f64, f64) {
    (rect.x1, rect.mid_y() - TEXT_DRAW_Y_OFFSET)
}

/// Width of one comb cell, `None` without a positive max length
pub fn char_rect_width(rect: &FieldRect, element: &Element) -> Option<f64> {
    match element.max_length {
        Some(max) if max > 0 => Some(rect.width() / max as f64),
        _ => None,
    }
}

/// Left offset of each drawn character inside its comb cell, relative to the field's left edge
pub fn character_x_paddings(
    rect: &FieldRect,
    element: &Element,
    metrics: &impl FontMetrics,
) -> Vec<f64> {
    let Some(cell) = char_rect_width(rect, element) else {
        return Vec::new();
    };

    let mut buf = [0u8; 4];
    element
        .text_value()
        .chars()
        .take(element.display_len())
        .enumerate()
        .map(|(i, ch)| {
            let text = ch.encode_utf8(&mut buf);
            let glyph = metrics.string_width(text, &element.font, element.font_size);
            i as f64 * cell + cell / 2.0 - glyph / 2.0
        })
        .collect()
}

/// Text start position honouring alignment, max length and comb layout.
///
/// Only the characters that fit within the max length are measured. The
/// right-aligned comb shift centres the last *displayed* character in its
/// cell, so characters cut off by the max length never move the text.
pub fn text_glyph_coordinates(
    rect: &FieldRect,
    alignment: TextAlignment,
    element: &Element,
    metrics: &impl FontMetrics,
) -> (f64, f64) {
    let length = element.display_len();
    let shown: String = element.text_value().chars().take(length).collect();
    let char_width = |ch: char| {
        let mut buf = [0u8; 4];
        let glyph = ch.encode_utf8(&mut buf);
        metrics.string_width(glyph, &element.font, element.font_size)
    };
    let comb = element.comb && length > 0;

    let mut x = rect.x1;

    if alignment != TextAlignment::Left {
        let last = shown.chars().last();
        let string_width = match (comb, element.character_paddings.last(), last) {
            (true, Some(padding), Some(ch)) => padding + char_width(ch),
            _ => metrics.string_width(&shown, &element.font, element.font_size),
        };

        match alignment {
            TextAlignment::Center => x = rect.mid_x() - string_width / 2.0,
            TextAlignment::Right => {
                x = rect.x2 - string_width;
                if let (true, Some(cell), Some(ch)) = (comb, char_rect_width(rect, element), last) {
                    x -= (cell - char_width(ch)) / 2.0;
                }
            }
            TextAlignment::Left => {}
        }
    }

    if comb && length % 2 == 0 && alignment == TextAlignment::Center {
        let first_padding = element.character_paddings.first().copied().unwrap_or(0.0);
        let first_width = shown.chars().next().map(char_width).unwrap_or(0.0);
        x -= first_padding + first_width / 2.0;
    }

    (x, centered_baseline(rect, element.font_size))
}
