//! Dictionary patterns used to recognize form fields
//!
//! A pattern is a small nested key/value shape. A record matches when the
//! shape is a subset of the record's own nested structure, see
//! [`crate::template::find_pattern_match`].

use crate::constants::{
    ANNOTATION_FIELD_KEY, ELEMENT_TYPE_KEY, PARENT_KEY, SELECTABLE_IDENTIFIER, SUBTYPE_KEY,
    TEXT_FIELD_IDENTIFIER, WIDGET_SUBTYPE_KEY,
};
use pdfform_types::ElementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternValue {
    /// The value must be this name
    Name(&'static [u8]),
    /// The value must be set
    Present,
    /// The value must be a dictionary matching the inner pattern
    Nested(&'static Pattern),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternEntry {
    pub key: &'static [u8],
    pub value: PatternValue,
}

pub type Pattern = [PatternEntry];

impl PatternEntry {
    pub const fn name(key: &'static [u8], value: &'static [u8]) -> Self {
        Self {
            key,
            value: PatternValue::Name(value),
        }
    }

    pub const fn present(key: &'static [u8]) -> Self {
        Self {
            key,
            value: PatternValue::Present,
        }
    }

    pub const fn nested(key: &'static [u8], pattern: &'static Pattern) -> Self {
        Self {
            key,
            value: PatternValue::Nested(pattern),
        }
    }
}

/// Patterns that must all match for a record to have `element_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePattern {
    pub patterns: &'static [&'static Pattern],
    pub element_type: ElementType,
}

const TEXT_TYPE: &Pattern = &[PatternEntry::name(ELEMENT_TYPE_KEY, TEXT_FIELD_IDENTIFIER)];
const SELECTABLE_TYPE: &Pattern = &[PatternEntry::name(ELEMENT_TYPE_KEY, SELECTABLE_IDENTIFIER)];
const WIDGET_SUBTYPE: &Pattern = &[PatternEntry::name(SUBTYPE_KEY, WIDGET_SUBTYPE_KEY)];

const PARENT_TEXT_TYPE: &Pattern = &[PatternEntry::nested(PARENT_KEY, TEXT_TYPE)];
const PARENT_SELECTABLE_TYPE: &Pattern = &[PatternEntry::nested(PARENT_KEY, SELECTABLE_TYPE)];
const PARENT_WIDGET_SUBTYPE: &Pattern = &[PatternEntry::nested(PARENT_KEY, WIDGET_SUBTYPE)];

/// Classification table, tried in order; the first entry whose patterns all match wins.
///
/// A button whose parent is itself a widget is a checkbox split across
/// parent and kid; any other button under a parent is a radio group member.
pub const ELEMENT_TYPE_PATTERNS: &[TypePattern] = &[
    TypePattern {
        patterns: &[TEXT_TYPE],
        element_type: ElementType::Text,
    },
    TypePattern {
        patterns: &[SELECTABLE_TYPE],
        element_type: ElementType::Checkbox,
    },
    TypePattern {
        patterns: &[PARENT_TEXT_TYPE],
        element_type: ElementType::Text,
    },
    TypePattern {
        patterns: &[PARENT_SELECTABLE_TYPE, PARENT_WIDGET_SUBTYPE],
        element_type: ElementType::Checkbox,
    },
    TypePattern {
        patterns: &[PARENT_SELECTABLE_TYPE],
        element_type: ElementType::Radio,
    },
];

const OWN_KEY: &Pattern = &[PatternEntry::present(ANNOTATION_FIELD_KEY)];
const PARENT_KEY_NAME: &Pattern = &[PatternEntry::nested(PARENT_KEY, OWN_KEY)];

/// Where a field's key may live, tried in order
pub const ELEMENT_KEY_PATTERNS: &[&Pattern] = &[OWN_KEY, PARENT_KEY_NAME];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_patterns_are_ordered_specific_first() {
        let checkbox_under_parent = ELEMENT_TYPE_PATTERNS
            .iter()
            .position(|p| p.patterns.len() == 2)
            .unwrap();
        let radio = ELEMENT_TYPE_PATTERNS
            .iter()
            .position(|p| p.element_type == ElementType::Radio)
            .unwrap();
        assert!(checkbox_under_parent < radio);
    }

    #[test]
    fn test_key_patterns_prefer_own_name() {
        assert_eq!(ELEMENT_KEY_PATTERNS[0], OWN_KEY);
        match ELEMENT_KEY_PATTERNS[1][0].value {
            PatternValue::Nested(inner) => assert_eq!(inner, OWN_KEY),
            other => panic!("unexpected pattern value {:?}", other),
        }
    }
}
