//! Form element middleware

use crate::error::ElementError;
use serde::{Deserialize, Serialize};

/// Kind of interactive form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Checkbox,
    Radio,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Checkbox => "checkbox",
            ElementType::Radio => "radio",
        }
    }
}

/// Value a caller wants rendered into a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementValue {
    Checked(bool),
    Selected(usize),
    Text(String),
}

/// Text settings applied when an element carries no explicit override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    pub font: String,
    pub font_size: f64,
    pub font_color: (f64, f64, f64),
    pub text_x_offset: f64,
    pub text_y_offset: f64,
    pub text_wrap_length: usize,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            font_size: 12.0,
            font_color: (0.0, 0.0, 0.0),
            text_x_offset: 0.0,
            text_y_offset: 0.0,
            text_wrap_length: 100,
        }
    }
}

impl RenderDefaults {
    /// Parse defaults from JSON. Missing keys keep their default values.
    pub fn from_json(json: &str) -> Result<Self, ElementError> {
        let defaults: RenderDefaults =
            serde_json::from_str(json).map_err(|e| ElementError::InvalidDefaults(e.to_string()))?;

        if defaults.font_size <= 0.0 || !defaults.font_size.is_finite() {
            return Err(ElementError::InvalidFontSize(defaults.font_size));
        }

        Ok(defaults)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub element_type: ElementType,
    pub value: Option<ElementValue>,
    pub font: String,
    pub font_size: f64,
    pub font_color: (f64, f64, f64),
    pub text_x_offset: f64,
    pub text_y_offset: f64,
    pub text_wrap_length: usize,
    pub max_length: Option<usize>,
    pub comb: bool,
    /// Left offset of each glyph inside a comb field, relative to the field's left edge
    pub character_paddings: Vec<f64>,
}

impl Element {
    pub fn new(
        name: impl Into<String>,
        element_type: ElementType,
        value: Option<ElementValue>,
    ) -> Self {
        Self::with_defaults(name, element_type, value, &RenderDefaults::default())
    }

    pub fn with_defaults(
        name: impl Into<String>,
        element_type: ElementType,
        value: Option<ElementValue>,
        defaults: &RenderDefaults,
    ) -> Self {
        Self {
            name: name.into(),
            element_type,
            value,
            font: defaults.font.clone(),
            font_size: defaults.font_size,
            font_color: defaults.font_color,
            text_x_offset: defaults.text_x_offset,
            text_y_offset: defaults.text_y_offset,
            text_wrap_length: defaults.text_wrap_length,
            max_length: None,
            comb: false,
            character_paddings: Vec::new(),
        }
    }

    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn comb(mut self, comb: bool) -> Self {
        self.comb = comb;
        self
    }

    /// Text to draw, empty for non-text values
    pub fn text_value(&self) -> &str {
        match &self.value {
            Some(ElementValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Number of characters that will be drawn, capped by `max_length`
    pub fn display_len(&self) -> usize {
        let len = self.text_value().chars().count();
        match self.max_length {
            Some(max) => len.min(max),
            None => len,
        }
    }

    /// Check that the value agrees with the element type and render settings are sane
    pub fn validate(&self) -> Result<(), ElementError> {
        if self.name.is_empty() {
            return Err(ElementError::EmptyName);
        }

        let expected = match (&self.element_type, &self.value) {
            (_, None) => None,
            (ElementType::Text, Some(ElementValue::Text(_))) => None,
            (ElementType::Checkbox, Some(ElementValue::Checked(_))) => None,
            (ElementType::Radio, Some(ElementValue::Selected(_))) => None,
            (ElementType::Text, _) => Some("string"),
            (ElementType::Checkbox, _) => Some("boolean"),
            (ElementType::Radio, _) => Some("index"),
        };
        if let Some(expected) = expected {
            return Err(ElementError::ValueTypeMismatch {
                name: self.name.clone(),
                expected,
            });
        }

        if self.font_size <= 0.0 || !self.font_size.is_finite() {
            return Err(ElementError::InvalidFontSize(self.font_size));
        }

        let (r, g, b) = self.font_color;
        if [r, g, b].iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ElementError::InvalidFontColor(self.font_color));
        }

        Ok(())
    }
}
