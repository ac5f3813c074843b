use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Failed to serialize PDF: {0}")]
    SerializationError(String),

    #[error("Malformed PDF structure: {0}")]
    StructureError(String),
}
