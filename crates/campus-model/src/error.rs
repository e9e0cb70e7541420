use thiserror::Error;

/// Errors raised while constructing model types.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Row identifier was empty or not a string/number.
    #[error("invalid row identifier: {0}")]
    InvalidRowKey(String),

    /// Field name was empty.
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),

    /// Record object is missing its identifier field.
    #[error("record has no {0:?} field")]
    MissingIdentifier(String),

    /// Record value was not a JSON object.
    #[error("record is not an object: {0}")]
    NotAnObject(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
