use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayRoiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown {entity} field: {path}")]
    UnknownField { entity: String, path: String },

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PayRoiError {
    fn from(e: serde_json::Error) -> Self {
        PayRoiError::SerializationError(e.to_string())
    }
}
