use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeasePricingError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LeasePricingError {
    fn from(e: serde_json::Error) -> Self {
        LeasePricingError::SerializationError(e.to_string())
    }
}
