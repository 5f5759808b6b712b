use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetirementError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RetirementError {
    fn from(e: serde_json::Error) -> Self {
        RetirementError::SerializationError(e.to_string())
    }
}
