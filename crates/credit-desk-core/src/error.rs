use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreditDeskError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Inconsistent business rules: {0}")]
    InconsistentRules(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CreditDeskError {
    /// True for malformed or logically inconsistent input. These are always
    /// surfaced to the caller; an application cannot be evaluated from them.
    pub fn is_validation(&self) -> bool {
        !matches!(self, CreditDeskError::SerializationError(_))
    }

    pub(crate) fn missing(field: &str) -> Self {
        CreditDeskError::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CreditDeskError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CreditDeskError {
    fn from(e: serde_json::Error) -> Self {
        CreditDeskError::SerializationError(e.to_string())
    }
}
