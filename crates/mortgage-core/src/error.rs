use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),
}

impl MortgageError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        MortgageError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for caller contract violations, as opposed to numeric failures.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MortgageError::InvalidInput { .. })
    }
}
