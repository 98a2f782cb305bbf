//! Error types for smartcalc-finance

use thiserror::Error;

/// Result type alias using [`FinanceError`]
pub type FinanceResult<T> = std::result::Result<T, FinanceError>;

/// Errors that can occur in a credit or deposit calculation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinanceError {
    /// An input lies outside its valid range
    #[error("Invalid input {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    /// Decimal arithmetic overflowed
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl FinanceError {
    /// Create an invalid-input error
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        FinanceError::InvalidInput { field, reason }
    }
}
