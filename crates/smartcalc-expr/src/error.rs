//! Expression error types

use thiserror::Error;

/// Result type for expression operations
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Errors that can occur while validating or evaluating an expression.
///
/// The `Display` text of each variant is the exact string reported to the
/// caller in place of a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// The expression could not be parsed or trial-evaluated
    #[error("NOT VALID EXPRESSION")]
    Syntax(String),

    /// A function received an operand outside its domain
    #[error("NOT VALID EXPRESSION")]
    Domain { function: &'static str, operand: f64 },

    /// Division (or remainder) with a zero right operand
    #[error("division by zero")]
    DivisionByZero,

    /// The postfix stack did not reduce to exactly one value
    #[error("Invalid postfix expression.")]
    InvalidPostfix(String),
}

impl ExprError {
    /// Create a syntax error with a detail message
    pub fn syntax<S: Into<String>>(detail: S) -> Self {
        ExprError::Syntax(detail.into())
    }

    /// Create an invalid-postfix error with a detail message
    pub fn invalid_postfix<S: Into<String>>(detail: S) -> Self {
        ExprError::InvalidPostfix(detail.into())
    }

    /// Short machine-friendly name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            ExprError::Syntax(_) => "syntax",
            ExprError::Domain { .. } => "domain",
            ExprError::DivisionByZero => "division_by_zero",
            ExprError::InvalidPostfix(_) => "invalid_postfix",
        }
    }

    /// Detail text for logs; the `Display` form stays user-facing
    pub fn detail(&self) -> String {
        match self {
            ExprError::Syntax(d) | ExprError::InvalidPostfix(d) => d.clone(),
            ExprError::Domain { function, operand } => {
                format!("{}({}) is outside the function domain", function, operand)
            }
            ExprError::DivisionByZero => "zero divisor".to_string(),
        }
    }
}
