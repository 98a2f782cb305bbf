//! Expression validation
//!
//! Parses the text and runs a trial evaluation over the syntax tree. The
//! trial evaluator is a plain floating-point interpreter: division by zero
//! produces an infinity (left for the postfix evaluator to report), while a
//! not-a-number result, an unknown name, or an out-of-domain function
//! argument rejects the expression.

use crate::ast::Expr;
use crate::error::{ExprError, ExprResult};
use crate::functions::Function;
use crate::parser::parse_expression;
use crate::token::Operator;
use log::debug;

/// Check that `text` parses and trial-evaluates to a number.
///
/// Returns the trial value on success.
pub fn validate(text: &str) -> ExprResult<f64> {
    let ast = parse_expression(text)?;
    let value = trial_evaluate(&ast)?;
    if value.is_nan() {
        return Err(ExprError::syntax("expression evaluates to NaN"));
    }
    debug!("validated '{}' (trial value {})", text.trim(), value);
    Ok(value)
}

/// Check only that `text` is well-formed, without evaluating it.
pub fn check_syntax(text: &str) -> ExprResult<()> {
    parse_expression(text).map(|_| ())
}

fn trial_evaluate(expr: &Expr) -> ExprResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Variable(name) => Err(ExprError::syntax(format!("Unknown variable: {}", name))),
        Expr::Negate(operand) => Ok(-trial_evaluate(operand)?),
        Expr::BinaryOp { op, left, right } => {
            let l = trial_evaluate(left)?;
            let r = trial_evaluate(right)?;
            // IEEE semantics here: x/0 is infinite, 0/0 and x%0 are NaN
            Ok(match op {
                Operator::Divide => l / r,
                Operator::Modulo => l % r,
                other => other.apply(l, r)?,
            })
        }
        Expr::Call { name, arg } => {
            let value = trial_evaluate(arg)?;
            call_function(name, value)
        }
    }
}

fn call_function(name: &str, value: f64) -> ExprResult<f64> {
    if let Some(func) = Function::from_name(name) {
        return func.apply(value);
    }

    // General-purpose names the postfix converter does not know
    match name {
        "log10" if value <= 0.0 => Err(ExprError::Domain {
            function: "log10",
            operand: value,
        }),
        "log2" if value <= 0.0 => Err(ExprError::Domain {
            function: "log2",
            operand: value,
        }),
        "log10" => Ok(value.log10()),
        "log2" => Ok(value.log2()),
        "exp" => Ok(value.exp()),
        "abs" => Ok(value.abs()),
        _ => Err(ExprError::syntax(format!("Unknown function: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expressions() {
        assert_eq!(validate("3 + 4").unwrap(), 7.0);
        assert_eq!(validate("-2^2").unwrap(), -4.0);
        assert_eq!(validate("2*-3").unwrap(), -6.0);
        assert_eq!(validate("7 % 4").unwrap(), 3.0);
        assert_eq!(validate("log10(100)").unwrap(), 2.0);
    }

    #[test]
    fn test_division_by_zero_is_not_a_validation_error() {
        assert_eq!(validate("10 / 0").unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_nan_is_rejected() {
        assert!(matches!(validate("0 / 0"), Err(ExprError::Syntax(_))));
        assert!(matches!(validate("5 % 0"), Err(ExprError::Syntax(_))));
    }

    #[test]
    fn test_domain_errors_are_rejected() {
        assert!(matches!(validate("sqrt(-1)"), Err(ExprError::Domain { .. })));
        assert!(matches!(validate("log(-1)"), Err(ExprError::Domain { .. })));
        assert!(matches!(validate("asin(2)"), Err(ExprError::Domain { .. })));
        assert!(validate("log10(0)").is_err());
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!(validate("c52352352").is_err());
        assert!(validate("unknown_function(2)").is_err());
        assert!(validate("x + 1").is_err());
    }

    #[test]
    fn test_check_syntax_allows_free_variables() {
        assert!(check_syntax("sin(x) * x").is_ok());
        assert!(check_syntax("sin(x").is_err());
    }
}
