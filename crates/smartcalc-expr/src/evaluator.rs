//! Postfix evaluator
//!
//! A single left-to-right pass over a [`Postfix`] sequence using a value
//! stack. A zero divisor stops the pass immediately. A function domain
//! violation is recorded, the function yields `0`, and the pass continues;
//! the first recorded error is what gets reported.

use crate::error::{ExprError, ExprResult};
use crate::postfix::Postfix;
use crate::token::Token;
use log::trace;

/// Evaluate a postfix sequence with no variable binding
pub fn evaluate(postfix: &Postfix) -> ExprResult<f64> {
    run(postfix, None)
}

/// Evaluate a postfix sequence with the free variable bound to `x`
pub fn evaluate_at(postfix: &Postfix, x: f64) -> ExprResult<f64> {
    run(postfix, Some(x))
}

fn run(postfix: &Postfix, x: Option<f64>) -> ExprResult<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.tokens().len());
    let mut first_error: Option<ExprError> = None;

    for token in postfix.tokens() {
        match token {
            Token::Number { value, .. } => stack.push(*value),

            Token::Variable => match x {
                Some(value) => stack.push(value),
                None => return Err(ExprError::invalid_postfix("unbound variable")),
            },

            Token::Operator(op) => {
                let right = pop(&mut stack, token)?;
                let left = pop(&mut stack, token)?;
                match op.apply(left, right) {
                    Ok(value) => stack.push(value),
                    Err(err) => return Err(first_error.unwrap_or(err)),
                }
            }

            Token::Negate => {
                let operand = pop(&mut stack, token)?;
                stack.push(-operand);
            }

            Token::Function(func) => {
                let operand = pop(&mut stack, token)?;
                match func.apply(operand) {
                    Ok(value) => stack.push(value),
                    Err(err) => {
                        trace!("{}", err.detail());
                        first_error.get_or_insert(err);
                        stack.push(0.0);
                    }
                }
            }

            Token::Identifier(name) => {
                return Err(first_error
                    .unwrap_or_else(|| ExprError::invalid_postfix(format!("unknown name '{}'", name))));
            }

            Token::LeftParen | Token::RightParen => {
                return Err(first_error
                    .unwrap_or_else(|| ExprError::invalid_postfix("parenthesis in postfix")));
            }
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        values => Err(ExprError::invalid_postfix(format!(
            "{} values left on the stack",
            values.len()
        ))),
    }
}

fn pop(stack: &mut Vec<f64>, token: &Token) -> ExprResult<f64> {
    stack
        .pop()
        .ok_or_else(|| ExprError::invalid_postfix(format!("missing operand for '{}'", token)))
}
