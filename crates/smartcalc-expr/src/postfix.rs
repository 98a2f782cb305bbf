//! Infix to postfix conversion (shunting-yard)
//!
//! The converter scans the text character by character:
//! - digits and `.` accumulate into one number; a second `.` ends the number
//! - letter runs become a [`Function`] (deferred on the operator stack until
//!   its closing parenthesis), the variable `x`, or a plain identifier
//! - `)` unwinds to the matching `(` and then emits a function sitting
//!   directly beneath it
//! - a binary operator first emits stacked operators of greater or equal
//!   precedence (strictly greater for the right-associative `^`)
//!
//! The input is expected to have passed validation already.

use crate::error::{ExprError, ExprResult};
use crate::functions::Function;
use crate::token::{Operator, Token, VARIABLE};
use std::fmt;

/// A postfix token sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the sequence still references the free variable
    pub fn has_variable(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Variable))
    }

    /// Copy of this sequence with every variable replaced by `value`
    pub fn bind(&self, value: f64) -> Postfix {
        let tokens = self
            .tokens
            .iter()
            .map(|t| match t {
                Token::Variable => Token::number(value),
                other => other.clone(),
            })
            .collect();
        Postfix { tokens }
    }
}

/// Renders every token followed by a single space, e.g. `"3 4 + "`
impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{} ", token)?;
        }
        Ok(())
    }
}

/// Convert infix `text` to postfix
///
/// # Example
/// ```rust
/// use smartcalc_expr::postfix::to_postfix;
///
/// assert_eq!(to_postfix("8 / 4 - 2").unwrap().to_string(), "8 4 / 2 - ");
/// assert_eq!(to_postfix("cos(45.4)").unwrap().to_string(), "45.4 cos ");
/// ```
pub fn to_postfix(text: &str) -> ExprResult<Postfix> {
    let chars: Vec<char> = text.chars().collect();
    let mut output: Vec<Token> = Vec::new();
    let mut stack: Vec<Token> = Vec::new();
    // Whether the previous significant token completed an operand
    let mut after_operand = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut decimal_found = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if decimal_found {
                        break;
                    }
                    decimal_found = true;
                }
                i += 1;
            }
            let number: String = chars[start..i].iter().collect();
            let value: f64 = number
                .parse()
                .map_err(|_| ExprError::syntax(format!("Malformed number '{}'", number)))?;
            output.push(Token::Number {
                value,
                text: number,
            });
            after_operand = true;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            match Function::from_name(&name) {
                Some(func) => {
                    stack.push(Token::Function(func));
                    after_operand = false;
                }
                None => {
                    output.push(if name == VARIABLE {
                        Token::Variable
                    } else {
                        Token::Identifier(name)
                    });
                    after_operand = true;
                }
            }
            continue;
        }

        match c {
            '(' => {
                stack.push(Token::LeftParen);
                after_operand = false;
            }
            ')' => {
                loop {
                    match stack.pop() {
                        Some(Token::LeftParen) => break,
                        Some(token) => output.push(token),
                        None => return Err(ExprError::syntax("Unbalanced ')'")),
                    }
                }
                if matches!(stack.last(), Some(Token::Function(_))) {
                    output.extend(stack.pop());
                }
                after_operand = true;
            }
            '-' | '+' if !after_operand => {
                // Prefix sign: `+` is a no-op, `-` waits on the stack
                if c == '-' {
                    stack.push(Token::Negate);
                }
            }
            _ => {
                if let Some(op) = Operator::from_char(c) {
                    while let Some(top) = stack.last().and_then(Token::precedence) {
                        let pops = if op.is_right_associative() {
                            top > op.precedence()
                        } else {
                            top >= op.precedence()
                        };
                        if !pops {
                            break;
                        }
                        output.extend(stack.pop());
                    }
                    stack.push(Token::Operator(op));
                    after_operand = false;
                }
                // Whitespace and anything else is skipped
            }
        }
        i += 1;
    }

    while let Some(token) = stack.pop() {
        if token == Token::LeftParen {
            return Err(ExprError::syntax("Unbalanced '('"));
        }
        output.push(token);
    }

    Ok(Postfix::new(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn postfix(text: &str) -> String {
        to_postfix(text).unwrap().to_string()
    }

    #[test]
    fn test_binary_operators() {
        assert_eq!(postfix("3 + 4"), "3 4 + ");
        assert_eq!(postfix("8 / 4 - 2"), "8 4 / 2 - ");
        assert_eq!(postfix("3 ^ 4 + 5"), "3 4 ^ 5 + ");
        assert_eq!(postfix("7 % 4 * 2"), "7 4 % 2 * ");
        assert_eq!(postfix("1 + 2 * 3"), "1 2 3 * + ");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(postfix("2 ^ 3 ^ 2"), "2 3 2 ^ ^ ");
        assert_eq!(postfix("2 - 3 - 4"), "2 3 - 4 - ");
    }

    #[test]
    fn test_functions() {
        assert_eq!(postfix("cos(45.4)"), "45.4 cos ");
        assert_eq!(postfix("ln(2.718281828)"), "2.718281828 ln ");
        assert_eq!(postfix("sin(acos(0.5)) + log(100) * sqrt(16)"), "0.5 acos sin 100 log 16 sqrt * + ");
        assert_eq!(postfix("atan(2 + tan(0.5))"), "2 0.5 tan + atan ");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(postfix("(1 + 2) * 3"), "1 2 + 3 * ");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(postfix("-2 ^ 2"), "2 2 ^ ~ ");
        assert_eq!(postfix("2 * -3"), "2 3 ~ * ");
        assert_eq!(postfix("-2 * 3"), "2 ~ 3 * ");
        assert_eq!(postfix("(-3)^2"), "3 ~ 2 ^ ");
        assert_eq!(postfix("+5"), "5 ");
    }

    #[test]
    fn test_second_decimal_point_ends_number() {
        let p = to_postfix("3.14.159").unwrap();
        assert_eq!(p.to_string(), "3.14 .159 ");
        assert_eq!(
            p.tokens()[1],
            Token::Number {
                value: 0.159,
                text: ".159".to_string()
            }
        );
    }

    #[test]
    fn test_numbers_keep_written_text() {
        assert_eq!(postfix("2.50 + 1.0"), "2.50 1.0 + ");
        assert_eq!(postfix("12345678901234567891 * 2"), "12345678901234567891 2 * ");
        assert_eq!(postfix("007 - 0.10"), "007 0.10 - ");
    }

    #[test]
    fn test_identifiers() {
        let p = to_postfix("sin(x) * x").unwrap();
        assert_eq!(p.to_string(), "x sin x * ");
        assert!(p.has_variable());
        assert_eq!(p.bind(2.0).to_string(), "2 sin 2 * ");

        // Letter runs stop at digits, so log10 is `log` applied to (10, 100)
        assert_eq!(postfix("log10(100)"), "10 100 log ");
        assert_eq!(postfix("foo + 1"), "foo 1 + ");
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(to_postfix("(1 + 2").is_err());
        assert!(to_postfix("1 + 2)").is_err());
    }
}
