//! Postfix token types

use crate::error::{ExprError, ExprResult};
use crate::functions::Function;
use std::fmt;

/// The reserved name of the single free variable
pub const VARIABLE: &str = "x";

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    /// Map an operator character to its operator
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Modulo),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Modulo => '%',
            Operator::Power => '^',
        }
    }

    /// Binding strength: 1 for `+ -`, 2 for `* / %`, 3 for `^`
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide | Operator::Modulo => 2,
            Operator::Power => 3,
        }
    }

    /// Only `^` groups right to left
    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Power)
    }

    /// Apply the operator to `left` and `right`
    pub fn apply(self, left: f64, right: f64) -> ExprResult<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide | Operator::Modulo if right == 0.0 => Err(ExprError::DivisionByZero),
            Operator::Divide => Ok(left / right),
            Operator::Modulo => Ok(left % right),
            Operator::Power => Ok(left.powf(right)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single infix or postfix token
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A numeric literal and its text as written
    Number { value: f64, text: String },
    Operator(Operator),
    /// Prefix sign change
    Negate,
    Function(Function),
    /// The reserved free variable, bound per sample by the graph sampler
    Variable,
    /// Any other letter run; never evaluable
    Identifier(String),
    LeftParen,
    RightParen,
}

impl Token {
    /// A number token whose text is the shortest rendering of `value`
    pub fn number(value: f64) -> Self {
        Token::Number {
            value,
            text: value.to_string(),
        }
    }

    /// Stack precedence used by the converter.
    ///
    /// Negation sits at the level of `^` so that it yields to a following
    /// right-associative `^` but binds tighter than everything else.
    pub(crate) fn precedence(&self) -> Option<u8> {
        match self {
            Token::Operator(op) => Some(op.precedence()),
            Token::Negate => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number { text, .. } => f.write_str(text),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Negate => f.write_str("~"),
            Token::Function(func) => write!(f, "{}", func),
            Token::Variable => f.write_str(VARIABLE),
            Token::Identifier(name) => f.write_str(name),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        assert_eq!(Operator::Add.precedence(), 1);
        assert_eq!(Operator::Subtract.precedence(), 1);
        assert_eq!(Operator::Multiply.precedence(), 2);
        assert_eq!(Operator::Divide.precedence(), 2);
        assert_eq!(Operator::Modulo.precedence(), 2);
        assert_eq!(Operator::Power.precedence(), 3);
        assert!(Operator::Power.is_right_associative());
        assert!(!Operator::Subtract.is_right_associative());
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operator::Power.apply(3.0, 4.0).unwrap(), 81.0);
        assert_eq!(Operator::Modulo.apply(7.0, 4.0).unwrap(), 3.0);
        assert_eq!(Operator::Divide.apply(1.0, 0.0), Err(ExprError::DivisionByZero));
        assert_eq!(Operator::Modulo.apply(1.0, 0.0), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::number(45.4).to_string(), "45.4");
        assert_eq!(Token::number(8.0).to_string(), "8");
        let written = Token::Number {
            value: 2.5,
            text: "2.50".to_string(),
        };
        assert_eq!(written.to_string(), "2.50");
        assert_eq!(Token::Operator(Operator::Power).to_string(), "^");
        assert_eq!(Token::Function(Function::Acos).to_string(), "acos");
        assert_eq!(Token::Variable.to_string(), "x");
    }
}
