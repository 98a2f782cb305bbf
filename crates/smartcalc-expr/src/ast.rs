//! Expression syntax tree produced by the validating parser

use crate::token::Operator;

/// Parsed infix expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Free identifier (only meaningful once bound)
    Variable(String),
    /// Prefix sign change
    Negate(Box<Expr>),
    /// Binary operation
    BinaryOp {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Single-argument function call, name as written
    Call { name: String, arg: Box<Expr> },
}
