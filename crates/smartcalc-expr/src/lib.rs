//! # smartcalc-expr
//!
//! Expression engine for smartcalc.
//!
//! This crate provides:
//! - Bound-variable preprocessing (`sin(x) | x = 45`)
//! - Validation by recursive descent parsing and trial evaluation
//! - Infix to postfix conversion (shunting-yard)
//! - A postfix stack evaluator over nine domain-checked functions
//! - Graph sampling around the bound variable
//!
//! ## Example
//!
//! ```rust
//! use smartcalc_expr::calculate;
//!
//! let calc = calculate("sin(x) * cos(x) | x = 45");
//! assert_eq!(calc.result(), "0.45");
//! assert_eq!(calc.graph.xs.len(), calc.graph.ys.len());
//! ```

pub mod ast;
pub mod calculator;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod graph;
pub mod parser;
pub mod postfix;
pub mod preprocess;
pub mod token;
pub mod validator;

pub use calculator::{calculate, calculate_with_window, Calculation, Expression, Outcome};
pub use error::{ExprError, ExprResult};
pub use evaluator::{evaluate, evaluate_at};
pub use functions::Function;
pub use graph::{GraphSeries, GraphWindow};
pub use postfix::{to_postfix, Postfix};
pub use preprocess::{preprocess, Preprocessed};
pub use token::{Operator, Token, VARIABLE};
pub use validator::validate;
