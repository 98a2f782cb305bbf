//! # smartcalc
//!
//! A calculator core: arithmetic expressions with one free variable and
//! graph sampling, plus loan and deposit calculators.
//!
//! ## Features
//!
//! - Shunting-yard conversion and postfix evaluation of `+ - * / % ^` and
//!   `sin cos tan asin acos atan sqrt ln log`
//! - `| x = <value>` bindings and graph data around the bound value
//! - Annuity and differential loan summaries and schedules
//! - Deposit growth with tax, deposits, withdrawals and compounding
//!
//! ## Example
//!
//! ```rust
//! use smartcalc::prelude::*;
//!
//! let report = evaluate("sin(x) * cos(x) | x = 45");
//! assert_eq!(report.result, "0.45");
//!
//! let credit = compute_credit(10000.0, 12, 6.0, true);
//! assert_eq!(credit.total_repayment, 10328.0);
//!
//! let deposit = compute_deposit(10000.0, 12, 5.0, 10.0, 1, true, 0.0, 0.0);
//! assert!(deposit.final_balance > 10000.0);
//! ```

pub mod prelude;

pub use smartcalc_expr::{
    calculate, calculate_with_window, Calculation, ExprError, ExprResult, Expression, Function,
    GraphSeries, GraphWindow, Operator, Outcome, Postfix, to_postfix, Token,
};
pub use smartcalc_finance::{
    compute_credit, compute_deposit, CreditCalculator, CreditInputs, CreditResult, CreditSummary,
    Decimal, DepositCalculator, DepositInputs, DepositMonth, DepositResult, DepositSummary,
    FinanceError, FinanceResult, RepaymentType, ScheduledPayment,
};

/// What a caller gets back for an expression string
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionReport {
    /// Two-decimal number, or one of the error strings
    pub result: String,
    /// Plot x values, same length as `ys`
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl From<Calculation> for ExpressionReport {
    fn from(calc: Calculation) -> Self {
        Self {
            result: calc.result(),
            xs: calc.graph.xs,
            ys: calc.graph.ys,
        }
    }
}

/// Evaluate an expression string and sample its graph
///
/// ```rust
/// let report = smartcalc::evaluate("10 / 0");
/// assert_eq!(report.result, "division by zero");
/// ```
pub fn evaluate(expression: &str) -> ExpressionReport {
    ExpressionReport::from(calculate(expression))
}
