//! Prelude module - common imports for smartcalc users
//!
//! ```rust
//! use smartcalc::prelude::*;
//! ```

pub use crate::{
    // Expression entry points
    calculate,
    compute_credit,
    compute_deposit,
    evaluate,
    Calculation,
    // Finance types
    CreditCalculator,
    CreditInputs,
    CreditResult,
    DepositCalculator,
    DepositInputs,
    DepositResult,
    // Error types
    ExprError,
    Expression,
    ExpressionReport,
    FinanceError,
    GraphSeries,
    GraphWindow,
    Outcome,
    RepaymentType,
};
