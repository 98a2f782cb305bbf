//! # smartcalc-finance
//!
//! Loan and deposit calculators for smartcalc, computed in decimal
//! arithmetic so that long terms do not drift.
//!
//! Each calculator has two faces:
//! - a typed API (`CreditCalculator`, `DepositCalculator`) returning
//!   [`FinanceResult`] with decimal summaries and per-month schedules
//! - a flat function (`compute_credit`, `compute_deposit`) returning float
//!   triples where invalid inputs show up as not-a-number in every field
//!
//! ## Example
//!
//! ```rust
//! use smartcalc_finance::compute_credit;
//!
//! let credit = compute_credit(10000.0, 12, 6.0, true);
//! assert_eq!(credit.monthly_payment, 861.0);
//! ```

pub mod credit;
pub mod deposit;
pub mod error;
pub mod money;

pub use credit::{
    compute_credit, CreditCalculator, CreditInputs, CreditResult, CreditSummary, RepaymentType,
    ScheduledPayment,
};
pub use deposit::{
    compute_deposit, DepositCalculator, DepositInputs, DepositMonth, DepositResult,
    DepositSummary,
};
pub use error::{FinanceError, FinanceResult};
pub use rust_decimal::Decimal;
