//! Loan repayment calculator
//!
//! Supports annuity (equal monthly payments) and differential (constant
//! principal portion, declining interest) repayment. All accumulation is
//! done in [`Decimal`]; each reported figure is rounded to a whole unit on
//! its own, so `monthly_payment * term` can differ from `total_repayment`
//! by a unit.

use crate::error::{FinanceError, FinanceResult};
use crate::money::{checked, checked_pow, round_cents, round_whole, to_decimal, to_f64};
use log::debug;
use rust_decimal::Decimal;

/// Repayment scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RepaymentType {
    /// Equal monthly payments
    Annuity,
    /// Constant principal portion plus interest on the remainder
    Differential,
}

impl From<bool> for RepaymentType {
    /// `true` selects annuity repayment
    fn from(is_annuity: bool) -> Self {
        if is_annuity {
            RepaymentType::Annuity
        } else {
            RepaymentType::Differential
        }
    }
}

/// Loan parameters as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditInputs {
    pub amount: f64,
    pub term_months: i64,
    pub annual_rate_percent: f64,
    pub repayment: RepaymentType,
}

/// Rounded three-figure summary of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditSummary {
    pub monthly_payment: Decimal,
    pub total_repayment: Decimal,
    pub overpayment: Decimal,
}

/// One month of the repayment schedule, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledPayment {
    pub month: u32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    /// Principal still owed after this payment
    pub remaining: Decimal,
}

/// Float summary using not-a-number for invalid inputs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditResult {
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub overpayment: f64,
}

impl CreditResult {
    /// All fields not-a-number
    pub fn invalid() -> Self {
        Self {
            monthly_payment: f64::NAN,
            total_repayment: f64::NAN,
            overpayment: f64::NAN,
        }
    }

    pub fn is_valid(&self) -> bool {
        !(self.monthly_payment.is_nan() || self.total_repayment.is_nan() || self.overpayment.is_nan())
    }
}

impl From<FinanceResult<CreditSummary>> for CreditResult {
    fn from(result: FinanceResult<CreditSummary>) -> Self {
        match result {
            Ok(summary) => Self {
                monthly_payment: to_f64(summary.monthly_payment),
                total_repayment: to_f64(summary.total_repayment),
                overpayment: to_f64(summary.overpayment),
            },
            Err(err) => {
                debug!("credit calculation failed: {}", err);
                Self::invalid()
            }
        }
    }
}

/// A validated loan
#[derive(Debug, Clone)]
pub struct CreditCalculator {
    amount: Decimal,
    term: u32,
    monthly_rate: Decimal,
    repayment: RepaymentType,
}

impl CreditCalculator {
    /// Validate `inputs`: amount > 0, term > 0, and a monthly rate
    /// (annual percent / 1200) within `[0, 1]`.
    pub fn new(inputs: &CreditInputs) -> FinanceResult<Self> {
        let amount = to_decimal(inputs.amount, "amount")?;
        if amount <= Decimal::ZERO {
            return Err(FinanceError::invalid("amount", "must be positive"));
        }

        let term = u32::try_from(inputs.term_months)
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| FinanceError::invalid("term_months", "must be a positive month count"))?;

        let annual = to_decimal(inputs.annual_rate_percent, "annual_rate_percent")?;
        let monthly_rate = annual / Decimal::from(1200);
        if monthly_rate < Decimal::ZERO || monthly_rate > Decimal::ONE {
            return Err(FinanceError::invalid(
                "annual_rate_percent",
                "must be between 0 and 1200",
            ));
        }

        Ok(Self {
            amount,
            term,
            monthly_rate,
            repayment: inputs.repayment,
        })
    }

    pub fn repayment(&self) -> RepaymentType {
        self.repayment
    }

    pub fn summary(&self) -> FinanceResult<CreditSummary> {
        let summary = match self.repayment {
            RepaymentType::Annuity => self.annuity_summary()?,
            RepaymentType::Differential => self.differential_summary()?,
        };
        debug!(
            "{:?} credit of {} over {} months: {:?}",
            self.repayment, self.amount, self.term, summary
        );
        Ok(summary)
    }

    /// Month-by-month repayment schedule
    pub fn schedule(&self) -> FinanceResult<Vec<ScheduledPayment>> {
        let mut rows = Vec::with_capacity(self.term as usize);
        let mut remaining = self.amount;
        let principal_part = self.principal_part();
        let annuity = match self.repayment {
            RepaymentType::Annuity => Some(self.annuity_payment()?),
            RepaymentType::Differential => None,
        };

        for month in 1..=self.term {
            let interest = checked(remaining.checked_mul(self.monthly_rate), "interest")?;
            let (payment, principal) = match annuity {
                Some(payment) => (payment, checked(payment.checked_sub(interest), "principal")?),
                None => (
                    checked(principal_part.checked_add(interest), "payment")?,
                    principal_part,
                ),
            };
            remaining = checked(remaining.checked_sub(principal), "remaining principal")?;

            rows.push(ScheduledPayment {
                month,
                payment: round_cents(payment),
                principal: round_cents(principal),
                interest: round_cents(interest),
                remaining: round_cents(remaining.max(Decimal::ZERO)),
            });
        }

        Ok(rows)
    }

    fn principal_part(&self) -> Decimal {
        self.amount / Decimal::from(self.term)
    }

    fn differential_summary(&self) -> FinanceResult<CreditSummary> {
        let principal_part = self.principal_part();
        let mut remaining = self.amount;
        let mut total_interest = Decimal::ZERO;
        let mut total_payment = Decimal::ZERO;

        for _ in 0..self.term {
            let interest = checked(remaining.checked_mul(self.monthly_rate), "interest")?;
            total_interest = checked(total_interest.checked_add(interest), "total interest")?;
            total_payment = checked(
                principal_part
                    .checked_add(interest)
                    .and_then(|payment| total_payment.checked_add(payment)),
                "total repayment",
            )?;
            remaining = checked(remaining.checked_sub(principal_part), "remaining principal")?;
        }

        Ok(CreditSummary {
            monthly_payment: round_whole(total_payment / Decimal::from(self.term)),
            total_repayment: round_whole(total_payment),
            overpayment: round_whole(total_interest),
        })
    }

    fn annuity_summary(&self) -> FinanceResult<CreditSummary> {
        let payment = self.annuity_payment()?;
        let total = checked(payment.checked_mul(Decimal::from(self.term)), "total repayment")?;

        Ok(CreditSummary {
            monthly_payment: round_whole(payment),
            total_repayment: round_whole(total),
            overpayment: round_whole(checked(total.checked_sub(self.amount), "overpayment")?),
        })
    }

    /// `amount * r(1+r)^n / ((1+r)^n - 1)`, or `amount / n` at a zero rate
    fn annuity_payment(&self) -> FinanceResult<Decimal> {
        let r = self.monthly_rate;
        if r.is_zero() {
            return Ok(self.principal_part());
        }

        let growth = checked(
            Decimal::ONE
                .checked_add(r)
                .and_then(|base| checked_pow(base, self.term)),
            "annuity growth factor",
        )?;
        let coefficient = checked(
            r.checked_mul(growth).and_then(|numerator| {
                growth
                    .checked_sub(Decimal::ONE)
                    .and_then(|denominator| numerator.checked_div(denominator))
            }),
            "annuity coefficient",
        )?;
        checked(self.amount.checked_mul(coefficient), "annuity payment")
    }
}

/// Compute a loan summary, reporting invalid inputs as not-a-number fields
pub fn compute_credit(
    amount: f64,
    term_months: i64,
    annual_rate_percent: f64,
    is_annuity: bool,
) -> CreditResult {
    let inputs = CreditInputs {
        amount,
        term_months,
        annual_rate_percent,
        repayment: RepaymentType::from(is_annuity),
    };
    CreditResult::from(CreditCalculator::new(&inputs).and_then(|calc| calc.summary()))
}
