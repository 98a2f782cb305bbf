//! Deposit growth calculator
//!
//! Simulates the balance month by month. Each month:
//! 1. the monthly deposit is added and the monthly withdrawal removed
//! 2. interest accrues at `annual% / 100 / 12` on the balance
//! 3. tax is taken at `tax%` of that interest and always counted
//! 4. net interest is added to the balance every month when compounding,
//!    otherwise only on crediting months (every `frequency` months and the
//!    final month), where it is also counted as paid interest

use crate::error::{FinanceError, FinanceResult};
use crate::money::{checked, round_cents, to_decimal, to_f64};
use log::{debug, trace};
use rust_decimal::Decimal;

/// Deposit parameters as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositInputs {
    pub initial_amount: f64,
    pub term_months: i64,
    pub annual_rate_percent: f64,
    pub tax_rate_percent: f64,
    /// Months between interest credits when not compounding
    pub crediting_frequency_months: i64,
    pub is_compounded: bool,
    pub monthly_deposit: f64,
    pub monthly_withdrawal: f64,
}

/// Totals at the end of the term, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositSummary {
    pub total_interest: Decimal,
    pub total_tax: Decimal,
    pub final_balance: Decimal,
}

/// One simulated month, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositMonth {
    pub month: u32,
    pub interest: Decimal,
    pub tax: Decimal,
    /// Net interest added to the balance this month
    pub credited: Decimal,
    /// Balance at the end of the month
    pub balance: Decimal,
}

/// Float totals using not-a-number for invalid inputs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositResult {
    pub total_interest: f64,
    pub total_tax: f64,
    pub final_balance: f64,
}

impl DepositResult {
    /// All fields not-a-number
    pub fn invalid() -> Self {
        Self {
            total_interest: f64::NAN,
            total_tax: f64::NAN,
            final_balance: f64::NAN,
        }
    }

    pub fn is_valid(&self) -> bool {
        !(self.total_interest.is_nan() || self.total_tax.is_nan() || self.final_balance.is_nan())
    }
}

impl From<FinanceResult<DepositSummary>> for DepositResult {
    fn from(result: FinanceResult<DepositSummary>) -> Self {
        match result {
            Ok(summary) => Self {
                total_interest: to_f64(summary.total_interest),
                total_tax: to_f64(summary.total_tax),
                final_balance: to_f64(summary.final_balance),
            },
            Err(err) => {
                debug!("deposit calculation failed: {}", err);
                Self::invalid()
            }
        }
    }
}

/// A validated deposit
#[derive(Debug, Clone)]
pub struct DepositCalculator {
    initial_amount: Decimal,
    term: u32,
    monthly_rate: Decimal,
    tax_rate: Decimal,
    frequency: u32,
    is_compounded: bool,
    monthly_deposit: Decimal,
    monthly_withdrawal: Decimal,
}

fn non_negative(value: f64, field: &'static str) -> FinanceResult<Decimal> {
    let value = to_decimal(value, field)?;
    if value < Decimal::ZERO {
        return Err(FinanceError::invalid(field, "must not be negative"));
    }
    Ok(value)
}

fn positive_months(value: i64, field: &'static str) -> FinanceResult<u32> {
    u32::try_from(value)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| FinanceError::invalid(field, "must be a positive month count"))
}

impl DepositCalculator {
    pub fn new(inputs: &DepositInputs) -> FinanceResult<Self> {
        let hundred = Decimal::ONE_HUNDRED;
        Ok(Self {
            initial_amount: non_negative(inputs.initial_amount, "initial_amount")?,
            term: positive_months(inputs.term_months, "term_months")?,
            monthly_rate: non_negative(inputs.annual_rate_percent, "annual_rate_percent")?
                / hundred
                / Decimal::from(12),
            tax_rate: non_negative(inputs.tax_rate_percent, "tax_rate_percent")? / hundred,
            frequency: positive_months(
                inputs.crediting_frequency_months,
                "crediting_frequency_months",
            )?,
            is_compounded: inputs.is_compounded,
            monthly_deposit: non_negative(inputs.monthly_deposit, "monthly_deposit")?,
            monthly_withdrawal: non_negative(inputs.monthly_withdrawal, "monthly_withdrawal")?,
        })
    }

    pub fn summary(&self) -> FinanceResult<DepositSummary> {
        self.simulate(|_| {})
    }

    /// Month-by-month ledger of the simulation
    pub fn ledger(&self) -> FinanceResult<Vec<DepositMonth>> {
        let mut rows = Vec::with_capacity(self.term as usize);
        self.simulate(|row| rows.push(row))?;
        Ok(rows)
    }

    fn simulate<F: FnMut(DepositMonth)>(&self, mut on_month: F) -> FinanceResult<DepositSummary> {
        let mut balance = self.initial_amount;
        let mut total_tax = Decimal::ZERO;
        let mut total_interest = Decimal::ZERO;

        for month in 1..=self.term {
            balance = checked(
                balance
                    .checked_add(self.monthly_deposit)
                    .and_then(|b| b.checked_sub(self.monthly_withdrawal)),
                "balance",
            )?;

            let interest = checked(balance.checked_mul(self.monthly_rate), "interest")?;
            let tax = checked(interest.checked_mul(self.tax_rate), "tax")?;
            total_tax = checked(total_tax.checked_add(tax), "total tax")?;

            let credits = self.is_compounded || month % self.frequency == 0 || month == self.term;
            let credited = if credits {
                checked(interest.checked_sub(tax), "credited interest")?
            } else {
                Decimal::ZERO
            };
            balance = checked(balance.checked_add(credited), "balance")?;
            if !self.is_compounded {
                total_interest = checked(total_interest.checked_add(credited), "total interest")?;
            }

            trace!("month {}: balance {} interest {} tax {}", month, balance, interest, tax);
            on_month(DepositMonth {
                month,
                interest: round_cents(interest),
                tax: round_cents(tax),
                credited: round_cents(credited),
                balance: round_cents(balance),
            });
        }

        let summary = DepositSummary {
            total_interest: round_cents(total_interest),
            total_tax: round_cents(total_tax),
            final_balance: round_cents(balance),
        };
        debug!("deposit over {} months: {:?}", self.term, summary);
        Ok(summary)
    }
}

/// Compute deposit totals, reporting invalid inputs as not-a-number fields
#[allow(clippy::too_many_arguments)]
pub fn compute_deposit(
    initial_amount: f64,
    term_months: i64,
    annual_rate_percent: f64,
    tax_rate_percent: f64,
    crediting_frequency_months: i64,
    is_compounded: bool,
    monthly_deposit: f64,
    monthly_withdrawal: f64,
) -> DepositResult {
    let inputs = DepositInputs {
        initial_amount,
        term_months,
        annual_rate_percent,
        tax_rate_percent,
        crediting_frequency_months,
        is_compounded,
        monthly_deposit,
        monthly_withdrawal,
    };
    DepositResult::from(DepositCalculator::new(&inputs).and_then(|calc| calc.summary()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn inputs() -> DepositInputs {
        DepositInputs {
            initial_amount: 10000.0,
            term_months: 12,
            annual_rate_percent: 5.0,
            tax_rate_percent: 10.0,
            crediting_frequency_months: 1,
            is_compounded: true,
            monthly_deposit: 0.0,
            monthly_withdrawal: 0.0,
        }
    }

    #[test]
    fn test_compounded_matches_reference() {
        let result = compute_deposit(10000.0, 12, 5.0, 10.0, 1, true, 0.0, 0.0);

        let mut balance = 10000.0_f64;
        let mut tax = 0.0_f64;
        for _ in 0..12 {
            let interest = balance * 0.05 / 12.0;
            tax += interest * 0.1;
            balance += interest * 0.9;
        }

        assert!((result.final_balance - balance).abs() < 1.0);
        assert!((result.total_tax - tax).abs() < 1.0);
        // Paid-out interest is only tracked when not compounding
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_simple_interest_credited_quarterly() {
        let calc = DepositCalculator::new(&DepositInputs {
            annual_rate_percent: 12.0,
            tax_rate_percent: 0.0,
            crediting_frequency_months: 3,
            is_compounded: false,
            ..inputs()
        })
        .unwrap();
        let summary = calc.summary().unwrap();

        // Only the crediting month's own interest reaches the balance
        let ledger = calc.ledger().unwrap();
        assert_eq!(ledger[0].credited, Decimal::ZERO);
        assert_eq!(ledger[2].credited, dec("100"));
        assert_eq!(ledger[2].balance, dec("10100"));
        assert_eq!(ledger[11].month, 12);
        assert_eq!(summary.final_balance, ledger[11].balance);
        assert_eq!(summary.total_interest, summary.final_balance - dec("10000"));
        assert_eq!(summary.total_tax, Decimal::ZERO);
    }

    #[test]
    fn test_final_month_always_credits() {
        let calc = DepositCalculator::new(&DepositInputs {
            term_months: 5,
            crediting_frequency_months: 12,
            is_compounded: false,
            tax_rate_percent: 0.0,
            annual_rate_percent: 12.0,
            ..inputs()
        })
        .unwrap();
        let ledger = calc.ledger().unwrap();
        assert!(ledger[..4].iter().all(|m| m.credited.is_zero()));
        assert_eq!(ledger[4].credited, dec("100"));
    }

    #[test]
    fn test_deposits_and_withdrawals() {
        let result = compute_deposit(0.0, 3, 0.0, 0.0, 1, true, 500.0, 200.0);
        assert_eq!(result.final_balance, 900.0);
        assert_eq!(result.total_tax, 0.0);
    }

    #[test]
    fn test_tax_is_counted_every_month() {
        let calc = DepositCalculator::new(&DepositInputs {
            annual_rate_percent: 12.0,
            tax_rate_percent: 10.0,
            crediting_frequency_months: 12,
            is_compounded: false,
            ..inputs()
        })
        .unwrap();
        // 100 interest accrues every month on the untouched balance
        assert_eq!(calc.summary().unwrap().total_tax, dec("120"));
    }

    #[test]
    fn test_overflow_gives_nan() {
        // a withdrawal beyond the decimal range below zero
        let result = compute_deposit(0.0, 2, 0.0, 0.0, 1, true, 0.0, 7e28);
        assert!(!result.is_valid());

        // 1e20 * 1.0 monthly rate * 1e10 tax rate
        let result = compute_deposit(1e20, 1, 1200.0, 1e12, 1, true, 0.0, 0.0);
        assert!(!result.is_valid());

        let err = DepositCalculator::new(&DepositInputs {
            initial_amount: 7e28,
            annual_rate_percent: 1200.0,
            tax_rate_percent: 0.0,
            ..inputs()
        })
        .unwrap()
        .summary()
        .unwrap_err();
        assert!(matches!(err, FinanceError::Overflow(_)));
    }

    #[test]
    fn test_invalid_inputs_give_nan() {
        for result in [
            compute_deposit(-1.0, 12, 5.0, 10.0, 1, true, 0.0, 0.0),
            compute_deposit(1000.0, 0, 5.0, 10.0, 1, true, 0.0, 0.0),
            compute_deposit(1000.0, 12, -5.0, 10.0, 1, true, 0.0, 0.0),
            compute_deposit(1000.0, 12, 5.0, -10.0, 1, true, 0.0, 0.0),
            compute_deposit(1000.0, 12, 5.0, 10.0, 0, false, 0.0, 0.0),
            compute_deposit(1000.0, 12, 5.0, 10.0, 1, true, -1.0, 0.0),
            compute_deposit(1000.0, 12, 5.0, 10.0, 1, true, 0.0, -1.0),
        ] {
            assert!(!result.is_valid());
            assert!(result.final_balance.is_nan());
            assert!(result.total_tax.is_nan());
            assert!(result.total_interest.is_nan());
        }
    }
}
