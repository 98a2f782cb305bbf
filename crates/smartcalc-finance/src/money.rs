//! Decimal helpers shared by the calculators

use crate::error::{FinanceError, FinanceResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert a caller-supplied float to a decimal.
///
/// Non-finite values and values beyond the decimal range are rejected.
pub fn to_decimal(value: f64, field: &'static str) -> FinanceResult<Decimal> {
    if !value.is_finite() {
        return Err(FinanceError::invalid(field, "must be a finite number"));
    }
    Decimal::from_f64(value).ok_or_else(|| FinanceError::invalid(field, "is out of range"))
}

/// Round to a whole currency unit, halves away from zero
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents, halves away from zero
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert back to a float for the sentinel-style outputs
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// `base^exp` by repeated squaring, `None` on overflow
pub fn checked_pow(base: Decimal, exp: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut exp = exp;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

/// Attach a computation name to an overflowing checked operation
pub(crate) fn checked(value: Option<Decimal>, what: &'static str) -> FinanceResult<Decimal> {
    value.ok_or(FinanceError::Overflow(what))
}
