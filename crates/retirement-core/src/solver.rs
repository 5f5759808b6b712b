//! Gap and required-contribution solver: the shortfall between required and
//! estimated corpus, and the algebraic inverse of the annuity future-value
//! formula that finds the monthly contribution closing it.

use rust_decimal::Decimal;

use crate::error::RetirementError;
use crate::time_value::{self, compound, MONTHS_PER_YEAR, RATE_EPSILON};
use crate::types::{Money, Rate};
use crate::RetirementResult;

/// Shortfall (positive) or surplus (negative) at retirement.
pub fn corpus_gap(required_corpus: Money, estimated_corpus: Money) -> Money {
    required_corpus - estimated_corpus
}

/// Monthly contribution needed to reach `target_corpus` at retirement, after
/// the existing corpus has been grown to the retirement date.
///
/// From FV = P * ((1+r)^n - 1) / r: P = FV * r / ((1+r)^n - 1), with monthly
/// rate r and n months to retirement. A horizon of zero (or less) returns 0;
/// there is nothing left to invest in.
pub fn required_monthly_contribution(
    target_corpus: Money,
    existing_corpus: Money,
    pre_retirement_return: Rate,
    years_to_retire: i64,
) -> RetirementResult<Money> {
    if existing_corpus < Decimal::ZERO {
        return Err(RetirementError::InvalidInput {
            field: "existing_corpus".into(),
            reason: "amount must be >= 0".into(),
        });
    }

    let n = years_to_retire * MONTHS_PER_YEAR;
    if n <= 0 {
        return Ok(Decimal::ZERO);
    }

    let fv_existing =
        time_value::fv_lump_sum(existing_corpus, pre_retirement_return, years_to_retire)?;
    let needed = (target_corpus - fv_existing).max(Decimal::ZERO);
    if needed.is_zero() {
        // Existing corpus alone reaches the target
        return Ok(Decimal::ZERO);
    }

    let monthly_rate = pre_retirement_return / Decimal::from(MONTHS_PER_YEAR);
    if monthly_rate.abs() < RATE_EPSILON {
        return Ok(needed / Decimal::from(n));
    }

    let denom = compound(monthly_rate, n as u32)? - Decimal::ONE;
    if denom.is_zero() {
        return Err(RetirementError::DivisionByZero {
            context: "required-contribution annuity factor".into(),
        });
    }

    needed
        .checked_mul(monthly_rate)
        .map(|x| x / denom)
        .ok_or_else(|| RetirementError::Overflow {
            context: "required monthly contribution".into(),
        })
}
