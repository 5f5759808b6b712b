//! Required-corpus model: converts a desired monthly spend at today's prices
//! into the lump sum needed at retirement, by present-valuing the retirement
//! spending stream as an inflation-adjusted annuity at the real rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RetirementError;
use crate::time_value::{self, compound, MONTHS_PER_YEAR};
use crate::types::{Money, Rate, RateAssumptions};
use crate::RetirementResult;

/// Real monthly rates closer to zero than this mean the return merely keeps
/// pace with inflation; the annuity degenerates to a flat sum of withdrawals.
const REAL_RATE_EPSILON: Decimal = dec!(0.000001);

fn check_expense(field: &str, monthly_expense: Money) -> RetirementResult<()> {
    if monthly_expense <= Decimal::ZERO {
        return Err(RetirementError::InvalidInput {
            field: field.into(),
            reason: "target monthly spend must be > 0".into(),
        });
    }
    Ok(())
}

/// Monthly spend at the retirement date, inflated from today's prices.
pub fn monthly_expense_at_retirement(
    monthly_expense_today: Money,
    years_to_retire: i64,
    inflation_rate: Rate,
) -> RetirementResult<Money> {
    check_expense("monthly_expense_today", monthly_expense_today)?;
    time_value::inflation_adjust(monthly_expense_today, inflation_rate, years_to_retire)
}

/// Corpus needed at retirement to fund `monthly_expense_today` (in today's
/// prices) for `years_in_retirement`, given the rate assumptions.
pub fn required_corpus(
    monthly_expense_today: Money,
    years_to_retire: i64,
    years_in_retirement: i64,
    rates: &RateAssumptions,
) -> RetirementResult<Money> {
    let monthly_at_retirement = monthly_expense_at_retirement(
        monthly_expense_today,
        years_to_retire,
        rates.inflation,
    )?;
    required_corpus_from_monthly(monthly_at_retirement, years_in_retirement, rates)
}

/// Corpus needed at retirement given the monthly spend already expressed in
/// retirement-date prices.
///
/// PV = m * (1 - (1 + rr)^-n) / rr with rr the real monthly rate during
/// retirement and n the retirement horizon in months. The formula holds for
/// rr of either sign; only the near-zero guard is special-cased.
pub fn required_corpus_from_monthly(
    monthly_at_retirement: Money,
    years_in_retirement: i64,
    rates: &RateAssumptions,
) -> RetirementResult<Money> {
    check_expense("monthly_at_retirement", monthly_at_retirement)?;
    time_value::check_rate("post_retirement_return", rates.post_retirement_return)?;

    let n = years_in_retirement * MONTHS_PER_YEAR;
    if n <= 0 {
        return Ok(Decimal::ZERO);
    }

    let real_annual = time_value::real_rate(rates.post_retirement_return, rates.inflation)?;
    let real_monthly = real_annual / Decimal::from(MONTHS_PER_YEAR);

    if real_monthly.abs() < REAL_RATE_EPSILON {
        return monthly_at_retirement
            .checked_mul(Decimal::from(n))
            .ok_or_else(|| RetirementError::Overflow {
                context: "flat-sum required corpus".into(),
            });
    }

    let growth = compound(real_monthly, n as u32)?;
    if growth.is_zero() {
        return Err(RetirementError::DivisionByZero {
            context: "required-corpus discount factor".into(),
        });
    }

    let annuity_factor = (Decimal::ONE - Decimal::ONE / growth) / real_monthly;
    monthly_at_retirement
        .checked_mul(annuity_factor)
        .ok_or_else(|| RetirementError::Overflow {
            context: "required corpus".into(),
        })
}
