//! Accumulation model: projects the corpus actually available at retirement
//! from the existing lump sum plus the ongoing monthly contribution stream,
//! both compounding independently at the pre-retirement return.

use rust_decimal::Decimal;

use crate::error::RetirementError;
use crate::time_value;
use crate::types::{Money, Rate};
use crate::RetirementResult;

fn check_non_negative(field: &str, amount: Money) -> RetirementResult<()> {
    if amount < Decimal::ZERO {
        return Err(RetirementError::InvalidInput {
            field: field.into(),
            reason: "amount must be >= 0".into(),
        });
    }
    Ok(())
}

/// Corpus projected at retirement from the current plan.
pub fn estimated_corpus(
    existing_corpus: Money,
    monthly_contribution: Money,
    pre_retirement_return: Rate,
    years_to_retire: i64,
) -> RetirementResult<Money> {
    check_non_negative("existing_corpus", existing_corpus)?;
    check_non_negative("monthly_contribution", monthly_contribution)?;

    let fv_existing =
        time_value::fv_lump_sum(existing_corpus, pre_retirement_return, years_to_retire)?;
    let fv_contributions =
        time_value::fv_monthly_annuity(monthly_contribution, pre_retirement_return, years_to_retire)?;

    fv_existing
        .checked_add(fv_contributions)
        .ok_or_else(|| RetirementError::Overflow {
            context: "estimated corpus".into(),
        })
}
