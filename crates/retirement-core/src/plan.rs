//! Full plan projection: composes the corpus requirement, accumulation and
//! solver models into the single result record the presentation layer renders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RetirementError;
use crate::time_value::MONTHS_PER_YEAR;
use crate::types::{with_metadata, ComputationOutput, Money, RateAssumptions};
use crate::{accumulation, corpus, solver, RetirementResult};

/// Input parameters for a plan projection. Immutable value record; every
/// projection is a pure function of one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub monthly_expense_today: Money,
    pub existing_corpus: Money,
    pub monthly_contribution: Money,
    #[serde(default)]
    pub rates: RateAssumptions,
}

/// Derived projection. Recomputed on every call; no independent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub years_to_retire: u32,
    pub years_in_retirement: u32,
    pub monthly_expense_at_retirement: Money,
    pub annual_expense_at_retirement: Money,
    pub required_corpus: Money,
    pub estimated_corpus: Money,
    /// Positive = shortfall, negative = surplus.
    pub corpus_gap: Money,
    pub required_monthly_contribution: Money,
}

fn validate(input: &PlanInputs) -> RetirementResult<()> {
    if input.retirement_age <= input.current_age {
        return Err(RetirementError::InvalidInput {
            field: "retirement_age".into(),
            reason: "retirement_age must be > current_age".into(),
        });
    }
    if input.life_expectancy <= input.retirement_age {
        return Err(RetirementError::InvalidInput {
            field: "life_expectancy".into(),
            reason: "life_expectancy must be > retirement_age".into(),
        });
    }
    if input.monthly_expense_today <= Decimal::ZERO {
        return Err(RetirementError::InvalidInput {
            field: "monthly_expense_today".into(),
            reason: "target monthly spend must be > 0".into(),
        });
    }
    Ok(())
}

/// Project the full retirement plan: expense at retirement, required corpus,
/// estimated corpus, gap, and the monthly contribution that closes it.
pub fn project_plan(input: &PlanInputs) -> RetirementResult<ComputationOutput<ProjectionResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let years_to_retire = input.retirement_age - input.current_age;
    let years_in_retirement = input.life_expectancy - input.retirement_age;

    let monthly_expense_at_retirement = corpus::monthly_expense_at_retirement(
        input.monthly_expense_today,
        years_to_retire as i64,
        input.rates.inflation,
    )?;
    let annual_expense_at_retirement =
        monthly_expense_at_retirement * Decimal::from(MONTHS_PER_YEAR);

    let required_corpus = corpus::required_corpus_from_monthly(
        monthly_expense_at_retirement,
        years_in_retirement as i64,
        &input.rates,
    )?;

    let estimated_corpus = accumulation::estimated_corpus(
        input.existing_corpus,
        input.monthly_contribution,
        input.rates.pre_retirement_return,
        years_to_retire as i64,
    )?;

    let corpus_gap = solver::corpus_gap(required_corpus, estimated_corpus);
    let required_monthly_contribution = solver::required_monthly_contribution(
        required_corpus,
        input.existing_corpus,
        input.rates.pre_retirement_return,
        years_to_retire as i64,
    )?;

    if corpus_gap > Decimal::ZERO {
        warnings.push(format!(
            "Projected corpus falls short of the requirement by {}",
            corpus_gap.round_dp(2)
        ));
    }
    if required_monthly_contribution > input.monthly_contribution {
        warnings.push(format!(
            "Monthly contribution of {} is below the {} required to close the gap",
            input.monthly_contribution,
            required_monthly_contribution.round_dp(2)
        ));
    }

    let result = ProjectionResult {
        years_to_retire,
        years_in_retirement,
        monthly_expense_at_retirement,
        annual_expense_at_retirement,
        required_corpus,
        estimated_corpus,
        corpus_gap,
        required_monthly_contribution,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Retirement plan projection (inflation-adjusted annuity requirement, \
         lump-sum + SIP accumulation, annuity-inverse contribution solver)",
        &serde_json::json!({
            "inflation": input.rates.inflation.to_string(),
            "pre_retirement_return": input.rates.pre_retirement_return.to_string(),
            "post_retirement_return": input.rates.post_retirement_return.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn default_input() -> PlanInputs {
        PlanInputs {
            current_age: 25,
            retirement_age: 60,
            life_expectancy: 85,
            monthly_expense_today: dec!(60_000),
            existing_corpus: dec!(300_000),
            monthly_contribution: dec!(20_000),
            rates: RateAssumptions::default(),
        }
    }

    #[test]
    fn test_horizons_derived_from_ages() {
        let out = project_plan(&default_input()).unwrap();
        assert_eq!(out.result.years_to_retire, 35);
        assert_eq!(out.result.years_in_retirement, 25);
    }

    #[test]
    fn test_default_rates_give_flat_sum_requirement() {
        // Default post-retirement return equals default inflation, so the
        // requirement is monthly-at-retirement * months in retirement.
        let out = project_plan(&default_input()).unwrap();
        let r = &out.result;
        assert_eq!(
            r.required_corpus,
            r.monthly_expense_at_retirement * Decimal::from(25 * 12)
        );
        assert_eq!(r.annual_expense_at_retirement, r.monthly_expense_at_retirement * dec!(12));
    }

    #[test]
    fn test_gap_is_required_minus_estimated() {
        let out = project_plan(&default_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.corpus_gap, r.required_corpus - r.estimated_corpus);
    }

    #[test]
    fn test_shortfall_produces_warnings() {
        let mut input = default_input();
        input.monthly_contribution = dec!(1_000);
        input.existing_corpus = dec!(10_000);

        let out = project_plan(&input).unwrap();
        assert!(out.result.corpus_gap > Decimal::ZERO);
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_surplus_plan_has_no_warnings() {
        let mut input = default_input();
        input.existing_corpus = dec!(20_000_000);
        input.monthly_contribution = dec!(100_000);

        let out = project_plan(&input).unwrap();
        assert!(out.result.corpus_gap < Decimal::ZERO, "gap={}", out.result.corpus_gap);
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.required_monthly_contribution, Decimal::ZERO);
    }

    #[test]
    fn test_solver_output_closes_the_gap() {
        let input = default_input();
        let out = project_plan(&input).unwrap();
        let r = &out.result;

        // Re-running the plan with the solved contribution removes the shortfall
        let mut fixed = input.clone();
        fixed.monthly_contribution = r.required_monthly_contribution;
        let fixed_out = project_plan(&fixed).unwrap();
        let tolerance = r.required_corpus * dec!(0.000001);
        assert!(
            fixed_out.result.corpus_gap.abs() <= tolerance,
            "gap={}",
            fixed_out.result.corpus_gap
        );
    }

    #[test]
    fn test_validation_age_ordering() {
        let mut input = default_input();
        input.retirement_age = 25;
        assert!(project_plan(&input).is_err());

        let mut input = default_input();
        input.life_expectancy = 60;
        assert!(project_plan(&input).is_err());
    }

    #[test]
    fn test_validation_zero_expense() {
        let mut input = default_input();
        input.monthly_expense_today = Decimal::ZERO;
        assert!(project_plan(&input).is_err());
    }

    #[test]
    fn test_plan_inputs_deserialize_with_default_rates() {
        let input: PlanInputs = serde_json::from_str(
            r#"{
                "current_age": 30,
                "retirement_age": 60,
                "life_expectancy": 85,
                "monthly_expense_today": "50000",
                "existing_corpus": "100000",
                "monthly_contribution": "15000"
            }"#,
        )
        .unwrap();
        assert_eq!(input.rates.inflation, dec!(0.06));
        assert_eq!(input.rates.pre_retirement_return, dec!(0.10));
        let out = project_plan(&input).unwrap();
        assert!(out.result.required_corpus > Decimal::ZERO);
    }
}
