use napi::Result as NapiResult;
use napi_derive::napi;

use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Plan projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_plan(input_json: String) -> NapiResult<String> {
    let input: retirement_core::plan::PlanInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = retirement_core::plan::project_plan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Advisory
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RiskProfileInput {
    age: u32,
    years_to_retire: u32,
    comfort: retirement_core::advisory::RiskComfort,
}

#[napi]
pub fn suggest_risk_profile(input_json: String) -> NapiResult<String> {
    let input: RiskProfileInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let profile =
        retirement_core::advisory::suggest_risk_profile(input.age, input.years_to_retire, input.comfort)
            .map_err(to_napi_error)?;
    serde_json::to_string(&profile).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct BudgetInput {
    net_income: rust_decimal::Decimal,
    invest_ratio: rust_decimal::Decimal,
}

#[napi]
pub fn build_budget(input_json: String) -> NapiResult<String> {
    let input: BudgetInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let budget = retirement_core::advisory::build_budget(input.net_income, input.invest_ratio)
        .map_err(to_napi_error)?;
    serde_json::to_string(&budget).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Drawdown
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DrawdownInput {
    starting_corpus: rust_decimal::Decimal,
    monthly_expense_at_retirement: rust_decimal::Decimal,
    #[serde(default)]
    rates: retirement_core::RateAssumptions,
    years_in_retirement: u32,
}

#[napi]
pub fn simulate_drawdown(input_json: String) -> NapiResult<String> {
    let input: DrawdownInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = retirement_core::drawdown::simulate_drawdown(
        input.starting_corpus,
        input.monthly_expense_at_retirement,
        input.rates,
        input.years_in_retirement,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
