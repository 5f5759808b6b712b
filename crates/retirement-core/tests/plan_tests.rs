use retirement_core::advisory::{self, RiskBand, RiskComfort};
use retirement_core::drawdown;
use retirement_core::plan::{project_plan, PlanInputs};
use retirement_core::types::RateAssumptions;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// End-to-end plan projections
// ===========================================================================

fn typical_input() -> PlanInputs {
    // 25-year-old targeting retirement at 60 on 60k/month of today's spending
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
fn test_typical_plan_reference_figures() {
    let out = project_plan(&typical_input()).unwrap();
    let r = &out.result;

    assert_eq!(r.years_to_retire, 35);
    assert_eq!(r.years_in_retirement, 25);

    // 60_000 * 1.06^35 ≈ 461_165
    assert!(
        (r.monthly_expense_at_retirement - dec!(461_165)).abs() < dec!(1),
        "monthly at retirement = {}",
        r.monthly_expense_at_retirement
    );

    // Post-retirement return equals inflation under the defaults, so the
    // requirement is the flat sum over 300 months: ~138.3M
    assert!(
        (r.required_corpus - dec!(138_349_558)).abs() < dec!(100),
        "required = {}",
        r.required_corpus
    );

    // 300k lump at 10% for 35y (~8.4M) plus 20k/month SIP (~76M)
    assert!(
        r.estimated_corpus > dec!(80_000_000) && r.estimated_corpus < dec!(90_000_000),
        "estimated = {}",
        r.estimated_corpus
    );

    // Underfunded: positive gap and a contribution above the current one
    assert!(r.corpus_gap > Decimal::ZERO);
    assert!(r.required_monthly_contribution > dec!(20_000));
}

#[test]
fn test_envelope_carries_assumptions_and_metadata() {
    let out = project_plan(&typical_input()).unwrap();
    assert_eq!(out.assumptions["inflation"], "0.06");
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert!(!out.methodology.is_empty());
}

#[test]
fn test_projection_round_trips_through_json() {
    let out = project_plan(&typical_input()).unwrap();
    let json = serde_json::to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value["result"]["years_to_retire"],
        serde_json::json!(35)
    );
    // Money serialises as strings, not floats
    assert!(value["result"]["required_corpus"].is_string());
}

// ===========================================================================
// Plan projection feeding the drawdown simulator
// ===========================================================================

#[test]
fn test_fully_funded_plan_survives_drawdown() {
    // Contribute exactly what the solver asks for, then verify the resulting
    // corpus funds the whole retirement horizon.
    let mut input = typical_input();
    let first = project_plan(&input).unwrap().result;
    input.monthly_contribution = first.required_monthly_contribution;

    let funded = project_plan(&input).unwrap().result;
    let sim = drawdown::simulate_drawdown(
        funded.estimated_corpus,
        funded.monthly_expense_at_retirement,
        input.rates,
        funded.years_in_retirement,
    )
    .unwrap();

    assert!(sim.result.sustained, "failed year {:?}", sim.result.failed_year);
    assert_eq!(sim.result.years.len(), 25);
    assert!(sim.result.final_corpus >= Decimal::ZERO);
}

#[test]
fn test_underfunded_plan_fails_drawdown_early() {
    let input = PlanInputs {
        current_age: 50,
        retirement_age: 60,
        life_expectancy: 90,
        monthly_expense_today: dec!(100_000),
        existing_corpus: dec!(500_000),
        monthly_contribution: dec!(5_000),
        rates: RateAssumptions::default(),
    };
    let r = project_plan(&input).unwrap().result;
    assert!(r.corpus_gap > Decimal::ZERO);

    let sim = drawdown::simulate_drawdown(
        r.estimated_corpus,
        r.monthly_expense_at_retirement,
        input.rates,
        r.years_in_retirement,
    )
    .unwrap();

    assert!(!sim.result.sustained);
    let failed = sim.result.failed_year.unwrap();
    assert!(failed < 30);
    assert_eq!(sim.result.years.len(), failed as usize);
}

// ===========================================================================
// Advisory alongside a plan (the calculator page flow)
// ===========================================================================

#[test]
fn test_shortfall_drives_budget_and_profile() {
    let input = typical_input();
    let r = project_plan(&input).unwrap().result;

    // The page raises the invest ratio when the plan is short
    let ratio = if r.corpus_gap > Decimal::ZERO {
        dec!(0.35)
    } else {
        dec!(0.25)
    };
    let budget = advisory::build_budget(dec!(80_000), ratio).unwrap();
    assert_eq!(budget.invest, dec!(28_000));
    assert_eq!(budget.invest + budget.needs + budget.wants, dec!(80_000));

    let profile = advisory::suggest_risk_profile(
        input.current_age,
        r.years_to_retire,
        RiskComfort::High,
    )
    .unwrap();
    assert_eq!(profile.band, RiskBand::Aggressive);
}
