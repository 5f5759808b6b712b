use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use retirement_core::advisory::{build_budget, suggest_risk_profile, RiskComfort};

/// Arguments for a risk-profile suggestion
#[derive(Args)]
pub struct RiskProfileArgs {
    /// Current age in years
    #[arg(long)]
    pub age: u32,

    /// Years until planned retirement
    #[arg(long)]
    pub years_to_retire: u32,

    /// Risk comfort: low, medium, high
    #[arg(long, default_value = "medium")]
    pub comfort: String,
}

/// Arguments for a budget split
#[derive(Args)]
pub struct BudgetArgs {
    /// Monthly net income
    #[arg(long)]
    pub net_income: Decimal,

    /// Share of income to invest (0 to 1)
    #[arg(long, default_value = "0.25")]
    pub invest_ratio: Decimal,
}

fn parse_comfort(comfort: &str) -> Result<RiskComfort, Box<dyn std::error::Error>> {
    match comfort.to_lowercase().as_str() {
        "low" => Ok(RiskComfort::Low),
        "medium" => Ok(RiskComfort::Medium),
        "high" => Ok(RiskComfort::High),
        _ => Err(format!("Unknown risk comfort '{comfort}'. Use: low, medium, high").into()),
    }
}

pub fn run_risk_profile(args: RiskProfileArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comfort = parse_comfort(&args.comfort)?;
    let profile = suggest_risk_profile(args.age, args.years_to_retire, comfort)?;
    Ok(serde_json::to_value(profile)?)
}

pub fn run_budget(args: BudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let budget = build_budget(args.net_income, args.invest_ratio)?;
    if budget.wants < Decimal::ZERO {
        eprintln!(
            "warning: invest ratio above 0.5 leaves a negative wants bucket ({})",
            budget.wants
        );
    }
    Ok(serde_json::to_value(budget)?)
}
