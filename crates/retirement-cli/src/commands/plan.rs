use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use retirement_core::plan::{project_plan, PlanInputs};
use retirement_core::{
    RateAssumptions, DEFAULT_INFLATION, DEFAULT_POST_RETIREMENT_RETURN,
    DEFAULT_PRE_RETIREMENT_RETURN,
};

use crate::input;

/// Arguments for a full plan projection
#[derive(Args)]
pub struct PlanArgs {
    /// Current age in years
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Planned retirement age
    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Life expectancy in years
    #[arg(long)]
    pub life_expectancy: Option<u32>,

    /// Desired monthly spend in retirement, at today's prices
    #[arg(long)]
    pub monthly_expense: Option<Decimal>,

    /// Lump sum already saved for retirement
    #[arg(long, default_value = "0")]
    pub existing_corpus: Decimal,

    /// Current monthly contribution
    #[arg(long, default_value = "0")]
    pub monthly_contribution: Decimal,

    /// Annual inflation rate (e.g. 0.06 for 6%)
    #[arg(long, default_value_t = DEFAULT_INFLATION)]
    pub inflation: Decimal,

    /// Nominal annual return before retirement
    #[arg(long, default_value_t = DEFAULT_PRE_RETIREMENT_RETURN)]
    pub pre_retirement_return: Decimal,

    /// Nominal annual return during retirement
    #[arg(long, default_value_t = DEFAULT_POST_RETIREMENT_RETURN)]
    pub post_retirement_return: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: PlanInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PlanInputs {
            current_age: args
                .current_age
                .ok_or("--current-age is required (or provide --input)")?,
            retirement_age: args
                .retirement_age
                .ok_or("--retirement-age is required (or provide --input)")?,
            life_expectancy: args
                .life_expectancy
                .ok_or("--life-expectancy is required (or provide --input)")?,
            monthly_expense_today: args
                .monthly_expense
                .ok_or("--monthly-expense is required (or provide --input)")?,
            existing_corpus: args.existing_corpus,
            monthly_contribution: args.monthly_contribution,
            rates: RateAssumptions {
                inflation: args.inflation,
                pre_retirement_return: args.pre_retirement_return,
                post_retirement_return: args.post_retirement_return,
            },
        }
    };

    let output = project_plan(&plan_input)?;
    Ok(serde_json::to_value(output)?)
}
