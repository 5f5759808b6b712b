use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use retirement_core::drawdown::simulate_drawdown;
use retirement_core::plan::{project_plan, PlanInputs};
use retirement_core::{
    RateAssumptions, DEFAULT_INFLATION, DEFAULT_POST_RETIREMENT_RETURN,
    DEFAULT_PRE_RETIREMENT_RETURN,
};

use crate::input;

/// Arguments for a drawdown simulation
#[derive(Args)]
pub struct DrawdownArgs {
    /// Corpus available at the start of retirement
    #[arg(long)]
    pub starting_corpus: Option<Decimal>,

    /// Monthly expense at the start of retirement
    #[arg(long)]
    pub monthly_expense: Option<Decimal>,

    /// Retirement horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual inflation rate during retirement
    #[arg(long, default_value_t = DEFAULT_INFLATION)]
    pub inflation: Decimal,

    /// Nominal annual return during retirement
    #[arg(long, default_value_t = DEFAULT_POST_RETIREMENT_RETURN)]
    pub post_retirement_return: Decimal,

    /// Derive corpus, expense and horizon from a plan-inputs JSON file
    #[arg(long, conflicts_with_all = ["starting_corpus", "monthly_expense", "years"])]
    pub from_plan: Option<String>,
}

pub fn run_drawdown(args: DrawdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (starting_corpus, monthly_expense, rates, years) =
        if let Some(ref path) = args.from_plan {
            // Feed the accumulation projection straight into the simulator,
            // the way the calculator page feeds its sustainability view.
            let plan_input: PlanInputs = input::file::read_json(path)?;
            let projection = project_plan(&plan_input)?.result;
            (
                projection.estimated_corpus,
                projection.monthly_expense_at_retirement,
                plan_input.rates,
                projection.years_in_retirement,
            )
        } else {
            let rates = RateAssumptions {
                inflation: args.inflation,
                pre_retirement_return: DEFAULT_PRE_RETIREMENT_RETURN,
                post_retirement_return: args.post_retirement_return,
            };
            (
                args.starting_corpus
                    .ok_or("--starting-corpus is required (or provide --from-plan)")?,
                args.monthly_expense
                    .ok_or("--monthly-expense is required (or provide --from-plan)")?,
                rates,
                args.years
                    .ok_or("--years is required (or provide --from-plan)")?,
            )
        };

    let output = simulate_drawdown(starting_corpus, monthly_expense, rates, years)?;
    Ok(serde_json::to_value(output)?)
}
