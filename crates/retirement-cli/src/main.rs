mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::advisory::{BudgetArgs, RiskProfileArgs};
use commands::drawdown::DrawdownArgs;
use commands::plan::PlanArgs;

/// Retirement planning calculations
#[derive(Parser)]
#[command(
    name = "retire",
    version,
    about = "Retirement corpus, contribution and drawdown calculations",
    long_about = "A CLI for retirement planning with decimal precision. Projects the \
                  corpus required at retirement, the corpus a current plan accumulates, \
                  the monthly contribution that closes the gap, an asset-allocation and \
                  budget suggestion, and a year-by-year drawdown simulation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a full retirement plan (requirement, accumulation, gap, contribution)
    Plan(PlanArgs),
    /// Suggest an asset-allocation profile from age, horizon and risk comfort
    RiskProfile(RiskProfileArgs),
    /// Split net income into invest / needs / wants
    Budget(BudgetArgs),
    /// Simulate year-by-year corpus depletion through retirement
    Drawdown(DrawdownArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Plan(args) => commands::plan::run_plan(args),
        Commands::RiskProfile(args) => commands::advisory::run_risk_profile(args),
        Commands::Budget(args) => commands::advisory::run_budget(args),
        Commands::Drawdown(args) => commands::drawdown::run_drawdown(args),
        Commands::Version => {
            println!("retire {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
