//! Drawdown simulator: year-by-year depletion of a retirement corpus under
//! post-retirement returns and inflation-escalated withdrawals. The yearly
//! trace is produced lazily; the first year the corpus goes negative ends the
//! simulation and marks the plan unsustainable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RetirementError;
use crate::time_value::MONTHS_PER_YEAR;
use crate::types::{with_metadata, ComputationOutput, Money, RateAssumptions};
use crate::RetirementResult;

/// One simulated year of retirement. `year` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationYear {
    pub year: u32,
    pub start_corpus: Money,
    pub returns_earned: Money,
    pub withdrawal: Money,
    pub end_corpus: Money,
}

/// Full simulation outcome: the trace, whether the corpus survived the
/// horizon, and the first failing year if it did not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawdownSimulation {
    pub years: Vec<SimulationYear>,
    pub sustained: bool,
    pub failed_year: Option<u32>,
    pub final_corpus: Money,
}

/// Lazy, finite, non-restartable sequence of yearly snapshots. Consuming
/// fewer years than the horizon (for display) does not affect correctness;
/// the sequence ends on its own at the horizon, at the first failing year, or
/// at the first overflowing step (yielded as an `Err` item).
#[derive(Debug)]
pub struct Drawdown {
    corpus: Money,
    annual_expense: Money,
    rates: RateAssumptions,
    horizon_years: u32,
    year: u32,
    done: bool,
}

impl Drawdown {
    /// Start a simulation from the corpus available at retirement and the
    /// monthly expense at the start of retirement.
    pub fn new(
        starting_corpus: Money,
        monthly_expense_at_retirement: Money,
        rates: RateAssumptions,
        years_in_retirement: u32,
    ) -> RetirementResult<Self> {
        if starting_corpus < Decimal::ZERO {
            return Err(RetirementError::InvalidInput {
                field: "starting_corpus".into(),
                reason: "amount must be >= 0".into(),
            });
        }
        if monthly_expense_at_retirement <= Decimal::ZERO {
            return Err(RetirementError::InvalidInput {
                field: "monthly_expense_at_retirement".into(),
                reason: "monthly expense must be > 0".into(),
            });
        }
        if rates.inflation <= dec!(-1) || rates.post_retirement_return <= dec!(-1) {
            return Err(RetirementError::InvalidInput {
                field: "rates".into(),
                reason: "rates must be greater than -100%".into(),
            });
        }

        let annual_expense = monthly_expense_at_retirement
            .checked_mul(Decimal::from(MONTHS_PER_YEAR))
            .ok_or_else(|| RetirementError::Overflow {
                context: "annual withdrawal".into(),
            })?;

        Ok(Drawdown {
            corpus: starting_corpus,
            annual_expense,
            rates,
            horizon_years: years_in_retirement,
            year: 0,
            done: false,
        })
    }

    fn step(&mut self) -> RetirementResult<SimulationYear> {
        let start_corpus = self.corpus;
        let returns_earned = start_corpus
            .checked_mul(self.rates.post_retirement_return)
            .ok_or_else(|| RetirementError::Overflow {
                context: "drawdown returns".into(),
            })?;
        let withdrawal = self.annual_expense;
        let end_corpus = start_corpus
            .checked_add(returns_earned)
            .and_then(|v| v.checked_sub(withdrawal))
            .ok_or_else(|| RetirementError::Overflow {
                context: "end-of-year corpus".into(),
            })?;

        if end_corpus < Decimal::ZERO {
            self.done = true;
        } else {
            self.corpus = end_corpus;
        }

        // Next year's expense keeps pace with inflation; skipped once the
        // sequence has ended so a spent trace cannot overflow retroactively.
        if !self.done && self.year < self.horizon_years {
            self.annual_expense = self
                .annual_expense
                .checked_mul(Decimal::ONE + self.rates.inflation)
                .ok_or_else(|| RetirementError::Overflow {
                    context: "withdrawal escalation".into(),
                })?;
        }

        Ok(SimulationYear {
            year: self.year,
            start_corpus,
            returns_earned,
            withdrawal,
            end_corpus,
        })
    }
}

impl Iterator for Drawdown {
    type Item = RetirementResult<SimulationYear>;

    fn next(&mut self) -> Option<RetirementResult<SimulationYear>> {
        if self.done || self.year >= self.horizon_years {
            return None;
        }
        self.year += 1;

        let step = self.step();
        if step.is_err() {
            self.done = true;
        }
        Some(step)
    }
}

/// Run the simulation to completion and package the outcome.
pub fn simulate_drawdown(
    starting_corpus: Money,
    monthly_expense_at_retirement: Money,
    rates: RateAssumptions,
    years_in_retirement: u32,
) -> RetirementResult<ComputationOutput<DrawdownSimulation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let drawdown = Drawdown::new(
        starting_corpus,
        monthly_expense_at_retirement,
        rates,
        years_in_retirement,
    )?;

    let years: Vec<SimulationYear> = drawdown.collect::<RetirementResult<Vec<_>>>()?;
    let failed_year = years
        .iter()
        .find(|y| y.end_corpus < Decimal::ZERO)
        .map(|y| y.year);
    let sustained = failed_year.is_none();
    let final_corpus = years
        .last()
        .map(|y| y.end_corpus)
        .unwrap_or(starting_corpus);

    if let Some(year) = failed_year {
        warnings.push(format!(
            "Corpus exhausted in year {year} of a {years_in_retirement}-year retirement"
        ));
    }

    let result = DrawdownSimulation {
        years,
        sustained,
        failed_year,
        final_corpus,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Year-by-year drawdown (returns on opening corpus, inflation-escalated withdrawals)",
        &serde_json::json!({
            "starting_corpus": starting_corpus.to_string(),
            "monthly_expense_at_retirement": monthly_expense_at_retirement.to_string(),
            "inflation": rates.inflation.to_string(),
            "post_retirement_return": rates.post_retirement_return.to_string(),
            "years_in_retirement": years_in_retirement,
        }),
        warnings,
        elapsed,
        result,
    ))
}
