//! Risk-profile and budget advisory: small, deterministic rule tables kept as
//! explicit ordered rules so the precedence stays a testable contract.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RetirementError;
use crate::types::{Money, Rate};
use crate::RetirementResult;

/// Youngest age the rule table is calibrated for.
const MIN_ADVISORY_AGE: u32 = 18;

/// Self-reported appetite for drawdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskComfort {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Conservative,
    Balanced,
    Aggressive,
}

/// Suggested asset allocation. Fractions sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub band: RiskBand,
    pub equity: Rate,
    pub debt: Rate,
    pub other: Rate,
    pub description: String,
}

/// Monthly income split. Sums exactly to the input net income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub invest: Money,
    pub needs: Money,
    pub wants: Money,
}

/// Map age, horizon and risk comfort to an allocation suggestion.
///
/// Ordered rules, first match wins:
/// 1. high comfort and 20+ years to retire -> Aggressive
/// 2. low comfort or 10 years or fewer     -> Conservative
/// 3. everything else                      -> Balanced
pub fn suggest_risk_profile(
    age: u32,
    years_to_retire: u32,
    comfort: RiskComfort,
) -> RetirementResult<RiskProfile> {
    if age < MIN_ADVISORY_AGE {
        return Err(RetirementError::InvalidInput {
            field: "age".into(),
            reason: format!("advisory table starts at age {MIN_ADVISORY_AGE}"),
        });
    }

    let profile = if comfort == RiskComfort::High && years_to_retire >= 20 {
        RiskProfile {
            band: RiskBand::Aggressive,
            equity: dec!(0.75),
            debt: dec!(0.20),
            other: dec!(0.05),
            description: "Growth-focused mix; a long runway absorbs equity drawdowns.".into(),
        }
    } else if comfort == RiskComfort::Low || years_to_retire <= 10 {
        RiskProfile {
            band: RiskBand::Conservative,
            equity: dec!(0.35),
            debt: dec!(0.55),
            other: dec!(0.10),
            description: "Capital-preservation mix with a debt-heavy core.".into(),
        }
    } else {
        RiskProfile {
            band: RiskBand::Balanced,
            equity: dec!(0.55),
            debt: dec!(0.40),
            other: dec!(0.05),
            description: "Balanced mix of growth assets and stability.".into(),
        }
    };

    Ok(profile)
}

/// Split net income into invest / needs / wants.
///
/// Needs are pinned at 50% of income; wants take the residual so the three
/// parts always sum exactly to the input after 2-dp rounding. `wants` can go
/// negative when the invest ratio exceeds 0.5 — callers surface that as a
/// modelling warning rather than displaying it silently.
pub fn build_budget(net_income: Money, invest_ratio: Rate) -> RetirementResult<Budget> {
    if net_income <= Decimal::ZERO {
        return Err(RetirementError::InvalidInput {
            field: "net_income".into(),
            reason: "net income must be > 0".into(),
        });
    }
    if invest_ratio < Decimal::ZERO || invest_ratio > Decimal::ONE {
        return Err(RetirementError::InvalidInput {
            field: "invest_ratio".into(),
            reason: "savings ratio must be within [0, 1]".into(),
        });
    }

    let invest = (net_income * invest_ratio).round_dp(2);
    let needs = (net_income * dec!(0.5)).round_dp(2);
    let wants = net_income - invest - needs;

    Ok(Budget { invest, needs, wants })
}
