use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Default inflation assumption (6%), applied pre- and post-retirement.
pub const DEFAULT_INFLATION: Rate = dec!(0.06);

/// Default nominal return during the accumulation phase (10%).
pub const DEFAULT_PRE_RETIREMENT_RETURN: Rate = dec!(0.10);

/// Default nominal return during retirement (6%).
pub const DEFAULT_POST_RETIREMENT_RETURN: Rate = dec!(0.06);

/// Rate assumptions shared by the corpus, accumulation and drawdown models.
///
/// A single inflation rate applies to both the accumulation and the
/// retirement phase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateAssumptions {
    pub inflation: Rate,
    pub pre_retirement_return: Rate,
    pub post_retirement_return: Rate,
}

impl Default for RateAssumptions {
    fn default() -> Self {
        RateAssumptions {
            inflation: DEFAULT_INFLATION,
            pre_retirement_return: DEFAULT_PRE_RETIREMENT_RETURN,
            post_retirement_return: DEFAULT_POST_RETIREMENT_RETURN,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
