pub mod accumulation;
pub mod corpus;
pub mod error;
pub mod plan;
pub mod solver;
pub mod time_value;
pub mod types;

#[cfg(feature = "advisory")]
pub mod advisory;

#[cfg(feature = "drawdown")]
pub mod drawdown;

pub use error::RetirementError;
pub use types::*;

/// Standard result type for all retirement calculations
pub type RetirementResult<T> = Result<T, RetirementError>;
