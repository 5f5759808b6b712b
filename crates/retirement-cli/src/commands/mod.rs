pub mod advisory;
pub mod drawdown;
pub mod plan;
