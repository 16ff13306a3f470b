pub mod engine;
pub mod result;

pub use engine::{run_backtest, CrossoverBacktest};
pub use result::{BacktestResult, ProfitPoint};
