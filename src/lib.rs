pub mod analysis;
pub mod backtest;
pub mod config;
pub mod error;
pub mod indicator;
pub mod model;
pub mod provider;
pub mod report;
pub mod spike_detector;
