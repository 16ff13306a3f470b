pub mod price;
pub mod spike;
pub mod trade;

/// One value per price point; `None` marks indices still inside an indicator's warm-up.
pub type IndicatorSeries = Vec<Option<f64>>;
