use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No data found for symbol {0}.")]
    NoData(String),

    #[error("Could not fetch data for {symbol}. Please check the symbol and try again.")]
    Fetch { symbol: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
