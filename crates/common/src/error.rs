//! Unified error type for the stock ticker.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error decoding Alpha Vantage response: {0}")]
    Decode(String),

    #[error("Alpha Vantage API error (status code {status}): {message}")]
    AlphaVantage { status: u16, message: String },

    #[error("Alpha Vantage returned no data: {0}")]
    UpstreamMessage(String),

    #[error("no price data available for symbol {symbol}")]
    NoPriceData { symbol: String },

    #[error("error parsing close price for date {date}: {value:?} is not a number")]
    InvalidClosePrice { date: String, value: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}
