//! Shared types, config, and error definitions for the stock ticker.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod types;

pub use config::TickerConfig;
pub use error::Error;
pub use fetcher::QuoteFetcher;
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
