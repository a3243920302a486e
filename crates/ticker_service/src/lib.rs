//! Ticker service crate.
//!
//! Expiring cache plus the cache-or-fetch stock service built on it.

pub mod cache;
pub mod service;

pub use cache::{spawn_sweeper, CacheEntry, ExpiringCache};
pub use service::{new_series_cache, summarize_daily_series, SeriesCache, StockService};
