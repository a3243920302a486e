//! Cache-or-fetch orchestration for the configured symbol.
//!
//! A request first consults the cache. On a miss the quote fetcher is
//! called, the raw daily series is reduced to the most recent `days`
//! closes plus their mean, and the result is cached for `cache_ttl`.

use std::sync::Arc;
use std::time::Duration;

use common::{Error, QuoteFetcher, StockPrice, StockSeries, TimeSeriesDaily};
use tracing::{debug, info, warn};

use crate::cache::ExpiringCache;

/// Cache shared between the service and the sweeper.
pub type SeriesCache = Arc<ExpiringCache<Arc<StockSeries>>>;

/// Create a new empty SeriesCache.
pub fn new_series_cache() -> SeriesCache {
    Arc::new(ExpiringCache::new())
}

/// Serves the recent closing prices for one symbol.
pub struct StockService {
    symbol: String,
    days: usize,
    cache_ttl: Duration,
    fetcher: Arc<dyn QuoteFetcher>,
    cache: SeriesCache,
}

impl StockService {
    pub fn new(
        symbol: impl Into<String>,
        days: usize,
        cache_ttl: Duration,
        fetcher: Arc<dyn QuoteFetcher>,
        cache: SeriesCache,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            days,
            cache_ttl,
            fetcher,
            cache,
        }
    }

    /// Return the cached series if fresh, otherwise fetch, summarize, and cache it.
    ///
    /// Failures are returned unchanged and leave the cache untouched.
    pub async fn get_stock_data(&self) -> Result<Arc<StockSeries>, Error> {
        let cache_key = self.symbol.as_str();

        if let Some(series) = self.cache.get(cache_key) {
            debug!("{}: cache hit", self.symbol);
            return Ok(series);
        }

        debug!("{}: cache miss, fetching {} days", self.symbol, self.days);
        let raw = self
            .fetcher
            .fetch_daily(&self.symbol, self.days)
            .await
            .inspect_err(|e| warn!("{}: upstream fetch failed: {}", self.symbol, e))?;

        let series = summarize_daily_series(&self.symbol, &raw, self.days)
            .inspect_err(|e| warn!("{}: rejecting upstream payload: {}", self.symbol, e))?;
        let series = Arc::new(series);

        self.cache.set(cache_key, series.clone(), self.cache_ttl);
        info!(
            "{}: cached {} closes, average={:.4}, ttl={}s",
            series.symbol,
            series.prices.len(),
            series.average,
            self.cache_ttl.as_secs()
        );

        Ok(series)
    }
}

/// Keep the newest `days` dates of `raw`, newest first, and average their closes.
///
/// ISO `YYYY-MM-DD` keys order correctly as plain strings. Any close that is
/// not a plain finite decimal (padded, `NaN`, `inf`) fails the whole summary.
pub fn summarize_daily_series(
    symbol: &str,
    raw: &TimeSeriesDaily,
    days: usize,
) -> Result<StockSeries, Error> {
    let mut dates: Vec<&String> = raw.time_series.keys().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.truncate(days);

    let prices = dates
        .into_iter()
        .map(|date| -> Result<StockPrice, Error> {
            let daily = &raw.time_series[date];
            let invalid = || Error::InvalidClosePrice {
                date: date.clone(),
                value: daily.close.clone(),
            };
            let close = daily.close.parse::<f64>().map_err(|_| invalid())?;
            if !close.is_finite() {
                return Err(invalid());
            }
            Ok(StockPrice {
                date: date.clone(),
                close,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    StockSeries::new(symbol, prices)
}
