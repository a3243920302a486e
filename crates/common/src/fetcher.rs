//! Upstream quote source abstraction.

use async_trait::async_trait;

use crate::{Error, TimeSeriesDaily};

/// Source of raw daily price series.
///
/// `days` is the number of trading days the caller intends to keep; a
/// fetcher may use it to size its upstream request.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch_daily(&self, symbol: &str, days: usize) -> Result<TimeSeriesDaily, Error>;
}
