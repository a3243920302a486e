//! Alpha Vantage API client.
//!
//! Fetches `TIME_SERIES_DAILY` data from `www.alphavantage.co` and hands
//! the decoded payload to the ticker service.

use std::time::Duration;

use async_trait::async_trait;
use common::{Error, QuoteFetcher, TimeSeriesDaily};
use tracing::{debug, warn};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const FUNCTION: &str = "TIME_SERIES_DAILY";

/// Latest 100 data points.
const OUTPUT_SIZE_COMPACT: &str = "compact";
/// Full 20+ year history.
const OUTPUT_SIZE_FULL: &str = "full";
/// Above this many days the compact payload cannot cover the request.
const COMPACT_OUTPUT_SIZE_LIMIT: usize = 100;

/// Alpha Vantage client with connection pooling and a bounded request timeout.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Pick the `outputsize` parameter able to cover `days` trading days.
pub fn output_size_for(days: usize) -> &'static str {
    if days > COMPACT_OUTPUT_SIZE_LIMIT {
        OUTPUT_SIZE_FULL
    } else {
        OUTPUT_SIZE_COMPACT
    }
}

impl AlphaVantageClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent("stock-ticker/0.1")
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build Alpha Vantage HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, symbol: &str, days: usize) -> Result<reqwest::Request, Error> {
        self.client
            .get(&self.base_url)
            .query(&[
                ("function", FUNCTION),
                ("symbol", symbol),
                ("outputsize", output_size_for(days)),
                ("apikey", self.api_key.as_str()),
            ])
            .build()
            .map_err(|e| Error::Http(format!("invalid request for {symbol}: {e}")))
    }

    /// Fetch the daily series for `symbol`, sized to cover `days` trading days.
    pub async fn get_daily_series(
        &self,
        symbol: &str,
        days: usize,
    ) -> Result<TimeSeriesDaily, Error> {
        let request = self.build_request(symbol, days)?;

        debug!(
            "Fetching Alpha Vantage daily series: symbol={} outputsize={}",
            symbol,
            output_size_for(days)
        );

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::Http(format!("error making request to Alpha Vantage: {e}")))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::AlphaVantage {
                status,
                message: body.chars().take(500).collect(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Http(format!("error reading Alpha Vantage response: {e}")))?;

        let series = parse_daily_series(&body)?;
        debug!("Got {} daily bars for {}", series.time_series.len(), symbol);
        Ok(series)
    }
}

/// Decode a response body and reject payloads that carry no series.
pub fn parse_daily_series(body: &str) -> Result<TimeSeriesDaily, Error> {
    let series: TimeSeriesDaily =
        serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))?;

    if series.time_series.is_empty() {
        let message = series
            .upstream_message()
            .unwrap_or("no data returned, possibly invalid symbol or API key")
            .to_string();
        warn!("Alpha Vantage returned no series: {}", message);
        return Err(Error::UpstreamMessage(message));
    }

    Ok(series)
}

#[async_trait]
impl QuoteFetcher for AlphaVantageClient {
    async fn fetch_daily(&self, symbol: &str, days: usize) -> Result<TimeSeriesDaily, Error> {
        self.get_daily_series(symbol, days).await
    }
}
