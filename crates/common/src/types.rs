//! Domain types shared across the ticker.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;

// ── Alpha Vantage payload ─────────────────────────────────────────────

/// Decoded `TIME_SERIES_DAILY` response.
///
/// Alpha Vantage answers errors and rate limits with HTTP 200 and one of
/// the message fields instead of a time series, so every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSeriesDaily {
    #[serde(rename = "Meta Data", default)]
    pub meta_data: Option<MetaData>,
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: HashMap<String, DailyPrice>,
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

impl TimeSeriesDaily {
    /// Build a payload from `(date, close)` pairs. Other price fields are left empty.
    pub fn from_closes<'a>(closes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let time_series = closes
            .into_iter()
            .map(|(date, close)| {
                (
                    date.to_string(),
                    DailyPrice {
                        close: close.to_string(),
                        ..DailyPrice::default()
                    },
                )
            })
            .collect();

        Self {
            time_series,
            ..Self::default()
        }
    }

    /// The upstream's explanation for a missing series, if it sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaData {
    #[serde(rename = "1. Information", default)]
    pub information: String,
    #[serde(rename = "2. Symbol", default)]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: String,
    #[serde(rename = "4. Output Size", default)]
    pub output_size: String,
    #[serde(rename = "5. Time Zone", default)]
    pub time_zone: String,
}

/// One trading day. Alpha Vantage sends every number as a decimal string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyPrice {
    #[serde(rename = "1. open", default)]
    pub open: String,
    #[serde(rename = "2. high", default)]
    pub high: String,
    #[serde(rename = "3. low", default)]
    pub low: String,
    #[serde(rename = "4. close", default)]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: String,
}

// ── Service output ────────────────────────────────────────────────────

/// Closing price for a single date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    pub date: String,
    pub close: f64,
}

/// Recent closing prices for a symbol, newest first, with their mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSeries {
    pub symbol: String,
    pub prices: Vec<StockPrice>,
    pub average: f64,
}

impl StockSeries {
    /// Compute the average over `prices`. Fails with `NoPriceData` when empty.
    pub fn new(symbol: impl Into<String>, prices: Vec<StockPrice>) -> Result<Self, Error> {
        let symbol = symbol.into();
        if prices.is_empty() {
            return Err(Error::NoPriceData { symbol });
        }

        let total: f64 = prices.iter().map(|p| p.close).sum();
        let average = total / prices.len() as f64;

        Ok(Self {
            symbol,
            prices,
            average,
        })
    }
}
