//! Ticker configuration types.

use serde::{Deserialize, Serialize};

/// Top-level ticker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Alpha Vantage API key.
    #[serde(default)]
    pub api_key: String,

    /// Instrument to track (e.g., "IBM").
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Number of most recent trading days to average over.
    #[serde(default = "default_n_days")]
    pub n_days: i64,

    /// Cache parameters.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream HTTP timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Cache timing (all values in seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a computed series stays fresh.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// How often expired entries are swept.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_port() -> u16 {
    8080
}
fn default_symbol() -> String {
    "IBM".into()
}
fn default_n_days() -> i64 {
    7
}
fn default_request_timeout() -> u64 {
    10
}

fn default_cache_ttl() -> u64 {
    15 * 60
}
fn default_cleanup_interval() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            api_key: String::new(),
            symbol: default_symbol(),
            n_days: default_n_days(),
            cache: CacheConfig::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}
