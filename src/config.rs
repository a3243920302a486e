//! Configuration loader — merges env vars, .env file, and config.toml.

use common::{Error, TickerConfig};
use std::path::Path;

/// Longest cache TTL accepted: 30 days.
const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64, Error> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn validate_config(config: &TickerConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.api_key.trim().is_empty() {
        issues.push("API_KEY environment variable is required".into());
    }
    if config.symbol.trim().is_empty() {
        issues.push("symbol must not be empty".into());
    }
    if config.n_days <= 0 {
        issues.push("n_days must be > 0".into());
    }
    if config.cache.ttl_secs == 0 {
        issues.push("cache.ttl_secs must be > 0".into());
    }
    if config.cache.ttl_secs > MAX_CACHE_TTL_SECS {
        issues.push(format!("cache.ttl_secs must be <= {MAX_CACHE_TTL_SECS}"));
    }
    if config.cache.cleanup_interval_secs == 0 {
        issues.push("cache.cleanup_interval_secs must be > 0".into());
    }
    if config.request_timeout_secs == 0 {
        issues.push("request_timeout_secs must be > 0".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply environment overrides. Unset and empty variables keep the current value.
fn apply_env_overrides(
    config: &mut TickerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), Error> {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = var("PORT") {
        config.port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| Error::Config(format!("invalid PORT value: {port}")))?;
    }
    if let Some(key) = var("API_KEY") {
        config.api_key = key;
    }
    if let Some(symbol) = var("SYMBOL") {
        config.symbol = symbol.trim().to_string();
    }
    if let Some(days) = var("N_DAYS") {
        config.n_days = days
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::Config(format!("invalid N_DAYS value: {e}")))?;
    }
    if let Some(raw) = var("CACHE_TTL_SECS") {
        config.cache.ttl_secs = parse_positive_u64(&raw, "CACHE_TTL_SECS")?;
    }
    if let Some(raw) = var("CACHE_CLEANUP_INTERVAL_SECS") {
        config.cache.cleanup_interval_secs =
            parse_positive_u64(&raw, "CACHE_CLEANUP_INTERVAL_SECS")?;
    }
    if let Some(raw) = var("REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = parse_positive_u64(&raw, "REQUEST_TIMEOUT_SECS")?;
    }

    Ok(())
}

/// Load ticker configuration from environment and optional config file.
pub fn load_config() -> Result<TickerConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = TickerConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    // 5. Validate.
    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overridden(vars: &[(&str, &str)]) -> Result<TickerConfig, Error> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = TickerConfig::default();
        apply_env_overrides(&mut config, |name| env.get(name).cloned())?;
        Ok(config)
    }

    #[test]
    fn test_env_overrides_defaults() {
        let cfg = overridden(&[
            ("PORT", "9090"),
            ("API_KEY", "secret"),
            ("SYMBOL", "MSFT"),
            ("N_DAYS", "30"),
            ("CACHE_TTL_SECS", "120"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.symbol, "MSFT");
        assert_eq!(cfg.n_days, 30);
        assert_eq!(cfg.cache.ttl_secs, 120);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_empty_env_values_keep_defaults() {
        let cfg = overridden(&[("PORT", ""), ("SYMBOL", "  ")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.symbol, "IBM");
    }

    #[test]
    fn test_invalid_n_days_is_rejected() {
        let err = overridden(&[("N_DAYS", "seven")]).unwrap_err();
        assert!(err.to_string().contains("invalid N_DAYS value"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = overridden(&[("PORT", "99999")]).unwrap_err();
        assert!(err.to_string().contains("invalid PORT value"));
    }

    #[test]
    fn test_zero_ttl_env_is_rejected() {
        let err = overridden(&[("CACHE_TTL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("CACHE_TTL_SECS must be an integer > 0"));
    }

    #[test]
    fn test_oversized_ttl_fails_validation() {
        let cfg = overridden(&[("API_KEY", "secret"), ("CACHE_TTL_SECS", "18446744073709551615")])
            .unwrap();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("cache.ttl_secs must be <="));

        let cfg = overridden(&[("API_KEY", "secret"), ("CACHE_TTL_SECS", "2592000")]).unwrap();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let err = validate_config(&TickerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("API_KEY environment variable is required"));
    }

    #[test]
    fn test_non_positive_days_fail_validation() {
        let mut cfg = overridden(&[("API_KEY", "secret"), ("N_DAYS", "-3")]).unwrap();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("n_days must be > 0"));

        cfg.n_days = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_toml_file_shape() {
        let cfg: TickerConfig = toml::from_str(
            r#"
            symbol = "AAPL"
            n_days = 10

            [cache]
            ttl_secs = 300
            "#,
        )
        .expect("config.toml should parse");

        assert_eq!(cfg.symbol, "AAPL");
        assert_eq!(cfg.n_days, 10);
        assert_eq!(cfg.cache.ttl_secs, 300);
        assert_eq!(cfg.cache.cleanup_interval_secs, 60);
        assert_eq!(cfg.port, 8080);
    }
}
