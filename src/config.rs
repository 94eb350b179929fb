//! Runtime configuration read from the environment (`.env` is loaded by the binary).

use std::time::Duration;

use crate::{CatalogError, Result};

const MIN_CLOSE_DELAY_MS: u64 = 150;
const MAX_CLOSE_DELAY_MS: u64 = 200;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub catalog_api_url: String,
    pub port: u16,
    pub request_timeout: Duration,
    /// Desktop menu close delay, always within 150..=200 ms.
    pub nav_close_delay: Duration,
    /// Product page size.
    pub product_fetch_limit: u32,
    /// Upper bound on product pages fetched for one category page.
    pub product_max_pages: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests do not touch process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let catalog_api_url = lookup("CATALOG_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("CATALOG_API_URL is not set".into()))?
            .trim_end_matches('/')
            .to_string();
        let port = parse_or(&lookup, "PORT", 8083u16)?;
        let timeout_secs = parse_or(&lookup, "CATALOG_TIMEOUT_SECS", 10u64)?;
        let close_delay_ms = parse_or(&lookup, "NAV_CLOSE_DELAY_MS", MIN_CLOSE_DELAY_MS)?
            .clamp(MIN_CLOSE_DELAY_MS, MAX_CLOSE_DELAY_MS);
        let product_fetch_limit = parse_or(&lookup, "PRODUCT_FETCH_LIMIT", 200u32)?;
        let product_max_pages = parse_or(&lookup, "PRODUCT_MAX_PAGES", 50u32)?;

        Ok(Self {
            catalog_api_url,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
            nav_close_delay: Duration::from_millis(close_delay_ms),
            product_fetch_limit,
            product_max_pages,
        })
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| CatalogError::Config(format!("{key} has invalid value '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("CATALOG_API_URL", "http://api.local/v1/")])).unwrap();
        assert_eq!(config.catalog_api_url, "http://api.local/v1");
        assert_eq!(config.port, 8083);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.nav_close_delay, Duration::from_millis(150));
        assert_eq!(config.product_fetch_limit, 200);
        assert_eq!(config.product_max_pages, 50);
    }

    #[test]
    fn test_close_delay_is_clamped() {
        let config = Config::from_lookup(lookup(&[("CATALOG_API_URL", "http://x"), ("NAV_CLOSE_DELAY_MS", "900")])).unwrap();
        assert_eq!(config.nav_close_delay, Duration::from_millis(200));
        let config = Config::from_lookup(lookup(&[("CATALOG_API_URL", "http://x"), ("NAV_CLOSE_DELAY_MS", "10")])).unwrap();
        assert_eq!(config.nav_close_delay, Duration::from_millis(150));
    }

    #[test]
    fn test_missing_url_and_bad_port() {
        assert!(matches!(Config::from_lookup(lookup(&[])), Err(CatalogError::Config(_))));
        let err = Config::from_lookup(lookup(&[("CATALOG_API_URL", "http://x"), ("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
