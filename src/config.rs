use std::env;
use std::time::Duration;

use crate::mempool::DEFAULT_API_URL;

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mempool_api_url: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            mempool_api_url: DEFAULT_API_URL.to_string(),
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            mempool_api_url: lookup("MEMPOOL_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.mempool_api_url),
            cache_ttl: secs("CACHE_TTL_SECS", defaults.cache_ttl),
            request_timeout: secs("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
        }
    }
}
