//! Configuration from environment variables
//!
//! `.env` is loaded by `main` through dotenvy before `Config::from_env`.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
pub const DEFAULT_RATES_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_RATES_TTL_SECS: u64 = 60 * 60;

/// Runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Exchange-rate endpoint returning `{ "rates": { ... } }`
    pub rates_url: String,
    pub rates_timeout: Duration,
    pub rates_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("SAFARI_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("SAFARI_BIND_ADDR is not a socket address: {}", bind_addr))?;

        let rates_url = lookup("SAFARI_RATES_URL").unwrap_or_else(|| DEFAULT_RATES_URL.to_string());
        if rates_url.trim().is_empty() {
            bail!("SAFARI_RATES_URL must not be empty");
        }

        let rates_timeout = seconds(&lookup, "SAFARI_RATES_TIMEOUT_SECS", DEFAULT_RATES_TIMEOUT_SECS)?;
        let rates_ttl = seconds(&lookup, "SAFARI_RATES_TTL_SECS", DEFAULT_RATES_TTL_SECS)?;

        Ok(Self {
            bind_addr,
            rates_url,
            rates_timeout,
            rates_ttl,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rates_url: DEFAULT_RATES_URL.to_string(),
            rates_timeout: Duration::from_secs(DEFAULT_RATES_TIMEOUT_SECS),
            rates_ttl: Duration::from_secs(DEFAULT_RATES_TTL_SECS),
        }
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration> {
    let secs = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be a whole number of seconds: {}", key, raw))?,
        None => default,
    };
    if secs == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(Duration::from_secs(secs))
}
