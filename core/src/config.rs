//! Client configuration.
//!
//! Resolution order: defaults, then environment variables, then whatever
//! the embedding application applies on top (CLI flags, host settings).

use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://food-delivery.umain.io/api/v1";
pub const BASE_URL_ENV: &str = "MUNCHIES_BASE_URL";
pub const TIMEOUT_ENV: &str = "MUNCHIES_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `MUNCHIES_BASE_URL` and `MUNCHIES_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("base url overridden by {BASE_URL_ENV}: {url}");
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => warn!("ignoring {TIMEOUT_ENV}=0"),
                Ok(secs) => config.timeout_secs = Some(secs),
                Err(_) => warn!("ignoring invalid {TIMEOUT_ENV}: {raw:?}"),
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
