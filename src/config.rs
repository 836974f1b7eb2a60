use crate::{error::Error, Options};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

pub const ENV_API_KEY: &str = "ADDRESS_VALIDATION_API_KEY";
pub const ENV_ENDPOINT: &str = "ADDRESS_VALIDATION_ENDPOINT";
pub const ENV_CACHE_TTL: &str = "ADDRESS_VALIDATION_CACHE_TTL";
pub const ENV_USPS_CASS: &str = "ADDRESS_VALIDATION_USPS_CASS";
pub const ENV_LANGUAGE: &str = "ADDRESS_VALIDATION_LANGUAGE";

/// One day.
pub const DEFAULT_CACHE_TTL_SECONDS: i64 = 86_400;

/// One year. Longer TTLs are cut down to this.
pub const MAX_CACHE_TTL_SECONDS: i64 = 365 * DEFAULT_CACHE_TTL_SECONDS;

/// Client settings.
///
/// Deserializable, so it can live in any serde-readable settings file, or be read from the
/// environment with [`Config::from_env`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// API key of the validation service.
    pub api_key: String,
    #[serde(default)]
    /// Base URL of a service serving the same API. `None` means the public Google endpoint.
    pub endpoint: Option<Url>,
    #[serde(default = "default_cache_ttl_seconds")]
    /// How long a response stays cached. Zero or negative disables caching, values above
    /// [`MAX_CACHE_TTL_SECONDS`] are capped.
    pub cache_ttl_seconds: i64,
    #[serde(default)]
    /// Request USPS CASS processing for US addresses by default.
    pub enable_usps_cass: bool,
    #[serde(default)]
    /// Default language code of the input addresses.
    pub language_code: Option<String>,
}

fn default_cache_ttl_seconds() -> i64 {
    DEFAULT_CACHE_TTL_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            endpoint: None,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            enable_usps_cass: false,
            language_code: None,
        }
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Reads the settings from `ADDRESS_VALIDATION_*` environment variables.
    /// The API key is required, everything else falls back to the defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let endpoint = lookup(ENV_ENDPOINT)
            .filter(|url| !url.trim().is_empty())
            .map(|url| Url::parse(url.trim()))
            .transpose()?;

        let cache_ttl_seconds = match lookup(ENV_CACHE_TTL) {
            Some(ttl) => ttl.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "{} is not a number of seconds: {:?}, using {}",
                    ENV_CACHE_TTL,
                    ttl,
                    DEFAULT_CACHE_TTL_SECONDS
                );
                DEFAULT_CACHE_TTL_SECONDS
            }),
            None => DEFAULT_CACHE_TTL_SECONDS,
        };
        if cache_ttl_seconds > MAX_CACHE_TTL_SECONDS {
            log::warn!(
                "{} of {} seconds exceeds the maximum, using {}",
                ENV_CACHE_TTL,
                cache_ttl_seconds,
                MAX_CACHE_TTL_SECONDS
            );
        }
        let cache_ttl_seconds = cache_ttl_seconds.min(MAX_CACHE_TTL_SECONDS);

        let enable_usps_cass = lookup(ENV_USPS_CASS)
            .map(|flag| matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let language_code = lookup(ENV_LANGUAGE).filter(|code| !code.trim().is_empty());

        Ok(Config {
            api_key,
            endpoint,
            cache_ttl_seconds,
            enable_usps_cass,
            language_code,
        })
    }

    /// The cache TTL, clamped to `0..=MAX_CACHE_TTL_SECONDS`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::seconds(self.cache_ttl_seconds.clamp(0, MAX_CACHE_TTL_SECONDS))
    }

    /// Base request options for a region.
    ///
    /// USPS CASS is only switched on for `US` and `PR`, the service rejects it elsewhere.
    pub fn options(&self, region_code: Option<&str>) -> Options {
        let region_code = region_code.map(|code| code.trim().to_ascii_uppercase());
        let usps_region = matches!(region_code.as_deref(), Some("US") | Some("PR"));
        Options {
            enable_usps_cass: self.enable_usps_cass && usps_region,
            language_code: self.language_code.clone(),
            region_code,
            ..Default::default()
        }
    }
}
