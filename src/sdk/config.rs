use std::{env, num::NonZeroU32, time::Duration};
use thiserror::Error;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "address-retrieval";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the reverse geocoding client, read from `NOMINATIM_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub requests_per_second: NonZeroU32,
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            requests_per_second: NonZeroU32::MIN,
            timeout: Duration::from_secs(15),
        }
    }
}

impl GeocoderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("NOMINATIM_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("NOMINATIM_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(rate) = lookup("NOMINATIM_RATE_PER_SEC") {
            config.requests_per_second = parse("NOMINATIM_RATE_PER_SEC", rate)?;
        }
        if let Some(secs) = lookup("NOMINATIM_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse("NOMINATIM_TIMEOUT_SECS", secs)?);
        }

        log::debug!("Geocoder config: {:?}", config);
        Ok(config)
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
