use crate::provider::check_http_url;
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_PROVIDER_URL: &str = "https://dog.ceo/api/breeds/image/random";
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);
pub const POLL_TICK: Duration = Duration::from_secs(1);
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_DATASET_PATH: &str = "countriesMBTI_16types.csv";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub provider_url: String,
    pub refresh_interval: Duration,
    pub poll_tick: Duration,
    pub fetch_timeout: Duration,
    pub dataset_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            refresh_interval: REFRESH_INTERVAL,
            poll_tick: POLL_TICK,
            fetch_timeout: FETCH_TIMEOUT,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparsable or zero values are
    /// logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port);
        let provider_url = provider_url(&lookup).unwrap_or(defaults.provider_url);

        let refresh_interval = positive(&lookup, "BACKDROP_REFRESH_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);
        let poll_tick = positive(&lookup, "BACKDROP_TICK_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_tick);
        let fetch_timeout = positive(&lookup, "BACKDROP_FETCH_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.fetch_timeout);
        let dataset_path = lookup("MBTI_DATASET_PATH")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_path);

        Self {
            port,
            provider_url,
            refresh_interval,
            poll_tick,
            fetch_timeout,
            dataset_path,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            default
        }
    }
}

fn provider_url(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    let raw = lookup("BACKDROP_PROVIDER_URL")?;
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match check_http_url(value) {
        Ok(_) => Some(value.to_string()),
        Err(reason) => {
            warn!("ignoring BACKDROP_PROVIDER_URL: {reason}");
            None
        }
    }
}

// tokio intervals panic on a zero period, so zero is rejected here too.
fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            warn!("ignoring {key}: must be greater than zero");
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
