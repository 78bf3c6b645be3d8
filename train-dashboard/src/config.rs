//! Dashboard configuration.
//!
//! Every setting has a built-in default and can be overridden through a
//! `TRAIN_*` environment variable.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::feed::{DEFAULT_FEED_URL, DEFAULT_POLL_INTERVAL, FeedClientConfig, FetchOverlap};

/// Default interval between auto-scroll steps.
pub const DEFAULT_SCROLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Default auto-scroll step, in CSS pixels.
pub const DEFAULT_SCROLL_STEP_PX: u32 = 10;

/// Default station shown in the "Current Station" column.
pub const DEFAULT_CURRENT_STATION: &str = "sc";

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
const DEFAULT_STATIC_DIR: &str = "train-dashboard/static";
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// An interval was set to zero
    #[error("{key} must be greater than zero")]
    ZeroInterval { key: &'static str },
}

/// Runtime configuration for the dashboard service.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Feed endpoint returning a JSON array of trains
    pub feed_url: String,

    /// Feed request timeout in seconds
    pub feed_timeout_secs: u64,

    /// Interval between feed fetches
    pub poll_interval: Duration,

    /// What to do when a fetch is still running at the next tick
    pub fetch_overlap: FetchOverlap,

    /// Interval between auto-scroll steps in the browser
    pub scroll_interval: Duration,

    /// Auto-scroll step in pixels
    pub scroll_step_px: u32,

    /// Station shown in every row's "Current Station" column
    pub current_station: String,

    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// Serve trains from this JSON file instead of the live feed
    pub mock_data: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            fetch_overlap: FetchOverlap::default(),
            scroll_interval: DEFAULT_SCROLL_INTERVAL,
            scroll_step_px: DEFAULT_SCROLL_STEP_PX,
            current_station: DEFAULT_CURRENT_STATION.to_string(),
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            mock_data: None,
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("TRAIN_FEED_URL") {
            config.feed_url = url;
        }
        if let Some(secs) = parse_var(&get, "TRAIN_FEED_TIMEOUT_SECS")? {
            config.feed_timeout_secs = secs;
        }
        if let Some(ms) = parse_var::<u64>(&get, "TRAIN_POLL_INTERVAL_MS")? {
            config.poll_interval = interval("TRAIN_POLL_INTERVAL_MS", ms)?;
        }
        if let Some(value) = get("TRAIN_FETCH_OVERLAP") {
            config.fetch_overlap =
                FetchOverlap::parse(&value).ok_or_else(|| ConfigError::Invalid {
                    key: "TRAIN_FETCH_OVERLAP",
                    value,
                    reason: "expected `serialize` or `overlap`".to_string(),
                })?;
        }
        if let Some(ms) = parse_var::<u64>(&get, "TRAIN_SCROLL_INTERVAL_MS")? {
            config.scroll_interval = interval("TRAIN_SCROLL_INTERVAL_MS", ms)?;
        }
        if let Some(px) = parse_var(&get, "TRAIN_SCROLL_STEP_PX")? {
            config.scroll_step_px = px;
        }
        if let Some(station) = get("TRAIN_CURRENT_STATION") {
            config.current_station = station;
        }
        if let Some(addr) = parse_var(&get, "TRAIN_BIND_ADDR")? {
            config.bind_addr = addr;
        }
        if let Some(dir) = get("TRAIN_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        config.mock_data = get("TRAIN_FEED_MOCK").map(PathBuf::from);

        Ok(config)
    }

    /// Set the feed URL.
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the station shown in the "Current Station" column.
    pub fn with_current_station(mut self, station: impl Into<String>) -> Self {
        self.current_station = station.into();
        self
    }

    /// Settings for the feed HTTP client.
    pub fn feed_client_config(&self) -> FeedClientConfig {
        FeedClientConfig::new(&self.feed_url).with_timeout(self.feed_timeout_secs)
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get(key)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

fn interval(key: &'static str, ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::ZeroInterval { key });
    }
    Ok(Duration::from_millis(ms))
}
