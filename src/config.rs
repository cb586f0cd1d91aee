//! Application-level configuration loading: match timing, tick period and tracking options.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::clock::{DEFAULT_ENDGAME_WINDOW_SECS, DEFAULT_MATCH_DURATION_SECS, MatchTiming};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SEVENS_TRACKER_CONFIG_PATH";
const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
const DEFAULT_SSE_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Match time boundaries used for half splits and endgame checks.
    pub timing: MatchTiming,
    /// Period of the shared tick broadcaster.
    pub tick_interval: Duration,
    /// Bench s-class players automatically once they reach their per-half cap.
    pub auto_bench_on_limit: bool,
    /// Capacity of the SSE broadcast channel.
    pub sse_capacity: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        duration = config.timing.duration,
                        auto_bench = config.auto_bench_on_limit,
                        "loaded tracker config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document, filling absent keys with defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    match_duration_secs: Option<u32>,
    half_length_secs: Option<u32>,
    endgame_window_secs: Option<u32>,
    tick_interval_ms: Option<u64>,
    auto_bench_on_limit: bool,
    sse_capacity: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let duration = value
            .match_duration_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_MATCH_DURATION_SECS);
        let half_length = value
            .half_length_secs
            .filter(|secs| *secs > 0 && *secs <= duration)
            .unwrap_or(duration / 2);
        let endgame_window = value
            .endgame_window_secs
            .unwrap_or(DEFAULT_ENDGAME_WINDOW_SECS)
            .min(duration);

        Self {
            timing: MatchTiming {
                duration,
                half_length,
                endgame_window,
            },
            tick_interval: Duration::from_millis(
                value
                    .tick_interval_ms
                    .filter(|ms| *ms > 0)
                    .unwrap_or(DEFAULT_TICK_INTERVAL_MS),
            ),
            auto_bench_on_limit: value.auto_bench_on_limit,
            sse_capacity: value
                .sse_capacity
                .filter(|capacity| *capacity > 0)
                .unwrap_or(DEFAULT_SSE_CAPACITY),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
