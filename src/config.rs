//! Replay settings: environment defaults, overridden by command-line flags.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use apper_canvas::ShellConfig;

pub(crate) const DEFAULT_MESSAGE_SECS: u64 = 10;
pub(crate) const DEFAULT_ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ReplayConfig {
    pub message_secs: u64,
    /// Zoom amount applied per wheel notch or zoom key.
    pub zoom_step: f64,
    /// Sleep until each event's `at_ms` instead of replaying back to back.
    pub realtime: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { message_secs: DEFAULT_MESSAGE_SECS, zoom_step: DEFAULT_ZOOM_STEP, realtime: false }
    }
}

impl ReplayConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            message_secs: env_parse("APPER_MESSAGE_SECS", DEFAULT_MESSAGE_SECS),
            zoom_step: env_parse("APPER_ZOOM_STEP", DEFAULT_ZOOM_STEP),
            realtime: false,
        }
    }

    /// Flags given on the command line win over the environment.
    pub(crate) fn with_overrides(mut self, message_secs: Option<u64>, zoom_step: Option<f64>, realtime: bool) -> Self {
        if let Some(secs) = message_secs {
            self.message_secs = secs;
        }
        if let Some(step) = zoom_step {
            self.zoom_step = step;
        }
        self.realtime = realtime;
        self
    }

    pub(crate) fn shell(&self) -> ShellConfig {
        ShellConfig { message_duration: Duration::from_secs(self.message_secs) }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
