//!
//! Logger configuration.
//!

use serde::Deserialize;

/// Log config settings.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Log {
    /// Logging to a console.
    pub console: LogConsole,
}

/// Logging to a console.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConsole {
    /// Whether you want to see log in your terminal.
    pub enabled: bool,
    /// What you see in your terminal.
    pub level: Level,
    /// Log format
    pub log_format: LogFormat,
}

impl Default for LogConsole {
    fn default() -> Self {
        Self {
            enabled: true,
            level: Level::default(),
            log_format: LogFormat::default(),
        }
    }
}

/// Describes the level of verbosity of a span or event.
#[derive(Debug, Clone, Copy)]
pub struct Level(pub(super) tracing::Level);

impl Level {
    /// Returns the most verbose [`tracing::Level`]
    pub fn into_level(&self) -> tracing::Level {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(tracing::Level::INFO)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::str::FromStr as _;

        let s = String::deserialize(deserializer)?;
        tracing::Level::from_str(&s)
            .map(Level)
            .map_err(serde::de::Error::custom)
    }
}

/// Telemetry / tracing.
#[derive(Default, Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Default pretty log format
    #[default]
    Default,
    /// JSON based structured logging
    Json,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn log_config_defaults_to_console_at_info() {
        let log: Log = serde_json::from_str("{}").unwrap();

        assert!(log.console.enabled);
        assert_eq!(log.console.level.into_level(), tracing::Level::INFO);
        assert_eq!(log.console.log_format, LogFormat::Default);
    }

    #[test]
    fn log_config_parses_level_and_format() {
        let log: Log = serde_json::from_str(
            r#"{"console":{"enabled":false,"level":"DEBUG","log_format":"json"}}"#,
        )
        .unwrap();

        assert!(!log.console.enabled);
        assert_eq!(log.console.level.into_level(), tracing::Level::DEBUG);
        assert_eq!(log.console.log_format, LogFormat::Json);
    }

    #[test]
    fn log_config_rejects_unknown_level() {
        let log = serde_json::from_str::<Log>(r#"{"console":{"level":"LOUD"}}"#);
        assert!(log.is_err());
    }
}
