use std::str::FromStr;

use super::{ConfigError, FaveConfig};

/// Trait for strongly-typed configuration sections.
///
/// ```ignore
/// let db: DatabaseConfig = FaveConfig::load("dev")?.section()?;
/// ```
pub trait ConfigProperties: Sized {
    /// The configuration key prefix (e.g., `"fave.database"`).
    fn prefix() -> &'static str;

    /// Construct from a `FaveConfig` instance.
    fn from_config(config: &FaveConfig) -> Result<Self, ConfigError>;

    /// Absolute key for a property of this section.
    fn key(property: &str) -> String {
        format!("{}.{property}", Self::prefix())
    }
}

/// Database connection settings under `fave.database`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite://fave.db?mode=rwc`.
    pub url: String,
    /// Pool size (default: 5).
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ConfigProperties for DatabaseConfig {
    fn prefix() -> &'static str {
        "fave.database"
    }

    fn from_config(config: &FaveConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            url: config.get(&Self::key("url"))?,
            max_connections: config
                .get_opt(&Self::key("max.connections"))?
                .or(config.get_opt(&Self::key("max_connections"))?)
                .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS),
        })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::TypeMismatch {
                key: LogConfig::key("format"),
                expected: "one of: pretty, json",
            }),
        }
    }
}

/// Logging settings under `fave.log`.
///
/// `RUST_LOG`, when set, takes precedence over `filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl ConfigProperties for LogConfig {
    fn prefix() -> &'static str {
        "fave.log"
    }

    fn from_config(config: &FaveConfig) -> Result<Self, ConfigError> {
        let defaults = LogConfig::default();
        let format = match config.get_opt::<String>(&Self::key("format"))? {
            Some(raw) => raw.parse()?,
            None => defaults.format,
        };
        Ok(Self {
            filter: config
                .get_opt(&Self::key("filter"))?
                .unwrap_or(defaults.filter),
            format,
        })
    }
}
