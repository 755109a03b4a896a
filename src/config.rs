//! Configuration
//!
//! `AppConfig` groups store connection settings and search tuning. Values come from, in
//! increasing precedence: defaults, a YAML file, `SIXDEGREES_*` environment variables,
//! and finally CLI flags applied by the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How equally short paths are chosen between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First discovered in the store's enumeration order
    #[default]
    StoreOrder,
    /// Titles, then co-stars, visited in identifier order at every expansion
    Lexicographic,
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "store_order" | "store-order" => Ok(TieBreak::StoreOrder),
            "lexicographic" => Ok(TieBreak::Lexicographic),
            other => Err(format!("unknown tie-break mode '{}'", other)),
        }
    }
}

/// Search tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum co-star lookups in flight per expanded actor (1 = sequential)
    pub fetch_concurrency: usize,
    /// Deadline for a whole search, in milliseconds
    pub timeout_ms: Option<u64>,
    /// Maximum number of hops explored
    pub max_depth: Option<usize>,
    pub tie_break: TieBreak,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: 8,
            timeout_ms: None,
            max_depth: None,
            tie_break: TieBreak::StoreOrder,
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Whole milliseconds, saturating; anything below 1ms becomes 1ms
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(ms.max(1));
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_fetch_concurrency(mut self, n: usize) -> Self {
        self.fetch_concurrency = n;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.fetch_concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "search.fetch_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                key: "search.timeout_ms".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Store connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            // Local unix socket, avoids the TCP password prompt
            url: "postgresql:///imdb?host=/var/run/postgresql".to_string(),
            max_connections: 8,
            connect_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "database.url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "database.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Defaults (or `path` when given) with environment overrides applied
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `SIXDEGREES_*` overrides read through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SIXDEGREES_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(v) = lookup("SIXDEGREES_MAX_CONNECTIONS") {
            self.database.max_connections = parse_env("SIXDEGREES_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("SIXDEGREES_TIMEOUT_MS") {
            self.search.timeout_ms = Some(parse_env("SIXDEGREES_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("SIXDEGREES_MAX_DEPTH") {
            self.search.max_depth = Some(parse_env("SIXDEGREES_MAX_DEPTH", &v)?);
        }
        if let Some(v) = lookup("SIXDEGREES_FETCH_CONCURRENCY") {
            self.search.fetch_concurrency = parse_env("SIXDEGREES_FETCH_CONCURRENCY", &v)?;
        }
        if let Some(v) = lookup("SIXDEGREES_TIE_BREAK") {
            self.search.tie_break = v.parse().map_err(|reason| ConfigError::Invalid {
                key: "SIXDEGREES_TIE_BREAK".to_string(),
                reason,
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.database.validate()?;
        self.search.validate()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
