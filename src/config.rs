use thiserror::Error;

use crate::engine::{CapacityPolicy, EngineConfig, OverlapPolicy};

pub const DEFAULT_MAX_CONNECTIONS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Process configuration, read once from `ROOMSCHED_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TCP address to serve on. Unset means one console session on stdin.
    pub bind: Option<String>,
    pub max_connections: usize,
    pub metrics_port: Option<u16>,
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            metrics_port: None,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        config.bind = lookup("ROOMSCHED_BIND").filter(|s| !s.trim().is_empty());
        if let Some(raw) = lookup("ROOMSCHED_MAX_CONNECTIONS") {
            config.max_connections = parse("ROOMSCHED_MAX_CONNECTIONS", &raw)?;
            if config.max_connections == 0 {
                return Err(invalid("ROOMSCHED_MAX_CONNECTIONS", &raw, "must be positive"));
            }
        }
        if let Some(raw) = lookup("ROOMSCHED_METRICS_PORT") {
            config.metrics_port = Some(parse("ROOMSCHED_METRICS_PORT", &raw)?);
        }
        if let Some(raw) = lookup("ROOMSCHED_OVERLAP") {
            config.engine.overlap = parse::<OverlapPolicy>("ROOMSCHED_OVERLAP", &raw)?;
        }
        if let Some(raw) = lookup("ROOMSCHED_CAPACITY_CHECK") {
            config.engine.capacity = parse::<CapacityPolicy>("ROOMSCHED_CAPACITY_CHECK", &raw)?;
        }
        Ok(config)
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(var, raw, &e.to_string()))
}

fn invalid(var: &'static str, raw: &str, reason: &str) -> ConfigError {
    ConfigError {
        var,
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}
