//! Process configuration read from environment variables.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use thiserror::Error;

use catalog_infra::ListingConfig;
use catalog_infra::config::DEFAULT_DELETE_BATCH_SIZE;
use catalog_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "CATALOG_BIND_ADDR";
pub const DELETE_BATCH_SIZE_VAR: &str = "CATALOG_DELETE_BATCH_SIZE";
pub const LOG_FORMAT_VAR: &str = "CATALOG_LOG_FORMAT";
pub const SEED_FILE_VAR: &str = "CATALOG_SEED_FILE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub seed_file: Option<PathBuf>,
    pub listing: ListingConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get(BIND_ADDR_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(BIND_ADDR_VAR, &raw, e))?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|e| ConfigError::invalid(BIND_ADDR_VAR, DEFAULT_BIND_ADDR, e))?,
        };

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_VAR, &raw, e))?,
            None => LogFormat::default(),
        };

        let delete_batch_size = match get(DELETE_BATCH_SIZE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|e| ConfigError::invalid(DELETE_BATCH_SIZE_VAR, &raw, e))?,
            None => DEFAULT_DELETE_BATCH_SIZE,
        };

        Ok(Self {
            bind_addr,
            log_format,
            seed_file: get(SEED_FILE_VAR).map(PathBuf::from),
            listing: ListingConfig::default().with_delete_batch_size(delete_batch_size),
        })
    }
}
