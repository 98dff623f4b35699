//! Configuration management for the Krishi Mitra dialogue engine
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, then `config/{env}.yaml`)
//! - Environment variables (`KRISHI_MITRA_` prefix)
//!
//! Every field carries a serde default, so the engine starts with no
//! config files at all.

pub mod settings;

pub use settings::{
    load_settings, DataSettings, ServerSettings, SessionSettings, Settings, WeatherSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
