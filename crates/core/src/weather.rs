//! Weather collaborator seam
//!
//! The dialogue core only needs "give me current conditions for a
//! place, or tell me you can't". Network mechanics, retries and API
//! keys live behind this trait in the adapter layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current conditions for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Resolved city name as reported by the provider.
    pub city_name: String,
    /// Human-readable conditions (localized by the provider).
    pub description: String,
    pub temp_celsius: Option<f64>,
    pub humidity: Option<u8>,
}

/// Errors a weather provider may surface.
///
/// The responder treats every variant as "weather unavailable" —
/// nothing here is fatal to a turn.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("weather provider not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected provider response: {0}")]
    BadResponse(String),
}

/// Read-only weather lookup.
///
/// `Ok(None)` means the provider answered but does not know the
/// location; implementations should prefer it over an error for
/// user-correctable input.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Option<WeatherSnapshot>, WeatherError>;
}
