//! OpenWeatherMap client
//!
//! Implements the dialogue core's [`WeatherProvider`] seam. A missing
//! API key disables the provider rather than failing startup, and an
//! unrecognized city comes back as `Ok(None)` so the responder can
//! apologize instead of erroring.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use krishi_config::WeatherSettings;
use krishi_core::{WeatherError, WeatherProvider, WeatherSnapshot};

pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(settings: &WeatherSettings) -> Result<Self, WeatherError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(String::from);
        if api_key.is_none() {
            tracing::warn!("No OpenWeatherMap API key configured, live weather disabled");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    #[serde(default)]
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    humidity: Option<u8>,
}

impl OwmResponse {
    fn into_snapshot(self, requested: &str) -> WeatherSnapshot {
        let city_name = if self.name.is_empty() {
            requested.to_string()
        } else {
            self.name
        };
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "उपलब्ध नहीं".to_string());
        WeatherSnapshot {
            city_name,
            description,
            temp_celsius: self.main.temp,
            humidity: self.main.humidity,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, location: &str) -> Result<Option<WeatherSnapshot>, WeatherError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => return Ok(None),
        };

        let query = format!("{},IN", location.trim());
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", "hi"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(location = %location, "City not found by weather provider");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(WeatherError::BadResponse(format!(
                "status {}",
                response.status()
            )));
        }

        let body: OwmResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::BadResponse(e.to_string()))?;
        Ok(Some(body.into_snapshot(location)))
    }
}
