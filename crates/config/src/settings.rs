//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Main application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP adapter configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Knowledge table file locations
    #[serde(default)]
    pub data: DataSettings,

    /// Live weather collaborator
    #[serde(default)]
    pub weather: WeatherSettings,

    /// Session store limits
    #[serde(default)]
    pub session: SessionSettings,

    /// Locations the classifier recognizes inside weather questions.
    /// Follow-up answers are not restricted to this list.
    #[serde(default = "default_known_locations")]
    pub known_weather_locations: Vec<String>,

    /// Phrases that end a conversation and clear its context.
    #[serde(default = "default_exit_phrases")]
    pub exit_phrases: Vec<String>,

    /// Sample queries quoted back to the user on unrecognized input.
    #[serde(default = "default_example_queries")]
    pub example_queries: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins; empty means same-host tooling only.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_crop_file")]
    pub crop_advisory_file: String,
    #[serde(default = "default_mandi_file")]
    pub mandi_prices_file: String,
    #[serde(default = "default_schemes_file")]
    pub schemes_file: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            crop_advisory_file: default_crop_file(),
            mandi_prices_file: default_mandi_file(),
            schemes_file: default_schemes_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// OpenWeatherMap API key; unset or empty disables live weather.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_url(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

/// Session store limits. Sessions never persist across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Idle sessions older than this are evicted.
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_secs: u64,
    /// Hard cap; the stalest session is evicted at capacity.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_ttl_secs: default_idle_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            data: DataSettings::default(),
            weather: WeatherSettings::default(),
            session: SessionSettings::default(),
            known_weather_locations: default_known_locations(),
            exit_phrases: default_exit_phrases(),
            example_queries: default_example_queries(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_crop_file() -> String {
    "data/knowledge_base/crop_advisory.json".to_string()
}

fn default_mandi_file() -> String {
    "data/knowledge_base/mandi_prices.json".to_string()
}

fn default_schemes_file() -> String {
    "data/knowledge_base/schemes_advisory.json".to_string()
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_timeout() -> u64 {
    10
}

fn default_idle_ttl() -> u64 {
    1800
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_known_locations() -> Vec<String> {
    [
        "दिल्ली",
        "मुंबई",
        "कानपुर",
        "लखनऊ",
        "पटना",
        "भोपाल",
        "जयपुर",
        "हैदराबाद",
        "रांची",
        "रायपुर",
        "चंडीगढ़",
        "अहमदाबाद",
        "पुणे",
        "नागपुर",
        "इंदौर",
        "लुधियाना",
        "आगरा",
        "वाराणसी",
        "मेरठ",
        // Jharkhand districts
        "बोकारो",
        "चतरा",
        "देवघर",
        "धनबाद",
        "दुमका",
        "पूर्वी सिंहभूम",
        "गढ़वा",
        "गिरिडीह",
        "गोड्डा",
        "गुमला",
        "हजारीबाग",
        "जामताड़ा",
        "खूंटी",
        "कोडरमा",
        "लातेहार",
        "लोहरदगा",
        "पाकुड़",
        "पलामू",
        "रामगढ़",
        "साहेबगंज",
        "सरायकेला खरसावां",
        "सिमडेगा",
        "पश्चिमी सिंहभूम",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_exit_phrases() -> Vec<String> {
    ["धन्यवाद", "बाय", "बाय बाय", "स्टॉप", "बंद करो"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_example_queries() -> Vec<String> {
    [
        "गेहूं की खेती कब करें?",
        "धान के बारे में बताओ।",
        "सरसों में कौन से कीट लगते हैं?",
        "मक्का के लिए खाद की जानकारी दें।",
        "आलू के लिए मिट्टी कैसी होनी चाहिए?",
        "टमाटर में सिंचाई कब करें?",
        "कानपुर में आज मौसम कैसा है?",
        "लखनऊ मंडी में गेहूं का भाव क्या है?",
        "किसानों के लिए सरकारी योजनाएं कौन सी हैं?",
        "पीएम किसान योजना क्या है?",
        "मदद",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings after loading.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.max_sessions".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.exit_phrases.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "exit_phrases".to_string(),
                message: "at least one exit phrase is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > `config/{env}.yaml` > `config/default.yaml` >
/// built-in defaults. Missing files are not an error.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if Path::new("config/default.yaml").exists() {
        builder = builder.add_source(File::with_name("config/default"));
    }

    if let Some(env_name) = env {
        let env_file = format!("config/{}", env_name);
        if Path::new(&format!("{}.yaml", env_file)).exists() {
            builder = builder.add_source(File::with_name(&env_file));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("KRISHI_MITRA")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
