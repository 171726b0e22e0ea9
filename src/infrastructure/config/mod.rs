use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Geocoding service settings.
///
/// `lookup_delay_ms` is the mandatory pause after each lookup attempt; the
/// upstream service's usage policy requires sequential, throttled requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub lookup_delay_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "geosense/0.1".to_string(),
            timeout_secs: 30,
            lookup_delay_ms: 1000,
        }
    }
}

/// Text-generation service settings. The API key is not part of the
/// configuration; callers supply it per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for TextGenConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub geocoder: GeocoderConfig,
    pub text_gen: TextGenConfig,
}

impl AppConfig {
    /// Defaults, overridden by `geosense.toml`, overridden by
    /// `GEOSENSE_*` environment variables (`__` separates nesting,
    /// e.g. `GEOSENSE_GEOCODER__LOOKUP_DELAY_MS=500`).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("geosense.toml"))
            .merge(Env::prefixed("GEOSENSE_").split("__"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))
    }
}
