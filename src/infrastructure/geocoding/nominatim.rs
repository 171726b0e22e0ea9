use super::Geocoder;
use crate::domain::error::{AppError, Result};
use crate::domain::geo::GeoPoint;
use crate::infrastructure::config::GeocoderConfig;
use async_trait::async_trait;
use serde::Deserialize;

// Nominatim returns coordinates as strings.
#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &GeocoderConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn parse_coordinate(raw: &str, axis: &str) -> Result<f64> {
        raw.parse::<f64>()
            .map_err(|e| AppError::GeocodeError(format!("Invalid {} '{}': {}", axis, raw, e)))
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| AppError::GeocodeError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::GeocodeError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| AppError::GeocodeError(format!("Failed to parse JSON: {}", e)))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let latitude = Self::parse_coordinate(&place.lat, "latitude")?;
        let longitude = Self::parse_coordinate(&place.lon, "longitude")?;
        Ok(Some(GeoPoint::new(latitude, longitude)))
    }
}
