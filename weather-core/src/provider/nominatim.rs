//! Forward geocoding via Nominatim (OpenStreetMap). No API key, but the
//! usage policy requires an identifying `User-Agent`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{config::GeocodingConfig, error::ProviderError, model::Coordinate};

use super::Geocoder;

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self { base_url: config.base_url.clone(), http })
    }

    async fn fetch_candidates(&self, place: &str) -> Result<Vec<NominatimPlace>, ProviderError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", place), ("format", "json")])
            .send()
            .await
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::InvalidResponse(format!("status {status}")));
        }

        res.json()
            .await
            .map_err(|error| ProviderError::InvalidResponse(error.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Option<Coordinate> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        Some(Coordinate::new(latitude, longitude))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, place: &str) -> Vec<Coordinate> {
        debug!(place, "geocoding place");

        match self.fetch_candidates(place).await {
            Ok(places) => {
                let coords: Vec<_> = places.iter().filter_map(NominatimPlace::coordinate).collect();
                debug!(candidates = coords.len(), "geocoding finished");
                coords
            }
            Err(error) => {
                warn!(place, %error, "geocoding failed, treating as no result");
                Vec::new()
            }
        }
    }
}
