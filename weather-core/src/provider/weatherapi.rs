use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{config::ForecastConfig, error::ProviderError};

use super::ForecastSource;

pub const FORECAST_DAYS: &str = "7";

/// weatherapi.com `forecast.json` client.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, config: &ForecastConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self { api_key, base_url: config.base_url.clone(), http })
    }
}

#[async_trait]
impl ForecastSource for WeatherApiProvider {
    async fn fetch_forecast(&self, query: &str) -> Result<WaForecastResponse, ProviderError> {
        debug!(query, url = %self.base_url, "requesting forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", FORECAST_DAYS),
                ("aqi", "no"),
                ("alerts", "yes"),
            ])
            .send()
            .await
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        // Unknown locations come back as 400 with an `error` object, so the
        // body is decoded whatever the status.
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        debug!(%status, bytes = body.len(), "forecast response received");

        serde_json::from_str(&body).map_err(|error| {
            ProviderError::InvalidResponse(format!(
                "status {status}: {error}: {}",
                truncate_body(&body)
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaLocation {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaCondition {
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaCurrent {
    pub temp_c: f64,
    pub wind_kph: f64,
    pub humidity: u8,
    pub condition: WaCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaAstro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaDay {
    pub avgtemp_c: f64,
    pub condition: WaCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaForecastHour {
    /// Local wall-clock time, `"%Y-%m-%d %H:%M"`.
    pub time: String,
    pub temp_c: f64,
    pub condition: WaCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaForecastDay {
    /// `"%Y-%m-%d"`.
    pub date: String,
    pub astro: WaAstro,
    pub day: WaDay,
    #[serde(default)]
    pub hour: Vec<WaForecastHour>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaForecast {
    #[serde(default)]
    pub forecastday: Vec<WaForecastDay>,
}

/// A `forecast.json` body. Every section is optional: an unknown query
/// carries only `error`, and a throttled key may carry nothing useful.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaForecastResponse {
    #[serde(default)]
    pub error: Option<WaError>,
    #[serde(default)]
    pub location: Option<WaLocation>,
    #[serde(default)]
    pub current: Option<WaCurrent>,
    #[serde(default)]
    pub forecast: Option<WaForecast>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
