use crate::{
    Config,
    error::ProviderError,
    model::Coordinate,
    provider::{
        nominatim::NominatimGeocoder,
        weatherapi::{WaForecastResponse, WeatherApiProvider},
    },
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod nominatim;
pub mod weatherapi;

/// Something that returns a forecast payload for a query token.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Fetch the payload for `query` (`"lat,lon"` or a place name).
    ///
    /// An `error` object inside the payload is not an `Err`: the caller decides
    /// what a rejected query means.
    async fn fetch_forecast(&self, query: &str) -> Result<WaForecastResponse, ProviderError>;
}

/// Forward geocoding, best effort.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Candidates for `place`, best first. Any failure yields an empty list.
    async fn search(&self, place: &str) -> Vec<Coordinate>;
}

/// Construct the weatherapi.com source from config.
///
/// `api_key_override` comes from the command line or environment and wins
/// over the stored key.
pub fn forecast_source_from_config(
    config: &Config,
    api_key_override: Option<&str>,
) -> anyhow::Result<Box<dyn ForecastSource>> {
    let api_key = config.api_key(api_key_override)?;
    let provider = WeatherApiProvider::new(api_key, &config.forecast)?;
    Ok(Box::new(provider))
}

/// Construct the Nominatim geocoder from config.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Box<dyn Geocoder>> {
    Ok(Box::new(NominatimGeocoder::new(&config.geocoding)?))
}
