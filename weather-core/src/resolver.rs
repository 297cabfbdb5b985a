//! Turning raw user input into a [`LocationQuery`].

use tracing::{debug, info};

use crate::{
    config::ResolverConfig,
    error::ResolutionError,
    model::{Coordinate, LocationQuery},
    provider::Geocoder,
};

/// Resolve raw city / latitude / longitude fields.
///
/// Coordinates win when both are present. They are only parsed here; nothing
/// is fetched to validate them.
pub fn resolve(
    raw_city: &str,
    raw_lat: &str,
    raw_lon: &str,
    config: &ResolverConfig,
) -> Result<LocationQuery, ResolutionError> {
    let (city, lat, lon) = (raw_city.trim(), raw_lat.trim(), raw_lon.trim());

    if !lat.is_empty() && !lon.is_empty() {
        let latitude = lat.parse::<f64>().map_err(|_| ResolutionError::InvalidCoordinates)?;
        let longitude = lon.parse::<f64>().map_err(|_| ResolutionError::InvalidCoordinates)?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ResolutionError::InvalidCoordinates);
        }
        return Ok(LocationQuery::Coordinates(Coordinate::new(latitude, longitude)));
    }

    if city.is_empty() {
        return Err(ResolutionError::NoInputProvided);
    }

    Ok(LocationQuery::place(disambiguate(city, &config.default_region)))
}

/// Append `", {region}"` to single-word place names.
fn disambiguate(place: &str, region: &str) -> String {
    let region = region.trim();
    if region.is_empty() || place.split_whitespace().count() != 1 {
        return place.to_string();
    }
    format!("{place}, {region}")
}

/// Look a place up with the geocoder and return the first candidate as a
/// coordinate query.
pub async fn geocode_fallback(
    geocoder: &dyn Geocoder,
    place: &str,
) -> Result<LocationQuery, ResolutionError> {
    info!(place, "forecast provider rejected place, trying geocoding");

    let candidates = geocoder.search(place).await;
    match candidates.first() {
        Some(coord) => {
            debug!(lat = coord.latitude, lon = coord.longitude, "geocoding candidate selected");
            Ok(LocationQuery::Coordinates(*coord))
        }
        None => Err(ResolutionError::LocationNotFound),
    }
}
