use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Query token understood by the forecast provider, e.g. `"31.1,77.17"`.
    pub fn query_token(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Resolved user input: explicit coordinates or a place name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LocationQuery {
    Coordinates(Coordinate),
    Place { name: String },
}

impl LocationQuery {
    pub fn place(name: impl Into<String>) -> Self {
        LocationQuery::Place { name: name.into() }
    }

    pub fn query_token(&self) -> String {
        match self {
            LocationQuery::Coordinates(coord) => coord.query_token(),
            LocationQuery::Place { name } => name.clone(),
        }
    }

    pub fn is_place(&self) -> bool {
        matches!(self, LocationQuery::Place { .. })
    }

    pub fn coordinates(&self) -> Option<Coordinate> {
        match self {
            LocationQuery::Coordinates(coord) => Some(*coord),
            LocationQuery::Place { .. } => None,
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_token())
    }
}

/// Current conditions for the resolved location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSnapshot {
    pub location_name: String,
    pub country: String,
    /// Provider-reported position of the location.
    pub location: Coordinate,
    pub temperature_c: f64,
    pub wind_kph: f64,
    pub humidity_pct: u8,
    pub condition: String,
    pub icon_url: String,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecastPoint {
    pub date: NaiveDate,
    /// Full weekday name, e.g. `"Monday"`.
    pub weekday: String,
    pub avg_temp_c: f64,
    pub condition: String,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecastPoint {
    pub time: NaiveDateTime,
    /// 12-hour clock label, e.g. `"01 PM"`.
    pub label: String,
    pub temp_c: f64,
    pub condition: String,
    pub emoji: &'static str,
}

pub const DEFAULT_TEMP_CEILING_C: f64 = 30.0;
pub const DEFAULT_WIND_CEILING_KPH: f64 = 50.0;

/// User-supplied alert thresholds for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub enabled: bool,
    pub temp_ceiling_c: f64,
    pub wind_ceiling_kph: f64,
    pub rain: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            temp_ceiling_c: DEFAULT_TEMP_CEILING_C,
            wind_ceiling_kph: DEFAULT_WIND_CEILING_KPH,
            rain: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    Temperature { observed_c: f64, ceiling_c: f64 },
    WindSpeed { observed_kph: f64, ceiling_kph: f64 },
    Rain,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::Temperature { observed_c, ceiling_c } => write!(
                f,
                "🚨 Temperature Alert: {observed_c}°C is above {ceiling_c}°C!"
            ),
            Alert::WindSpeed { observed_kph, ceiling_kph } => write!(
                f,
                "🚨 Wind Speed Alert: {observed_kph} km/h is above {ceiling_kph} km/h!"
            ),
            Alert::Rain => {
                f.write_str("🚨 Rain Alert: Rain detected in the current weather conditions!")
            }
        }
    }
}

/// Triggered alerts, in evaluation order (temperature, wind, rain).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlertResult(Vec<Alert>);

impl AlertResult {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self(alerts)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

/// Everything the presenter produces for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// The query that produced the payload (coordinates after a geocoding fallback).
    pub query: LocationQuery,
    pub snapshot: ForecastSnapshot,
    pub daily: Vec<DailyForecastPoint>,
    pub hourly: Vec<HourlyForecastPoint>,
    pub alerts: AlertResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_token_uses_comma_without_spaces() {
        assert_eq!(Coordinate::new(31.1048, 77.1734).query_token(), "31.1048,77.1734");
        assert_eq!(Coordinate::new(-33.5, 151.25).query_token(), "-33.5,151.25");
    }

    #[test]
    fn place_token_is_the_raw_name() {
        let q = LocationQuery::place("Shimla, Himachal Pradesh");
        assert_eq!(q.query_token(), "Shimla, Himachal Pradesh");
        assert!(q.is_place());
        assert_eq!(q.coordinates(), None);
    }

    #[test]
    fn alert_messages_render_observed_and_ceiling() {
        let temp = Alert::Temperature { observed_c: 32.5, ceiling_c: 30.0 };
        assert_eq!(temp.to_string(), "🚨 Temperature Alert: 32.5°C is above 30°C!");

        let wind = Alert::WindSpeed { observed_kph: 61.2, ceiling_kph: 50.0 };
        assert_eq!(wind.to_string(), "🚨 Wind Speed Alert: 61.2 km/h is above 50 km/h!");
    }

    #[test]
    fn alert_config_defaults_match_dashboard_defaults() {
        let cfg = AlertConfig::default();
        assert!(cfg.enabled);
        assert_eq!(cfg.temp_ceiling_c, 30.0);
        assert_eq!(cfg.wind_ceiling_kph, 50.0);
        assert!(!cfg.rain);
    }
}
