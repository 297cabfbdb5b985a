//! Fetching a forecast for a resolved query and shaping it into the
//! snapshot, 7-day and 12-hour series.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::{
    alert,
    emoji::condition_to_emoji,
    error::PresentationError,
    model::{
        AlertConfig, Coordinate, DailyForecastPoint, Forecast, ForecastSnapshot,
        HourlyForecastPoint, LocationQuery,
    },
    provider::{
        ForecastSource, Geocoder,
        weatherapi::{WaForecastDay, WaForecastResponse},
    },
    resolver,
};

pub const DAILY_POINTS: usize = 7;
pub const HOURLY_POINTS: usize = 12;

#[derive(Debug)]
pub struct ForecastPresenter {
    forecast: Box<dyn ForecastSource>,
    geocoder: Box<dyn Geocoder>,
}

impl ForecastPresenter {
    pub fn new(forecast: Box<dyn ForecastSource>, geocoder: Box<dyn Geocoder>) -> Self {
        Self { forecast, geocoder }
    }

    /// Present `query`, starting the hourly series at the current local hour.
    pub async fn present(
        &self,
        query: LocationQuery,
        alerts: &AlertConfig,
    ) -> Result<Forecast, PresentationError> {
        let hour = Local::now().hour() as usize;
        self.present_at(query, alerts, hour).await
    }

    /// Like [`present`](Self::present) with an explicit hour index (0-23)
    /// into the first day's hourly entries.
    pub async fn present_at(
        &self,
        query: LocationQuery,
        alerts: &AlertConfig,
        current_hour: usize,
    ) -> Result<Forecast, PresentationError> {
        let mut query = query;
        let mut payload = self.fetch(&query).await?;

        if let Some(error) = payload.error.take() {
            debug!(code = ?error.code, message = %error.message, "forecast provider reported an error");

            if let LocationQuery::Place { name } = &query {
                let fallback = resolver::geocode_fallback(self.geocoder.as_ref(), name)
                    .await
                    .map_err(|_| PresentationError::LocationNotFound)?;
                payload = self.fetch(&fallback).await?;
                query = fallback;
            }
        }

        shape(query, payload, alerts, current_hour)
    }

    async fn fetch(&self, query: &LocationQuery) -> Result<WaForecastResponse, PresentationError> {
        let token = query.query_token();
        self.forecast.fetch_forecast(&token).await.map_err(|error| {
            warn!(query = %token, %error, "forecast request failed");
            PresentationError::ProviderUnavailable
        })
    }
}

fn shape(
    query: LocationQuery,
    payload: WaForecastResponse,
    alerts: &AlertConfig,
    current_hour: usize,
) -> Result<Forecast, PresentationError> {
    let current = payload.current.ok_or_else(|| malformed("current conditions"))?;
    let location = payload.location.ok_or_else(|| malformed("location"))?;
    let days = payload.forecast.map(|f| f.forecastday).unwrap_or_default();
    let today = days.first().ok_or_else(|| malformed("forecast days"))?;

    let snapshot = ForecastSnapshot {
        location_name: location.name,
        country: location.country,
        location: Coordinate::new(location.lat, location.lon),
        temperature_c: current.temp_c,
        wind_kph: current.wind_kph,
        humidity_pct: current.humidity,
        icon_url: icon_url(&current.condition.icon),
        condition: current.condition.text,
        sunrise: today.astro.sunrise.clone(),
        sunset: today.astro.sunset.clone(),
    };

    let daily = days
        .iter()
        .take(DAILY_POINTS)
        .map(daily_point)
        .collect::<Result<Vec<_>, _>>()?;

    let hourly = hourly_points(today, current_hour)?;
    let alerts = alert::evaluate(&snapshot, alerts);

    Ok(Forecast { query, snapshot, daily, hourly, alerts })
}

fn daily_point(day: &WaForecastDay) -> Result<DailyForecastPoint, PresentationError> {
    let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
        .map_err(|_| malformed("forecast date"))?;

    Ok(DailyForecastPoint {
        date,
        weekday: date.format("%A").to_string(),
        avg_temp_c: day.day.avgtemp_c,
        emoji: condition_to_emoji(&day.day.condition.text),
        condition: day.day.condition.text.clone(),
    })
}

/// Up to 12 entries from `current_hour` onwards. Never wraps into the next day.
fn hourly_points(
    today: &WaForecastDay,
    current_hour: usize,
) -> Result<Vec<HourlyForecastPoint>, PresentationError> {
    today
        .hour
        .iter()
        .skip(current_hour)
        .take(HOURLY_POINTS)
        .map(|hour| -> Result<HourlyForecastPoint, PresentationError> {
            let time = NaiveDateTime::parse_from_str(&hour.time, "%Y-%m-%d %H:%M")
                .map_err(|_| malformed("hour time"))?;

            Ok(HourlyForecastPoint {
                time,
                label: time.format("%I %p").to_string(),
                temp_c: hour.temp_c,
                emoji: condition_to_emoji(&hour.condition.text),
                condition: hour.condition.text.clone(),
            })
        })
        .collect()
}

/// Provider icons are protocol-relative (`//cdn.weatherapi.com/...`).
fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") { format!("https:{icon}") } else { icon.to_string() }
}

fn malformed(section: &str) -> PresentationError {
    warn!(section, "forecast payload missing or malformed");
    PresentationError::ProviderUnavailable
}
