//! Display-ready records for a rendering layer.
//!
//! Nothing here fetches or decides anything; it only labels and colours the
//! [`Forecast`] the presenter produced.

use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, Forecast, LocationQuery};

pub const NO_ALERTS_MESSAGE: &str = "No custom alerts triggered.";

const DAILY_BAR_COLOR: &str = "rgba(0, 191, 255, 0.6)";
const HOURLY_BAR_COLOR: &str = "rgba(255, 165, 0, 0.7)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colours for one theme. Only label colours differ between themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub panel: &'static str,
    pub label: &'static str,
    pub temperature: &'static str,
    pub condition: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
}

impl Theme {
    pub fn palette(self) -> Palette {
        let (background, panel, label) = match self {
            Theme::Light => ("#f4f6f8", "#ffffff", "#333333"),
            Theme::Dark => ("#2c3e50", "#34495e", "#ecf0f1"),
        };
        Palette {
            background,
            panel,
            label,
            temperature: "#e67300",
            condition: "#0099cc",
            humidity: "#33cc33",
            wind: "#6666ff",
        }
    }
}

/// A labelled value with an optional emoji and a display colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub label: String,
    pub value: String,
    pub emoji: Option<String>,
    pub color: String,
}

impl DisplayRecord {
    fn new(label: &str, value: String, emoji: Option<&str>, color: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            emoji: emoji.map(str::to_string),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub hover_text: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub bar_color: String,
    pub bars: Vec<ChartBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPin {
    pub position: Coordinate,
    pub zoom: u8,
    pub pitch: u8,
    pub radius_m: u32,
    pub fill_rgb: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertBanner {
    pub triggered: bool,
    pub lines: Vec<String>,
}

/// The whole dashboard for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub theme: Theme,
    pub heading: String,
    pub icon_url: String,
    pub alerts: AlertBanner,
    pub current: Vec<DisplayRecord>,
    pub daily: ChartView,
    pub hourly: ChartView,
    pub map: MapPin,
}

impl DashboardView {
    pub fn build(forecast: &Forecast, theme: Theme) -> Self {
        let palette = theme.palette();
        let snap = &forecast.snapshot;

        Self {
            theme,
            heading: format!("📍 {}, {}", snap.location_name, snap.country),
            icon_url: snap.icon_url.clone(),
            alerts: alert_banner(forecast),
            current: current_records(forecast, &palette),
            daily: daily_chart(forecast),
            hourly: hourly_chart(forecast),
            map: map_pin(forecast),
        }
    }
}

fn alert_banner(forecast: &Forecast) -> AlertBanner {
    if forecast.alerts.is_empty() {
        AlertBanner { triggered: false, lines: vec![NO_ALERTS_MESSAGE.to_string()] }
    } else {
        AlertBanner { triggered: true, lines: forecast.alerts.messages() }
    }
}

fn current_records(forecast: &Forecast, palette: &Palette) -> Vec<DisplayRecord> {
    let snap = &forecast.snapshot;
    vec![
        DisplayRecord::new("CONDITION", snap.condition.clone(), None, palette.condition),
        DisplayRecord::new(
            "TEMPERATURE",
            format!("{} °C", snap.temperature_c),
            Some("🌡️"),
            palette.temperature,
        ),
        DisplayRecord::new(
            "HUMIDITY",
            format!("{}%", snap.humidity_pct),
            Some("💧"),
            palette.humidity,
        ),
        DisplayRecord::new("WIND SPEED", format!("{} km/h", snap.wind_kph), Some("💨"), palette.wind),
        DisplayRecord::new("SUNRISE", snap.sunrise.clone(), Some("🌅"), palette.label),
        DisplayRecord::new("SUNSET", snap.sunset.clone(), Some("🌇"), palette.label),
    ]
}

fn daily_chart(forecast: &Forecast) -> ChartView {
    let bars = forecast
        .daily
        .iter()
        .map(|day| ChartBar {
            label: format!("{} ({}) {}", day.date.format("%Y-%m-%d"), day.weekday, day.emoji),
            value: day.avg_temp_c,
            hover_text: day.condition.clone(),
            emoji: day.emoji.to_string(),
        })
        .collect();

    ChartView {
        title: format!("7-Day Weather Forecast for {}", forecast.snapshot.location_name),
        x_axis: "Day".to_string(),
        y_axis: "Avg Temp (°C)".to_string(),
        bar_color: DAILY_BAR_COLOR.to_string(),
        bars,
    }
}

fn hourly_chart(forecast: &Forecast) -> ChartView {
    let bars = forecast
        .hourly
        .iter()
        .map(|hour| ChartBar {
            label: hour.label.clone(),
            value: hour.temp_c,
            hover_text: format!("{}\n{}\n{}", hour.label, hour.condition, hour.emoji),
            emoji: hour.emoji.to_string(),
        })
        .collect();

    ChartView {
        title: "12-Hour Temperature Forecast".to_string(),
        x_axis: "Time".to_string(),
        y_axis: "Temperature (°C)".to_string(),
        bar_color: HOURLY_BAR_COLOR.to_string(),
        bars,
    }
}

/// The user's own coordinates when they typed some, otherwise where the
/// provider placed the location.
fn map_pin(forecast: &Forecast) -> MapPin {
    let position = match &forecast.query {
        LocationQuery::Coordinates(coord) => *coord,
        LocationQuery::Place { .. } => forecast.snapshot.location,
    };

    MapPin { position, zoom: 10, pitch: 45, radius_m: 10_000, fill_rgb: [255, 0, 0] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Alert, AlertResult, DailyForecastPoint, ForecastSnapshot, HourlyForecastPoint,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn forecast(query: LocationQuery, alerts: AlertResult) -> Forecast {
        let date = NaiveDate::from_ymd_opt(2025, 4, 19).unwrap();
        let time = NaiveDateTime::parse_from_str("2025-04-19 14:00", "%Y-%m-%d %H:%M").unwrap();

        Forecast {
            query,
            snapshot: ForecastSnapshot {
                location_name: "Shimla".into(),
                country: "India".into(),
                location: Coordinate::new(31.1, 77.17),
                temperature_c: 32.0,
                wind_kph: 11.5,
                humidity_pct: 40,
                condition: "Sunny".into(),
                icon_url: "https://cdn/113.png".into(),
                sunrise: "05:58 AM".into(),
                sunset: "07:02 PM".into(),
            },
            daily: vec![DailyForecastPoint {
                date,
                weekday: "Saturday".into(),
                avg_temp_c: 18.4,
                condition: "Sunny".into(),
                emoji: "☀️",
            }],
            hourly: vec![HourlyForecastPoint {
                time,
                label: "02 PM".into(),
                temp_c: 24.0,
                condition: "Light rain".into(),
                emoji: "🌧️",
            }],
            alerts,
        }
    }

    #[test]
    fn themes_only_change_neutral_colours() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();

        assert_eq!(light.label, "#333333");
        assert_eq!(dark.label, "#ecf0f1");
        assert_eq!(light.temperature, dark.temperature);
        assert_eq!(light.wind, "#6666ff");
    }

    #[test]
    fn current_records_are_labelled_and_coloured() {
        let view = DashboardView::build(&forecast(LocationQuery::place("Shimla"), AlertResult::default()), Theme::Dark);

        let labels: Vec<_> = view.current.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["CONDITION", "TEMPERATURE", "HUMIDITY", "WIND SPEED", "SUNRISE", "SUNSET"]);

        assert_eq!(view.current[1].value, "32 °C");
        assert_eq!(view.current[1].color, "#e67300");
        assert_eq!(view.current[2].value, "40%");
        assert_eq!(view.current[3].value, "11.5 km/h");
        assert_eq!(view.current[4].color, "#ecf0f1");
        assert_eq!(view.heading, "📍 Shimla, India");
    }

    #[test]
    fn charts_use_dashboard_labels() {
        let view = DashboardView::build(&forecast(LocationQuery::place("Shimla"), AlertResult::default()), Theme::Light);

        assert_eq!(view.daily.title, "7-Day Weather Forecast for Shimla");
        assert_eq!(view.daily.bars[0].label, "2025-04-19 (Saturday) ☀️");
        assert_eq!(view.daily.bars[0].hover_text, "Sunny");
        assert_eq!(view.hourly.bars[0].label, "02 PM");
        assert_eq!(view.hourly.bars[0].hover_text, "02 PM\nLight rain\n🌧️");
        assert_eq!(view.hourly.bar_color, "rgba(255, 165, 0, 0.7)");
    }

    #[test]
    fn banner_falls_back_to_info_line() {
        let quiet = DashboardView::build(&forecast(LocationQuery::place("Shimla"), AlertResult::default()), Theme::Light);
        assert!(!quiet.alerts.triggered);
        assert_eq!(quiet.alerts.lines, vec![NO_ALERTS_MESSAGE.to_string()]);

        let alerts = AlertResult::new(vec![Alert::Rain]);
        let loud = DashboardView::build(&forecast(LocationQuery::place("Shimla"), alerts), Theme::Light);
        assert!(loud.alerts.triggered);
        assert_eq!(loud.alerts.lines.len(), 1);
    }

    #[test]
    fn map_pin_prefers_user_coordinates() {
        let typed = Coordinate::new(31.2, 77.3);
        let view = DashboardView::build(
            &forecast(LocationQuery::Coordinates(typed), AlertResult::default()),
            Theme::Light,
        );
        assert_eq!(view.map.position, typed);

        let view = DashboardView::build(&forecast(LocationQuery::place("Shimla"), AlertResult::default()), Theme::Light);
        assert_eq!(view.map.position, Coordinate::new(31.1, 77.17));
        assert_eq!(view.map.zoom, 10);
        assert_eq!(view.map.fill_rgb, [255, 0, 0]);
    }
}
