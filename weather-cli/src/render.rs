use std::fmt::Write;

use weatherdash_core::display::{ChartView, DashboardView};

/// Plain-text dashboard.
pub fn human(view: &DashboardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🌍 LIVE WEATHER DASHBOARD");
    let _ = writeln!(out, "### {}", view.heading);
    if !view.icon_url.is_empty() {
        let _ = writeln!(out, "icon: {}", view.icon_url);
    }
    out.push('\n');

    let marker = if view.alerts.triggered { "!" } else { "i" };
    for line in &view.alerts.lines {
        let _ = writeln!(out, "[{marker}] {line}");
    }
    out.push('\n');

    for record in &view.current {
        let emoji = record.emoji.as_deref().map(|e| format!("{e} ")).unwrap_or_default();
        let label = format!("{emoji}{}:", record.label);
        let _ = writeln!(out, "  {label:<18} {}", record.value);
    }
    out.push('\n');

    chart(&mut out, &view.daily);
    chart(&mut out, &view.hourly);

    let pin = &view.map;
    let _ = writeln!(
        out,
        "🌍 Map pin: {:.4}, {:.4} (zoom {}, pitch {})",
        pin.position.latitude, pin.position.longitude, pin.zoom, pin.pitch
    );

    out
}

fn chart(out: &mut String, chart: &ChartView) {
    let _ = writeln!(out, "{}", chart.title);
    if chart.bars.is_empty() {
        let _ = writeln!(out, "  (no data)");
    }

    let width = chart.bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    for bar in &chart.bars {
        let pad = width - bar.label.chars().count();
        let condition = bar.hover_text.lines().nth(1).unwrap_or(&bar.hover_text);
        let emoji = if bar.label.contains(&bar.emoji) { "" } else { bar.emoji.as_str() };
        let _ = writeln!(
            out,
            "  {}{}  {:>6.1} °C  {emoji} {condition}",
            bar.label,
            " ".repeat(pad),
            bar.value,
        );
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherdash_core::{
        Alert, AlertResult, Coordinate, Forecast, ForecastSnapshot, LocationQuery, Theme,
    };

    fn forecast(alerts: AlertResult) -> Forecast {
        Forecast {
            query: LocationQuery::place("Shimla, Himachal Pradesh"),
            snapshot: ForecastSnapshot {
                location_name: "Shimla".into(),
                country: "India".into(),
                location: Coordinate::new(31.1, 77.17),
                temperature_c: 32.0,
                wind_kph: 14.4,
                humidity_pct: 35,
                condition: "Sunny".into(),
                icon_url: "https://cdn/113.png".into(),
                sunrise: "05:58 AM".into(),
                sunset: "07:02 PM".into(),
            },
            daily: Vec::new(),
            hourly: Vec::new(),
            alerts,
        }
    }

    #[test]
    fn human_output_lists_records_alerts_and_pin() {
        let alerts = AlertResult::new(vec![Alert::Temperature { observed_c: 32.0, ceiling_c: 30.0 }]);
        let view = DashboardView::build(&forecast(alerts), Theme::Light);
        let text = human(&view);

        assert!(text.contains("### 📍 Shimla, India"));
        assert!(text.contains("[!] 🚨 Temperature Alert: 32°C is above 30°C!"));
        assert!(text.contains("TEMPERATURE:"));
        assert!(text.contains("32 °C"));
        assert!(text.contains("7-Day Weather Forecast for Shimla"));
        assert!(text.contains("(no data)"));
        assert!(text.contains("Map pin: 31.1000, 77.1700"));
    }

    #[test]
    fn quiet_dashboard_shows_info_line() {
        let view = DashboardView::build(&forecast(AlertResult::default()), Theme::Dark);
        assert!(human(&view).contains("[i] No custom alerts triggered."));
    }
}
