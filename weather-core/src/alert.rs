use crate::model::{Alert, AlertConfig, AlertResult, ForecastSnapshot};

/// Compare current conditions against the user's thresholds.
///
/// Both ceilings are strict: a reading equal to the ceiling does not alert.
pub fn evaluate(snapshot: &ForecastSnapshot, config: &AlertConfig) -> AlertResult {
    if !config.enabled {
        return AlertResult::default();
    }

    let mut alerts = Vec::new();

    if snapshot.temperature_c > config.temp_ceiling_c {
        alerts.push(Alert::Temperature {
            observed_c: snapshot.temperature_c,
            ceiling_c: config.temp_ceiling_c,
        });
    }

    if snapshot.wind_kph > config.wind_ceiling_kph {
        alerts.push(Alert::WindSpeed {
            observed_kph: snapshot.wind_kph,
            ceiling_kph: config.wind_ceiling_kph,
        });
    }

    if config.rain && snapshot.condition.to_lowercase().contains("rain") {
        alerts.push(Alert::Rain);
    }

    AlertResult::new(alerts)
}
