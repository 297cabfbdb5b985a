use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::debug;
use weatherdash_core::{
    AlertConfig, Config, DashboardView, ForecastPresenter, ResolutionError, Theme,
    provider::{forecast_source_from_config, geocoder_from_config},
    resolve,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Live weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively store the weatherapi.com key and default region.
    Configure,

    /// Print the location of the config file.
    ConfigPath,

    /// Show the dashboard for a place or a coordinate pair.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Place name. Single words get the configured default region appended.
    #[arg(long, default_value = "")]
    pub city: String,

    /// Latitude; used together with --lon instead of --city.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude; used together with --lat instead of --city.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub lon: String,

    #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
    pub theme: ThemeArg,

    /// Skip alert evaluation.
    #[arg(long)]
    pub no_alerts: bool,

    /// Alert if temperature exceeds this many °C.
    #[arg(
        long,
        default_value_t = 30,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i64).range(-50..=50)
    )]
    pub temp_ceiling: i64,

    /// Alert if wind speed exceeds this many km/h.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(i64).range(0..=200))]
    pub wind_ceiling: i64,

    /// Alert if rain is detected in the current conditions.
    #[arg(long)]
    pub rain_alert: bool,

    /// Print the dashboard as JSON.
    #[arg(long)]
    pub json: bool,

    /// weatherapi.com key; overrides the stored one.
    #[arg(long, env = "WEATHERAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

impl ShowArgs {
    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig {
            enabled: !self.no_alerts,
            temp_ceiling_c: self.temp_ceiling as f64,
            wind_ceiling_kph: self.wind_ceiling as f64,
            rain: self.rain_alert,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
            Command::Show(args) => show(args).await,
        }
    }
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    let config = Config::load()?;

    // Input problems are reported before any network client is built.
    let query = resolve(&args.city, &args.lat, &args.lon, &config.resolver)?;
    debug!(%query, "resolved location");

    let presenter = ForecastPresenter::new(
        forecast_source_from_config(&config, args.api_key.as_deref())?,
        geocoder_from_config(&config)?,
    );

    let forecast = presenter.present(query, &args.alert_config()).await?;
    let view = DashboardView::build(&forecast, args.theme.into());

    if args.json {
        let json =
            serde_json::to_string_pretty(&view).context("Failed to serialize dashboard to JSON")?;
        println!("{json}");
    } else {
        print!("{}", render::human(&view));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("weatherapi.com API key (leave empty to keep current):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    if !key.trim().is_empty() {
        config.set_api_key(key);
    }

    let region = Text::new("Region appended to single-word places (empty disables):")
        .with_default(&config.resolver.default_region)
        .prompt()
        .context("Failed to read default region")?;
    config.resolver.default_region = region.trim().to_string();

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// `2` for bad input, `1` for everything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ResolutionError>() {
        Some(ResolutionError::InvalidCoordinates | ResolutionError::NoInputProvided) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherdash_core::PresentationError;

    fn show_args(argv: &[&str]) -> ShowArgs {
        let mut full = vec!["weatherdash", "show"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Show(args) => args,
            other => panic!("expected show, got {other:?}"),
        }
    }

    #[test]
    fn show_defaults_match_dashboard_defaults() {
        let args = show_args(&["--city", "Shimla"]);

        assert_eq!(args.city, "Shimla");
        assert_eq!(args.lat, "");
        assert_eq!(args.theme, ThemeArg::Light);
        assert_eq!(args.alert_config(), AlertConfig::default());
        assert!(!args.json);
    }

    #[test]
    fn negative_coordinates_and_ceilings_parse() {
        let args = show_args(&["--lat", "-33.86", "--lon", "151.2", "--temp-ceiling", "-5"]);

        assert_eq!(args.lat, "-33.86");
        assert_eq!(args.lon, "151.2");
        assert_eq!(args.alert_config().temp_ceiling_c, -5.0);
    }

    #[test]
    fn alert_flags_map_into_config() {
        let args = show_args(&[
            "--city", "Manali", "--no-alerts", "--rain-alert", "--wind-ceiling", "120",
            "--theme", "dark",
        ]);
        let cfg = args.alert_config();

        assert!(!cfg.enabled);
        assert!(cfg.rain);
        assert_eq!(cfg.wind_ceiling_kph, 120.0);
        assert_eq!(Theme::from(args.theme), Theme::Dark);
    }

    #[test]
    fn ceilings_outside_range_are_rejected() {
        assert!(Cli::try_parse_from(["weatherdash", "show", "--temp-ceiling", "51"]).is_err());
        assert!(Cli::try_parse_from(["weatherdash", "show", "--temp-ceiling", "-51"]).is_err());
        assert!(Cli::try_parse_from(["weatherdash", "show", "--wind-ceiling", "201"]).is_err());
    }

    #[test]
    fn input_errors_exit_with_two() {
        assert_eq!(exit_code(&ResolutionError::NoInputProvided.into()), 2);
        assert_eq!(exit_code(&ResolutionError::InvalidCoordinates.into()), 2);
        assert_eq!(exit_code(&PresentationError::LocationNotFound.into()), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("config broke")), 1);
    }
}
