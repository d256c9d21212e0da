use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Text};
use skyglass_core::{
    Config, Coordinates, FixedPosition, LocationService, NoLocationService, WeatherApp,
    provider_from_config,
};
use tracing::debug;

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyglass", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Log request flow to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the fallback city.
    Configure,

    /// Show the weather once and exit.
    Show {
        /// Search this city instead of resolving the current location.
        #[arg(long)]
        city: Option<String>,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show the weather for the current location, then prompt for city searches.
    Interactive {
        #[command(flatten)]
        location: LocationArgs,
    },
}

/// Where the current position comes from.
#[derive(Debug, Clone, Args)]
pub struct LocationArgs {
    /// Latitude of the current position.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Act as if no location service were available.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub no_locate: bool,
}

impl LocationArgs {
    /// Flags first, then the position from config; otherwise none.
    fn service(&self, config: &Config) -> Box<dyn LocationService> {
        if self.no_locate {
            return Box::new(NoLocationService);
        }

        match (self.lat, self.lon, config.location) {
            (Some(lat), Some(lon), _) => Box::new(FixedPosition(Coordinates::new(lat, lon))),
            (_, _, Some(coords)) => Box::new(FixedPosition(coords)),
            _ => Box::new(NoLocationService),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, location } => show(city, &location).await,
            Command::Interactive { location } => interactive(&location).await,
        }
    }
}

fn build_app(config: &Config) -> anyhow::Result<WeatherApp> {
    let provider = provider_from_config(config)?;
    debug!(base_url = config.base_url(), "Using OpenWeather provider");
    Ok(WeatherApp::new(provider, config.default_city()))
}

async fn show(city: Option<String>, location: &LocationArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut app = build_app(&config)?;

    match city {
        Some(city) => {
            app.set_search_input(city);
            if !app.submit_search() {
                anyhow::bail!("City name must not be empty");
            }
        }
        None => app.mount(location.service(&config).as_ref()).await,
    }

    app.settle().await;
    print!("{}", view::render(app.state()));
    Ok(())
}

async fn interactive(location: &LocationArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut app = build_app(&config)?;

    app.mount(location.service(&config).as_ref()).await;
    app.settle().await;
    print!("{}", view::render(app.state()));

    loop {
        let answer = Text::new("Enter city name")
            .with_initial_value(app.state().search().input())
            .with_help_message("Esc to quit")
            .prompt();

        match answer {
            Ok(input) => {
                app.set_search_input(input);
                // Blank submissions are ignored without a message.
                if app.submit_search() {
                    app.settle().await;
                    println!();
                    print!("{}", view::render(app.state()));
                }
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search input"),
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    // Stored values only; an env override must not end up on disk.
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let city = Text::new("Fallback city:")
        .with_default(config.default_city())
        .prompt()?;
    config.default_city = Some(city.trim().to_string());

    let fixed = Confirm::new("Use a fixed position as your location?")
        .with_default(config.location.is_some())
        .prompt()?;
    config.location = if fixed {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a decimal number")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a decimal number")
            .prompt()?;
        Some(Coordinates::new(latitude, longitude))
    } else {
        None
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
