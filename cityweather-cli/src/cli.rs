use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, Text};

use cityweather_core::{
    Config, ConfiguredLocation, HomeLocation, WeatherViewModel, api::api_from_config,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Terminal weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and optional home coordinates.
    Configure,

    /// Show weather for a city and exit.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city).await,
            None => interactive().await,
        }
    }
}

/// Wire config, API client, geolocation and view together. Credential
/// problems surface here, before anything is rendered.
fn build_viewmodel() -> anyhow::Result<WeatherViewModel> {
    let config = Config::load()?;
    let api = api_from_config(&config)?;
    let geolocation = Box::new(ConfiguredLocation::from_config(&config));

    let vm = WeatherViewModel::new(api, geolocation);
    view::attach(&vm);
    Ok(vm)
}

async fn show(city: &str) -> anyhow::Result<()> {
    let vm = build_viewmodel()?;
    vm.submit_city_query(city).await;
    Ok(())
}

/// The widget proper: seed from the configured location once, then loop the
/// city prompt until the user cancels.
async fn interactive() -> anyhow::Result<()> {
    let vm = build_viewmodel()?;
    vm.use_location_weather().await;

    loop {
        match Text::new("City name:").prompt() {
            Ok(input) => vm.submit_city_query(&input).await,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city input"),
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_owned());

    let record_home = Confirm::new("Record home coordinates for location-based weather?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Failed to read confirmation")?;

    if record_home {
        let latitude = CustomType::<f64>::new("Latitude:")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .prompt()
            .context("Failed to read longitude")?;
        config.set_home(Some(HomeLocation { latitude, longitude }));
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
