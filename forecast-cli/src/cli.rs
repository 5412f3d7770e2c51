use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, Coordinates, FancyForecastHandler, Forecast, ForecastHandler, ProviderId, Registry,
};
use inquire::{CustomType, Select};
use std::io::{self, Write};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Hourly temperature forecasts")]
pub struct Cli {
    /// Without a subcommand: list providers and fetch the forecast for the configured location.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the registered forecast providers.
    Providers,

    /// Fetch a single forecast.
    Show {
        /// Provider name, "live" or "mock". Defaults to the configured provider.
        #[arg(long, short)]
        provider: Option<String>,

        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        /// Log through the fancy handler before fetching.
        #[arg(long)]
        fancy: bool,

        /// Print an hourly table instead of the raw JSON body.
        #[arg(long)]
        hourly: bool,
    },

    /// Choose the default provider and location interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let registry = Registry::builtin();

        match self.command {
            None => run_default(&config, &registry, &mut io::stdout().lock()).await,
            Some(Command::Providers) => print_providers(&registry, &mut io::stdout().lock()),
            Some(Command::Show { provider, lat, lon, fancy, hourly }) => {
                let name = match provider {
                    Some(name) => name,
                    None => config.default_provider_id()?.to_string(),
                };
                let coordinates = match (lat, lon) {
                    (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
                    _ => config.coordinates(),
                };

                let source = registry.select(&name)?;
                let forecast = if fancy {
                    FancyForecastHandler::new(source).fancy_get_forecast(coordinates).await?
                } else {
                    ForecastHandler::new(source).get_forecast(coordinates).await?
                };

                if hourly {
                    print_hourly(&forecast)
                } else {
                    println!("{forecast}");
                    Ok(())
                }
            }
            Some(Command::Configure) => configure(config),
        }
    }
}

async fn run_default(config: &Config, registry: &Registry, out: &mut impl Write) -> Result<()> {
    print_providers(registry, out)?;

    let id = config.default_provider_id()?;
    let source = registry.select(id.as_str())?;
    let handler = ForecastHandler::new(source);

    writeln!(out, "Fetching weather forecast...")?;
    let forecast = handler
        .get_forecast(config.coordinates())
        .await
        .with_context(|| format!("Failed to fetch forecast from provider '{id}'"))?;
    writeln!(out, "Weather forecast: {forecast}")?;

    Ok(())
}

fn print_providers(registry: &Registry, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Available weather data providers:")?;
    for id in registry.ids() {
        writeln!(out, "- {}", id.display_name())?;
    }
    Ok(())
}

fn print_hourly(forecast: &Forecast) -> Result<()> {
    let series = forecast.hourly_temperatures()?;
    if series.is_empty() {
        println!("No hourly data.");
        return Ok(());
    }

    let unit = forecast.temperature_unit().unwrap_or("°C");
    for entry in series {
        println!("{}  {:>6.1} {unit}", entry.time.format("%a %Y-%m-%d %H:%M"), entry.temperature);
    }

    Ok(())
}

fn configure(mut config: Config) -> Result<()> {
    let current = config.default_provider_id().unwrap_or(ProviderId::Live);
    let options = ProviderId::all().to_vec();
    let start = options.iter().position(|id| *id == current).unwrap_or(0);

    let provider = Select::new("Default provider:", options)
        .with_starting_cursor(start)
        .prompt()
        .context("Provider selection aborted")?;

    let location = config.coordinates();
    let latitude = CustomType::<f64>::new("Latitude:")
        .with_default(location.latitude)
        .with_error_message("Please type a number, e.g. 41.85")
        .prompt()
        .context("Latitude input aborted")?;
    let longitude = CustomType::<f64>::new("Longitude:")
        .with_default(location.longitude)
        .with_error_message("Please type a number, e.g. -87.65")
        .prompt()
        .context("Longitude input aborted")?;

    config.set_default_provider(provider);
    config.set_location(Coordinates::new(latitude, longitude));
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
