use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use forecast_core::{Config, ForecastCache, ForecastService, Outcome};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Address-to-forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the forecast for an address.
    Show {
        /// Address or location name; multiple words are joined.
        #[arg(required = true)]
        address: Vec<String>,

        /// Override the configured forecast horizon (days, today included).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
        days: Option<u8>,
    },

    /// Interactively edit and save the configuration.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { address, days } => show(&address.join(" "), days).await,
            Command::Configure => configure(),
        }
    }
}

async fn show(address: &str, days: Option<u8>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(days) = days {
        config.forecast_days = days;
    }

    let cache = Arc::new(ForecastCache::new(config.cache_ttl()));
    let service = ForecastService::new(&config, cache);

    match service.handle(address).await {
        Outcome::InvalidAddress => bail!("Please provide a non-empty address."),
        Outcome::LocationNotFound => bail!(
            "No location found for {address:?}.\n\
             Hint: try a more specific address, e.g. a street plus a city name."
        ),
        Outcome::Unavailable(e) => {
            Err(e).context("The weather service is currently unavailable, try again later")
        }
        Outcome::Report(report) => {
            render::print_report(&report);
            Ok(())
        }
    }
}

fn configure() -> Result<()> {
    let config = Config::load()?;

    let forecast_days = inquire::CustomType::<u8>::new("Forecast horizon in days (1-16):")
        .with_default(config.forecast_days)
        .prompt()
        .context("Failed to read forecast horizon")?;

    if !(1..=16).contains(&forecast_days) {
        bail!("Forecast horizon must be between 1 and 16 days.");
    }

    let cache_ttl_minutes = inquire::CustomType::<u64>::new("Cache TTL in minutes:")
        .with_default(config.cache_ttl_minutes)
        .prompt()
        .context("Failed to read cache TTL")?;

    let updated = Config {
        forecast_days,
        cache_ttl_minutes,
    };
    updated.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}
