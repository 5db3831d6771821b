use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use forecast_core::{Config, Forecast, ProviderId, provider_for};
use inquire::{CustomType, Select, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose the forecast source and store it in the config file.
    Configure,

    /// Show the forecast for the days after a start date.
    Show {
        /// Start date (YYYY-MM-DD); defaults to today.
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// Override the configured source: "local" or "remote".
        #[arg(long)]
        source: Option<String>,

        /// Override the remote base URL, e.g. "http://127.0.0.1:3000/".
        #[arg(long)]
        base_url: Option<String>,

        /// Override the local generator seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Also print the Kelvin factor of each day.
        #[arg(long)]
        details: bool,
    },

    /// Print the location of the config file.
    ConfigPath,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { start, source, base_url, seed, details } => {
                let mut config = Config::load()?;
                apply_overrides(&mut config, source.as_deref(), base_url, seed)?;

                let start = start.unwrap_or_else(|| Local::now().date_naive());
                show(&config, start, details).await
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

/// Layer command-line flags over the stored config. A base URL alone implies
/// the remote source.
fn apply_overrides(
    config: &mut Config,
    source: Option<&str>,
    base_url: Option<String>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if let Some(url) = base_url {
        config.set_remote_base_url(url);
        config.set_source(ProviderId::Remote);
    }
    if let Some(source) = source {
        config.set_source(ProviderId::try_from(source)?);
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(())
}

async fn show(config: &Config, start: NaiveDate, details: bool) -> anyhow::Result<()> {
    let id = config.source_id()?;
    let provider = provider_for(id, config)?;
    tracing::debug!(source = %id, %start, "requesting forecast");

    let forecasts = provider
        .get_forecasts(start)
        .await
        .with_context(|| format!("Failed to get forecast from {id} source"))?;

    for forecast in &forecasts {
        println!("{}", render(forecast, details));
    }

    Ok(())
}

fn render(forecast: &Forecast, details: bool) -> String {
    if !details {
        return forecast.to_string();
    }

    let factor = forecast
        .kelvin_factor()
        .map_or_else(|| "n/a".to_string(), |k| format!("{k:.3}"));
    format!("{forecast}  kelvin factor: {factor}")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let current = config.source_id().unwrap_or(ProviderId::Local);
    let starting = ProviderId::all().iter().position(|id| *id == current).unwrap_or(0);

    let source = Select::new("Forecast source:", ProviderId::all().to_vec())
        .with_starting_cursor(starting)
        .prompt()?;
    config.set_source(source);

    match source {
        ProviderId::Remote => {
            let default_url =
                config.remote_base_url().unwrap_or("http://127.0.0.1:3000/").to_string();
            let url = Text::new("Forecast server base URL:").with_default(&default_url).prompt()?;
            config.set_remote_base_url(url);
        }
        ProviderId::Local => {
            config.seed = CustomType::<u64>::new("Generator seed:")
                .with_default(config.seed)
                .with_error_message("Please enter a non-negative integer")
                .prompt()?;
        }
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
