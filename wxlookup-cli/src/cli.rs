use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use wxlookup_core::{
    Card, Config, FileStore, MemoryStore, SearchOutcome, TemperatureUnit,
    WeatherProvider, Widget, preference, provider::provider_from_config,
    provider::weatherapi::DEFAULT_BASE_URL,
};

use crate::repl;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxlookup", version, about = "Weather lookup widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key.
    Configure,

    /// Show current weather for a city and exit.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,
    },

    /// Run the interactive widget (the default).
    Interactive {
        /// Keep the unit preference in memory only.
        #[arg(long)]
        no_persist: bool,
    },

    /// Print the persisted temperature unit, or set it.
    Unit {
        /// "celsius" or "fahrenheit" (or "c" / "f").
        unit: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive { no_persist: false }) {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::Interactive { no_persist } => {
                let provider = load_provider()?;
                if no_persist {
                    repl::run(Widget::new(provider, MemoryStore::new())).await
                } else {
                    repl::run(Widget::new(provider, open_store()?)).await
                }
            }
            Command::Unit { unit } => set_or_print_unit(unit.as_deref()),
        }
    }
}

fn load_provider() -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let config = Config::load()?;
    Ok(Arc::from(provider_from_config(&config)?))
}

fn open_store() -> anyhow::Result<FileStore> {
    let path = Config::preferences_file_path()?;
    tracing::debug!(path = %path.display(), "Opening preference store");
    FileStore::open(path)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let base_url = inquire::Text::new("API base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;

    config.set_api_key(api_key.trim().to_string());
    config.base_url = (base_url != DEFAULT_BASE_URL).then_some(base_url);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let mut widget = Widget::new(load_provider()?, open_store()?);

    widget.set_input(city);
    match widget.submit_search().await {
        Some(SearchOutcome::Applied) => {
            if let Some(snapshot) = widget.snapshot() {
                print!("{}", Card { snapshot, unit: widget.unit() });
            }
            Ok(())
        }
        Some(SearchOutcome::Failed(err)) => Err(err.into()),
        Some(SearchOutcome::Stale) | None => Err(anyhow::anyhow!("City name must not be empty")),
    }
}

fn set_or_print_unit(unit: Option<&str>) -> anyhow::Result<()> {
    let mut store = open_store()?;

    match unit {
        Some(raw) => {
            let unit = TemperatureUnit::try_from(raw)?;
            preference::save_unit(&mut store, unit)?;
            println!("Temperature unit set to {unit} ({})", store.path().display());
        }
        None => println!("{}", preference::load_unit(&store)),
    }

    Ok(())
}
