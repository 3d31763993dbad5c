use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use meteo_core::{
    Config, FileResultStore, ResultStore, SearchOrchestrator, SearchRequest, catalog,
    provider::open_meteo::{DEFAULT_FORECAST_ENDPOINT, DEFAULT_GEOCODING_ENDPOINT, DEFAULT_LANGUAGE},
};
use tracing::warn;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current weather by coordinates or city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure provider endpoints, language and timeout.
    Configure,

    /// Show current weather at a coordinate pair.
    #[command(allow_negative_numbers = true)]
    Coords {
        /// Latitude in degrees, -90..=90.
        latitude: f64,
        /// Longitude in degrees, -180..=180.
        longitude: f64,
    },

    /// Show current weather for a city. Missing values are asked for.
    City {
        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        city: Option<String>,
    },

    /// Show the last successful result.
    Last {
        /// Run the saved search again instead of showing the saved result.
        #[arg(long)]
        refresh: bool,
    },

    /// Forget the saved search and result.
    Clear,

    /// List the selectable countries and cities.
    Locations,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Coords { latitude, longitude } => {
                search_and_store(SearchRequest::coordinates(latitude, longitude)).await?
            }
            Command::City { country, city } => {
                let request = prompt_city(country, city)?;
                search_and_store(request).await?
            }
            Command::Last { refresh } => show_last(refresh).await?,
            Command::Clear => {
                let mut store = FileResultStore::open_default()?;
                store.clear()?;
                println!("Saved search cleared ({}).", store.path().display());
            }
            Command::Locations => println!("{}", render::locations(catalog::SUPPORTED_LOCATIONS)),
        }

        Ok(())
    }
}

async fn search_and_store(request: SearchRequest) -> anyhow::Result<()> {
    let config = Config::load()?;
    let orchestrator = SearchOrchestrator::from_config(&config)?;

    let reading = orchestrator.search(&request).await.map_err(|err| anyhow!(render::failure(&err)))?;

    println!("{}", render::reading(&reading));

    // A failed write must not hide a good reading.
    match FileResultStore::open_default() {
        Ok(mut store) => {
            if let Err(err) = store.set_last(&request, &reading) {
                warn!(error = %err, "could not save last search");
            }
        }
        Err(err) => warn!(error = %err, "no data directory for last search"),
    }

    Ok(())
}

async fn show_last(refresh: bool) -> anyhow::Result<()> {
    let store = FileResultStore::open_default()?;

    if refresh {
        let Some(request) = store.last_search()? else {
            bail!("No saved search yet.\nHint: run `meteo coords` or `meteo city` first.");
        };
        return search_and_store(request).await;
    }

    match store.last_result()? {
        Some(reading) => println!("{}", render::reading(&reading)),
        None => println!("No saved result yet."),
    }
    Ok(())
}

/// Fill in whatever the user left out, offering catalog entries first.
fn prompt_city(country: Option<String>, city: Option<String>) -> anyhow::Result<SearchRequest> {
    let country = match country {
        Some(c) => c,
        None => {
            let options: Vec<&str> = catalog::SUPPORTED_LOCATIONS.iter().map(|l| l.country).collect();
            Select::new("Country:", options).prompt()?.to_string()
        }
    };

    let city = match city {
        Some(c) => c,
        None => match catalog::find_country(&country) {
            Some(loc) => Select::new("City:", loc.cities.to_vec()).prompt()?.to_string(),
            None => Text::new("City:").prompt()?,
        },
    };

    Ok(SearchRequest::city(country, city))
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load_file()?;

    let forecast = Text::new("Forecast endpoint:").with_default(cfg.forecast_endpoint()).prompt()?;
    let geocoding = Text::new("Geocoding endpoint:").with_default(cfg.geocoding_endpoint()).prompt()?;
    let language = Text::new("Place name language:").with_default(cfg.language()).prompt()?;
    let timeout = Text::new("Request timeout in seconds (empty for none):")
        .with_default(&cfg.request_timeout_secs.map(|s| s.to_string()).unwrap_or_default())
        .prompt()?;

    cfg.forecast_endpoint = non_default(forecast, DEFAULT_FORECAST_ENDPOINT);
    cfg.geocoding_endpoint = non_default(geocoding, DEFAULT_GEOCODING_ENDPOINT);
    cfg.language = non_default(language, DEFAULT_LANGUAGE);
    cfg.request_timeout_secs = match timeout.trim() {
        "" => None,
        t => Some(t.parse::<u64>().with_context(|| format!("Invalid timeout '{t}'"))?),
    };

    cfg.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn non_default(value: String, default: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != default).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_accept_negative_numbers() {
        let cli = Cli::try_parse_from(["meteo", "coords", "-33.8688", "-151.2093"]).unwrap();
        match cli.command {
            Command::Coords { latitude, longitude } => {
                assert_eq!((latitude, longitude), (-33.8688, -151.2093));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn coords_reject_non_numbers() {
        assert!(Cli::try_parse_from(["meteo", "coords", "north", "0"]).is_err());
    }

    #[test]
    fn city_flags_are_optional() {
        let cli = Cli::try_parse_from(["meteo", "city", "--country", "Spain"]).unwrap();
        match cli.command {
            Command::City { country, city } => {
                assert_eq!(country.as_deref(), Some("Spain"));
                assert!(city.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn prompt_city_skips_prompts_when_complete() {
        let req = prompt_city(Some("Kazakhstan".into()), Some("Astana".into())).unwrap();
        assert_eq!(req, SearchRequest::city("Kazakhstan", "Astana"));
    }

    #[test]
    fn non_default_drops_defaults_and_blanks() {
        assert_eq!(non_default("en".into(), "en"), None);
        assert_eq!(non_default("  ".into(), "en"), None);
        assert_eq!(non_default(" de ".into(), "en"), Some("de".into()));
    }
}
