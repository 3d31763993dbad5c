//! Core library for the `meteo` weather client.
//!
//! This crate defines:
//! - Input validation for coordinate and city searches
//! - Location resolution and forecast lookup behind provider traits
//! - Normalization of provider payloads into one [`WeatherReading`]
//! - The search orchestrator, configuration and a last-result store
//!
//! It is used by `meteo-cli`, but can also be reused by other front ends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod search;
pub mod store;
pub mod validate;

pub use config::Config;
pub use error::{SearchError, ValidationError};
pub use model::{CityQuery, CoordinateQuery, GeocodeMatch, SearchMode, SearchRequest, WeatherReading};
pub use provider::{ForecastProvider, GeocodingProvider, open_meteo::OpenMeteoClient};
pub use search::SearchOrchestrator;
pub use store::{FileResultStore, MemoryResultStore, ResultStore};
