//! Seams to the external geocoding and forecast services.
//!
//! Providers only move bytes and decode them into the loosely-typed wire
//! shapes below. Presence and numeric checks happen once, in the fetcher and
//! resolver, never inside a provider.

use crate::{Config, model::CoordinateQuery, provider::open_meteo::OpenMeteoClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Debug;

pub mod open_meteo;

/// One ranked geocoding candidate as the provider reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeCandidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Forecast response. Every field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current: Option<CurrentConditions>,
}

/// The "current" block. Numeric fields are kept raw so the fetcher can
/// coerce them and reject anything that is not a usable number.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature_2m: Option<Value>,
    #[serde(default)]
    pub apparent_temperature: Option<Value>,
    #[serde(default)]
    pub wind_speed_10m: Option<Value>,
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync + Debug {
    /// Look up a place by name, optionally narrowed to an ISO country code.
    /// Returns at most one candidate; an empty list means no match.
    async fn search_place(
        &self,
        name: &str,
        country_code: Option<&str>,
    ) -> anyhow::Result<Vec<GeocodeCandidate>>;
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Current temperature, apparent temperature and wind speed at a point,
    /// with the provider resolving the local timezone.
    async fn current_conditions(&self, point: &CoordinateQuery) -> anyhow::Result<ForecastPayload>;
}

/// Build the Open-Meteo client described by `config`.
pub fn open_meteo_from_config(config: &Config) -> anyhow::Result<OpenMeteoClient> {
    OpenMeteoClient::from_config(config)
}
