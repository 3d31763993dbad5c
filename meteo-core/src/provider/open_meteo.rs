use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    Config,
    model::CoordinateQuery,
    provider::{ForecastPayload, ForecastProvider, GeocodeCandidate, GeocodingProvider},
};

pub const DEFAULT_FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_LANGUAGE: &str = "en";

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,wind_speed_10m";

/// HTTP client for the Open-Meteo forecast and geocoding APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    forecast_url: String,
    geocoding_url: String,
    language: String,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_ENDPOINT, DEFAULT_GEOCODING_ENDPOINT)
    }
}

impl OpenMeteoClient {
    pub fn new(forecast_url: impl Into<String>, geocoding_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            forecast_url: config.forecast_endpoint().to_string(),
            geocoding_url: config.geocoding_endpoint().to_string(),
            language: config.language().to_string(),
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// GET `url` with `query`, returning the body of a successful response.
    async fn get_text(&self, url: &str, query: &[(&str, &str)], what: &str) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeCandidate>>,
}

#[async_trait]
impl GeocodingProvider for OpenMeteoClient {
    async fn search_place(
        &self,
        name: &str,
        country_code: Option<&str>,
    ) -> Result<Vec<GeocodeCandidate>> {
        info!(place = name, country_code = ?country_code, "geocoding place");

        let mut query = vec![
            ("name", name),
            ("count", "1"),
            ("language", self.language.as_str()),
            ("format", "json"),
        ];
        if let Some(code) = country_code {
            query.push(("countryCode", code));
        }

        let body = self.get_text(&self.geocoding_url, &query, "geocoding").await?;
        let parsed: GeocodingResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        let results = parsed.results.unwrap_or_default();
        debug!(count = results.len(), "geocoding candidates received");
        Ok(results)
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn current_conditions(&self, point: &CoordinateQuery) -> Result<ForecastPayload> {
        info!(latitude = point.latitude, longitude = point.longitude, "fetching current conditions");

        let latitude = point.latitude.to_string();
        let longitude = point.longitude.to_string();
        let query = [
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", CURRENT_FIELDS),
            ("timezone", "auto"),
            ("wind_speed_unit", "ms"),
        ];

        let body = self.get_text(&self.forecast_url, &query, "forecast").await?;
        let parsed: ForecastPayload =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        debug!(?parsed, "forecast payload received");
        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
