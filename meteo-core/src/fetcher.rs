//! Forecast lookup and normalization of the provider payload into a
//! [`WeatherReading`]. This is the only place provider data is checked.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{INCOMPLETE_READING, MISSING_CURRENT, SearchError},
    model::{CoordinateQuery, SearchMode, WeatherReading},
    provider::{ForecastPayload, ForecastProvider},
    validate::validate_coordinates,
};

/// Label used when the provider reports no timezone.
pub const FALLBACK_NAME: &str = "Specified coordinates";

#[derive(Debug)]
pub struct WeatherFetcher {
    provider: Box<dyn ForecastProvider>,
}

impl WeatherFetcher {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    /// Validates the point (even when it came from the geocoder), makes one
    /// forecast call and normalizes the answer.
    pub async fn fetch_by_coordinates(
        &self,
        point: &CoordinateQuery,
        mode: SearchMode,
    ) -> Result<WeatherReading, SearchError> {
        let point = validate_coordinates(point.latitude, point.longitude)?;

        let payload = self.provider.current_conditions(&point).await.map_err(|err| {
            warn!(error = %err, "forecast request failed");
            SearchError::Provider(err)
        })?;

        normalize(payload, &point, mode)
    }
}

/// Coerce the loosely-typed payload into a reading.
pub fn normalize(
    payload: ForecastPayload,
    point: &CoordinateQuery,
    mode: SearchMode,
) -> Result<WeatherReading, SearchError> {
    let current = payload.current.ok_or(SearchError::IncompleteData(MISSING_CURRENT))?;

    let temperature = coerce_number(current.temperature_2m.as_ref());
    let apparent_temperature = coerce_number(current.apparent_temperature.as_ref());
    let wind_speed = coerce_number(current.wind_speed_10m.as_ref());

    let (Some(temperature), Some(apparent_temperature), Some(wind_speed)) =
        (temperature, apparent_temperature, wind_speed)
    else {
        debug!(?current, "current conditions incomplete");
        return Err(SearchError::IncompleteData(INCOMPLETE_READING));
    };

    Ok(WeatherReading {
        resolved_name: payload.timezone.unwrap_or_else(|| FALLBACK_NAME.to_string()),
        temperature,
        apparent_temperature,
        wind_speed,
        time: current.time.unwrap_or_default(),
        latitude: payload.latitude.unwrap_or(point.latitude),
        longitude: payload.longitude.unwrap_or(point.longitude),
        mode,
    })
}

/// Numbers pass through, numeric strings are parsed, everything else
/// (null, missing, bool, non-finite) is rejected.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
