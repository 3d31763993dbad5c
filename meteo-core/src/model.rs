use serde::{Deserialize, Serialize};

/// Which kind of search produced a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Coordinates,
    City,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Coordinates => "coordinates",
            SearchMode::City => "city",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityQuery {
    pub country: String,
    pub city: String,
}

/// A user search. The `mode` tag is the only discriminant.
///
/// Serialized as `{"mode": "coordinates", "latitude": .., "longitude": ..}`
/// or `{"mode": "city", "country": .., "city": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SearchRequest {
    Coordinates(CoordinateQuery),
    City(CityQuery),
}

impl SearchRequest {
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        SearchRequest::Coordinates(CoordinateQuery { latitude, longitude })
    }

    pub fn city(country: impl Into<String>, city: impl Into<String>) -> Self {
        SearchRequest::City(CityQuery { country: country.into(), city: city.into() })
    }

    pub fn mode(&self) -> SearchMode {
        match self {
            SearchRequest::Coordinates(_) => SearchMode::Coordinates,
            SearchRequest::City(_) => SearchMode::City,
        }
    }
}

/// Best geocoding match for a city query. Lives only for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodeMatch {
    pub fn coordinates(&self) -> CoordinateQuery {
        CoordinateQuery { latitude: self.latitude, longitude: self.longitude }
    }
}

/// Normalized current conditions, the final result of one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub resolved_name: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Degrees Celsius.
    pub apparent_temperature: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// ISO-8601 timestamp in the provider's local time, or empty.
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mode: SearchMode,
}
