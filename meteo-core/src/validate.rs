//! Structural and range checks for both search shapes. Pure, no I/O.

use crate::{
    error::ValidationError,
    model::{CityQuery, CoordinateQuery},
};

pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Accepts a coordinate pair when both values are finite and inside their
/// inclusive ranges.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<CoordinateQuery, ValidationError> {
    if !latitude.is_finite() {
        return Err(ValidationError::LatitudeNotANumber);
    }
    if !LATITUDE_RANGE.contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange);
    }
    if !longitude.is_finite() {
        return Err(ValidationError::LongitudeNotANumber);
    }
    if !LONGITUDE_RANGE.contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange);
    }

    Ok(CoordinateQuery { latitude, longitude })
}

/// Accepts a country/city pair when neither is blank. Returns trimmed values.
pub fn validate_city(country: &str, city: &str) -> Result<CityQuery, ValidationError> {
    let country = country.trim();
    if country.is_empty() {
        return Err(ValidationError::MissingCountry);
    }

    let city = city.trim();
    if city.is_empty() {
        return Err(ValidationError::MissingCity);
    }

    Ok(CityQuery { country: country.to_string(), city: city.to_string() })
}
