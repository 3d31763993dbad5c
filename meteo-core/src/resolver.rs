use tracing::{info, warn};

use crate::{
    catalog,
    error::SearchError,
    model::{CityQuery, GeocodeMatch},
    provider::{GeocodeCandidate, GeocodingProvider},
    validate::validate_city,
};

/// Turns a country/city pair into a display name and a point.
#[derive(Debug)]
pub struct LocationResolver {
    geocoder: Box<dyn GeocodingProvider>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn GeocodingProvider>) -> Self {
        Self { geocoder }
    }

    /// One geocoding call, best match only. The returned point is the
    /// provider's, not anything taken from the input.
    pub async fn resolve(&self, query: &CityQuery) -> Result<GeocodeMatch, SearchError> {
        let query = validate_city(&query.country, &query.city)?;

        let country_code = catalog::find_country_code(&query.country);
        if country_code.is_none() {
            info!(country = %query.country, "country not in catalog, geocoding without hint");
        }

        let candidates = self
            .geocoder
            .search_place(&query.city, country_code)
            .await
            .map_err(|err| {
                warn!(error = %err, "geocoding request failed");
                SearchError::Provider(err)
            })?;

        let best = candidates.into_iter().next().ok_or(SearchError::NotFound)?;
        let matched = to_match(best);

        info!(display_name = %matched.display_name, "place resolved");
        Ok(matched)
    }
}

fn to_match(candidate: GeocodeCandidate) -> GeocodeMatch {
    let country = candidate
        .country_code
        .filter(|c| !c.is_empty())
        .or(candidate.country.filter(|c| !c.is_empty()));

    let display_name = match country {
        Some(country) => format!("{}, {}", candidate.name, country),
        None => candidate.name,
    };

    GeocodeMatch { display_name, latitude: candidate.latitude, longitude: candidate.longitude }
}
