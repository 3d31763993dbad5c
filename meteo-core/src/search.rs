use tracing::info;

use crate::{
    Config,
    error::SearchError,
    fetcher::WeatherFetcher,
    model::{SearchMode, SearchRequest, WeatherReading},
    provider::{ForecastProvider, GeocodingProvider, open_meteo_from_config},
    resolver::LocationResolver,
    validate::{validate_city, validate_coordinates},
};

/// Public entry point: one search in, one reading or one error out.
///
/// Holds no state between calls. Concurrent searches each run their own
/// independent sequence of provider calls.
#[derive(Debug)]
pub struct SearchOrchestrator {
    resolver: LocationResolver,
    fetcher: WeatherFetcher,
}

impl SearchOrchestrator {
    pub fn new(geocoder: Box<dyn GeocodingProvider>, forecast: Box<dyn ForecastProvider>) -> Self {
        Self { resolver: LocationResolver::new(geocoder), fetcher: WeatherFetcher::new(forecast) }
    }

    /// Orchestrator backed by Open-Meteo for both lookups.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = open_meteo_from_config(config)?;
        Ok(Self::new(Box::new(client.clone()), Box::new(client)))
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<WeatherReading, SearchError> {
        info!(mode = %request.mode(), "search started");

        let reading = match request {
            SearchRequest::Coordinates(point) => {
                let point = validate_coordinates(point.latitude, point.longitude)?;
                self.fetcher.fetch_by_coordinates(&point, SearchMode::Coordinates).await?
            }
            SearchRequest::City(query) => {
                let query = validate_city(&query.country, &query.city)?;
                let place = self.resolver.resolve(&query).await?;
                let reading =
                    self.fetcher.fetch_by_coordinates(&place.coordinates(), SearchMode::City).await?;

                // geocoder's name beats the timezone label
                WeatherReading { resolved_name: place.display_name, ..reading }
            }
        };

        info!(resolved_name = %reading.resolved_name, temperature = reading.temperature, "search finished");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ValidationError,
        model::CoordinateQuery,
        provider::{ForecastPayload, GeocodeCandidate},
    };
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn weather_body() -> Value {
        json!({
            "latitude": 51.1694,
            "longitude": 71.4491,
            "elevation": 0,
            "generationtime_ms": 0.2,
            "timezone": "Asia/Almaty",
            "timezone_abbreviation": "ALMT",
            "utc_offset_seconds": 21600,
            "current": {
                "time": "2024-01-01T10:00",
                "interval": 60,
                "temperature_2m": 12.3,
                "apparent_temperature": 10.1,
                "wind_speed_10m": 3.5
            },
            "current_units": {
                "time": "iso8601",
                "interval": "minutes",
                "temperature_2m": "°C",
                "apparent_temperature": "°C",
                "wind_speed_10m": "m/s"
            }
        })
    }

    fn astana() -> GeocodeCandidate {
        GeocodeCandidate {
            name: "Astana".into(),
            latitude: 51.1694,
            longitude: 71.4491,
            country_code: Some("KZ".into()),
            country: None,
        }
    }

    #[derive(Debug, Clone)]
    struct FakeGeocoder {
        candidates: Vec<GeocodeCandidate>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl GeocodingProvider for FakeGeocoder {
        async fn search_place(&self, _: &str, _: Option<&str>) -> anyhow::Result<Vec<GeocodeCandidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.clone())
        }
    }

    #[derive(Debug, Clone)]
    struct FakeForecast {
        body: Value,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ForecastProvider for FakeForecast {
        async fn current_conditions(&self, _: &CoordinateQuery) -> anyhow::Result<ForecastPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(self.body.clone())?)
        }
    }

    struct Harness {
        orchestrator: SearchOrchestrator,
        geocode_calls: Arc<AtomicUsize>,
        forecast_calls: Arc<AtomicUsize>,
    }

    fn harness(candidates: Vec<GeocodeCandidate>, body: Value) -> Harness {
        let geocode_calls = Arc::new(AtomicUsize::new(0));
        let forecast_calls = Arc::new(AtomicUsize::new(0));
        let geocoder = FakeGeocoder { candidates, calls: geocode_calls.clone() };
        let forecast = FakeForecast { body, calls: forecast_calls.clone() };

        Harness {
            orchestrator: SearchOrchestrator::new(Box::new(geocoder), Box::new(forecast)),
            geocode_calls,
            forecast_calls,
        }
    }

    #[tokio::test]
    async fn coordinates_search_uses_timezone_as_name() {
        let h = harness(vec![], weather_body());

        let reading = h
            .orchestrator
            .search(&SearchRequest::coordinates(51.1694, 71.4491))
            .await
            .unwrap();

        assert_eq!(reading.resolved_name, "Asia/Almaty");
        assert_eq!(reading.temperature, 12.3);
        assert_eq!(reading.apparent_temperature, 10.1);
        assert_eq!(reading.wind_speed, 3.5);
        assert_eq!(reading.mode, SearchMode::Coordinates);
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.forecast_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn city_search_uses_geocoder_name() {
        let h = harness(vec![astana()], weather_body());

        let reading =
            h.orchestrator.search(&SearchRequest::city("Kazakhstan", "Astana")).await.unwrap();

        assert_eq!(reading.resolved_name, "Astana, KZ");
        assert_eq!(reading.mode, SearchMode::City);
        assert_eq!(reading.temperature, 12.3);
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.forecast_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn out_of_range_rejects_before_any_call() {
        let h = harness(vec![astana()], weather_body());

        let err = h.orchestrator.search(&SearchRequest::coordinates(-200.0, 0.0)).await.unwrap_err();

        assert!(matches!(err, SearchError::Validation(ValidationError::LatitudeOutOfRange)));
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_city_rejects_before_any_call() {
        let h = harness(vec![astana()], weather_body());

        let err = h.orchestrator.search(&SearchRequest::city(" ", "Astana")).await.unwrap_err();

        assert!(matches!(err, SearchError::Validation(ValidationError::MissingCountry)));
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_city_never_queries_weather() {
        let h = harness(vec![], weather_body());

        let err =
            h.orchestrator.search(&SearchRequest::city("Kazakhstan", "Nowhere")).await.unwrap_err();

        assert!(matches!(err, SearchError::NotFound));
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_current_fails_in_both_modes() {
        let mut body = weather_body();
        body.as_object_mut().unwrap().remove("current");
        let h = harness(vec![astana()], body);

        for request in
            [SearchRequest::coordinates(51.1694, 71.4491), SearchRequest::city("Kazakhstan", "Astana")]
        {
            let err = h.orchestrator.search(&request).await.unwrap_err();
            assert!(matches!(err, SearchError::IncompleteData(_)), "{request:?}");
        }
    }

    #[tokio::test]
    async fn geocoder_point_is_revalidated() {
        let bogus = GeocodeCandidate { latitude: 123.0, ..astana() };
        let h = harness(vec![bogus], weather_body());

        let err = h.orchestrator.search(&SearchRequest::city("Kazakhstan", "Astana")).await.unwrap_err();

        assert!(matches!(err, SearchError::Validation(ValidationError::LatitudeOutOfRange)));
        assert_eq!(h.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeated_search_is_idempotent() {
        let h = harness(vec![astana()], weather_body());
        let request = SearchRequest::city("Kazakhstan", "Astana");

        let first = h.orchestrator.search(&request).await.unwrap();
        let second = h.orchestrator.search(&request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.forecast_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_searches_are_independent() {
        let h = harness(vec![astana()], weather_body());
        let a = SearchRequest::city("Kazakhstan", "Astana");
        let b = SearchRequest::coordinates(51.1694, 71.4491);

        let (ra, rb) = tokio::join!(h.orchestrator.search(&a), h.orchestrator.search(&b));

        assert_eq!(ra.unwrap().resolved_name, "Astana, KZ");
        assert_eq!(rb.unwrap().resolved_name, "Asia/Almaty");
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.forecast_calls.load(Ordering::SeqCst), 2);
    }
}
