//! Fixed list of selectable countries and cities.
//!
//! Used to build a country-code hint for geocoding and to drive selection
//! prompts. It is not authoritative: any country/city pair may be searched.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedLocation {
    pub country: &'static str,
    pub country_code: &'static str,
    pub cities: &'static [&'static str],
}

pub const SUPPORTED_LOCATIONS: &[SupportedLocation] = &[
    SupportedLocation {
        country: "Kazakhstan",
        country_code: "KZ",
        cities: &["Astana", "Almaty", "Shymkent"],
    },
    SupportedLocation {
        country: "Russia",
        country_code: "RU",
        cities: &["Moscow", "Saint Petersburg", "Kazan"],
    },
    SupportedLocation {
        country: "United States",
        country_code: "US",
        cities: &["New York", "San Francisco", "Chicago"],
    },
    SupportedLocation {
        country: "Germany",
        country_code: "DE",
        cities: &["Berlin", "Munich", "Hamburg"],
    },
    SupportedLocation {
        country: "Spain",
        country_code: "ES",
        cities: &["Madrid", "Barcelona", "Valencia"],
    },
];

/// Case-insensitive exact lookup by country name.
pub fn find_country(name: &str) -> Option<&'static SupportedLocation> {
    let normalized = name.trim().to_lowercase();
    SUPPORTED_LOCATIONS.iter().find(|loc| loc.country.to_lowercase() == normalized)
}

pub fn find_country_code(name: &str) -> Option<&'static str> {
    find_country(name).map(|loc| loc.country_code)
}
