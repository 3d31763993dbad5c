use thiserror::Error;

/// Input rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("latitude must be a number")]
    LatitudeNotANumber,
    #[error("longitude must be a number")]
    LongitudeNotANumber,
    #[error("latitude out of range")]
    LatitudeOutOfRange,
    #[error("longitude out of range")]
    LongitudeOutOfRange,
    #[error("country is required")]
    MissingCountry,
    #[error("city is required")]
    MissingCity,
}

/// Message used when the forecast response has no current-conditions block.
pub const MISSING_CURRENT: &str = "weather data unavailable for this point";
/// Message used when a current-conditions field is not a usable number.
pub const INCOMPLETE_READING: &str = "incomplete reading";

/// Every way a search can fail. Each variant has its own user-facing message.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("city not found")]
    NotFound,

    #[error("{0}")]
    IncompleteData(&'static str),

    /// Transport failure, non-success status or unreadable body.
    #[error("provider request failed: {0:#}")]
    Provider(#[source] anyhow::Error),
}

impl SearchError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Validation(_) => "validation",
            SearchError::NotFound => "not_found",
            SearchError::IncompleteData(_) => "incomplete_data",
            SearchError::Provider(_) => "provider",
        }
    }

    /// Optional suggestion to show next to the message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SearchError::NotFound => {
                Some("Try a different spelling, or search by coordinates instead.")
            }
            SearchError::Provider(_) => Some("Check your connection and try again."),
            SearchError::Validation(_) | SearchError::IncompleteData(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct_per_kind() {
        let errors = [
            SearchError::from(ValidationError::LatitudeOutOfRange),
            SearchError::NotFound,
            SearchError::IncompleteData(MISSING_CURRENT),
            SearchError::IncompleteData(INCOMPLETE_READING),
            SearchError::Provider(anyhow::anyhow!("connection refused")),
        ];

        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn validation_is_transparent() {
        let err = SearchError::from(ValidationError::LongitudeOutOfRange);
        assert_eq!(err.to_string(), "longitude out of range");
        assert_eq!(err.kind(), "validation");
        assert!(err.hint().is_none());
    }

    #[test]
    fn provider_error_keeps_context_chain() {
        let inner = anyhow::anyhow!("connection refused").context("Failed to send request");
        let err = SearchError::Provider(inner);
        let msg = err.to_string();
        assert!(msg.starts_with("provider request failed: "));
        assert!(msg.contains("Failed to send request"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn not_found_suggests_alternatives() {
        let hint = SearchError::NotFound.hint().unwrap();
        assert!(hint.contains("coordinates"));
    }
}
