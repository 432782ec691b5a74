use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Pokedex catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Error talking to the creature API or the search endpoint
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    /// Error reshaping raw records into view models
    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),
    /// Error loading the catalog configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error parsing a client route
    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}

/// Errors raised by the fetch layer
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    /// The body could not be decoded into the expected record
    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The HTTP client could not be built (TLS backend, proxy settings)
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors raised while aggregating raw records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// A localized collection has no English entry
    #[error("No English entry for {field}")]
    MissingEnglishEntry { field: &'static str },
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors raised while parsing a route
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),
    #[error("Route {0} is missing a creature id or name")]
    MissingKey(String),
}

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Type alias for Results using AggregateError
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_chains_through_wrapper() {
        let err: CatalogError = AggregateError::MissingEnglishEntry { field: "genera" }.into();
        assert_eq!(
            err.to_string(),
            "Aggregation error: No English entry for genera"
        );

        let err: CatalogError = FetchError::Status {
            url: "https://pokeapi.co/api/v2/pokemon/0".to_string(),
            status: 404,
        }
        .into();
        assert!(err.to_string().contains("returned status 404"));
    }

    #[test]
    fn test_route_and_config_errors_convert() {
        let err: CatalogError = RouteError::Unknown("/berries".to_string()).into();
        assert!(matches!(err, CatalogError::Route(RouteError::Unknown(_))));
        assert_eq!(err.to_string(), "Route error: Unknown route: /berries");

        let err: CatalogError = ConfigError::InvalidValue {
            key: "page_size",
            value: "0".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Config error: Invalid value for page_size: 0");
    }
}
