// crates/geocoder-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the aggregator, the registries and the bundled providers.
///
/// Naming and configuration problems (`ProviderNotFound`, `InvalidDumper`,
/// `InvalidLimit`, `Config`) are raised immediately. Backend failures are
/// passed through untouched; cache trouble never shows up here (see
/// [`CacheError`]).
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("provider \"{0}\" is not registered")]
    ProviderNotFound(String),

    #[error("dumper \"{0}\" is not registered")]
    InvalidDumper(String),

    #[error("provider \"{provider}\" does not support {function}")]
    FunctionNotFound {
        provider: String,
        function: &'static str,
    },

    #[error("limit must be a positive integer, got {0}")]
    InvalidLimit(usize),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("provider \"{provider}\" failed: {source}")]
    Backend {
        provider: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "http")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl GeocoderError {
    /// Wraps an arbitrary backend failure, tagging it with the provider name.
    pub fn backend<E>(provider: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        GeocoderError::Backend {
            provider: provider.into(),
            source: source.into(),
        }
    }
}

/// Failures of a [`CacheStore`](crate::cache::CacheStore).
///
/// These are always absorbed by the query cache: a failing read is a miss,
/// a failing write is skipped.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store unavailable: {0}")]
    Unavailable(String),

    #[error("cache entry could not be encoded: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, GeocoderError>;
