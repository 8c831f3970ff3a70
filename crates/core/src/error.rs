use crate::map::MarkerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The street text carried no all-digit token.
    MissingHouseNumber,
    /// The index returned zero documents.
    NoDocuments,
    /// The top document has no door with the requested number.
    NoMatchingHouseNumber,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MissingHouseNumber => "no house number in the street text",
            Self::NoDocuments => "no street matched the address",
            Self::NoMatchingHouseNumber => "no matching house number on the street",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("malformed address: {0}")]
    Validation(String),

    #[error("address not found: {0}")]
    NotFound(NotFoundReason),

    #[error("address search failed: {0}")]
    Service(#[from] SearchError),
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("marker {0} is not on the map")]
    UnknownMarker(MarkerId),

    #[error("map surface rejected the command: {0}")]
    Surface(String),

    #[error("map surface is unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("credentials must look like `username:password`")]
    InvalidCredentials,

    #[error("invalid search endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
