//! Failure taxonomy shared by every TMDB query.

use reqwest::StatusCode;
use thiserror::Error;

/// Result of a TMDB query.
pub type FetchResult<T> = Result<T, FetchError>;

/// Why a TMDB query produced no usable value.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key was configured. No request was sent.
    #[error("TMDB API key is not configured (set TMDB_API_KEY or tmdb.api_key in config.toml)")]
    MissingCredential,

    /// The detail query was given an id that is not a movie ID. No request was sent.
    #[error("please provide a valid movie ID (e.g. 550), got {id:?}")]
    InvalidId {
        /// The rejected id, as supplied.
        id: String,
    },

    /// The detail query returned HTTP 404.
    #[error("Movie with ID {id} not found")]
    NotFound {
        /// The requested id.
        id: String,
    },

    /// The catalog answered with a non-success status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// `status_message` from the error body, or the raw body.
        message: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("request to TMDB failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The request URL could not be built.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body was not the expected JSON.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Tag identifying the kind of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// See [`FetchError::MissingCredential`].
    MissingCredential,
    /// See [`FetchError::InvalidId`].
    InvalidId,
    /// See [`FetchError::NotFound`].
    NotFound,
    /// See [`FetchError::Status`].
    Status,
    /// See [`FetchError::Network`] and [`FetchError::InvalidUrl`].
    Transport,
    /// See [`FetchError::Decode`].
    Decode,
}

impl FetchError {
    /// Returns the kind tag of this error.
    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::MissingCredential => FetchErrorKind::MissingCredential,
            Self::InvalidId { .. } => FetchErrorKind::InvalidId,
            Self::NotFound { .. } => FetchErrorKind::NotFound,
            Self::Status { .. } => FetchErrorKind::Status,
            Self::Network(_) | Self::InvalidUrl(_) => FetchErrorKind::Transport,
            Self::Decode(_) => FetchErrorKind::Decode,
        }
    }

    /// HTTP status carried by the error, if the catalog answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }
}
