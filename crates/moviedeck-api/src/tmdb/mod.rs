//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints and
//! normalizes every outcome into a [`FetchResult`].

mod api;
mod client;
mod error;
mod observer;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::{FetchError, FetchErrorKind, FetchResult};
pub use observer::{FetchObserver, TracingObserver};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    Genre, MovieDetail, MovieList, MovieListResponse, MovieSummary, Nullable, Query,
    TmdbErrorResponse,
};
