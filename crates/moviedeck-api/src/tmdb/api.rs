//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchResult;
use super::types::{MovieDetail, MovieSummary};

/// TMDB API trait.
///
/// Abstracts the five movie queries for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the first page of `movie/popular`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`](super::FetchError) if the key is missing,
    /// the request fails, the status is not 2xx, or the body is not JSON.
    async fn popular(&self) -> FetchResult<Vec<MovieSummary>>;

    /// Fetches the first page of `movie/top_rated`.
    ///
    /// # Errors
    ///
    /// Same as [`LocalTmdbApi::popular`].
    async fn top_rated(&self) -> FetchResult<Vec<MovieSummary>>;

    /// Fetches the first page of `movie/upcoming`.
    ///
    /// # Errors
    ///
    /// Same as [`LocalTmdbApi::popular`].
    async fn upcoming(&self) -> FetchResult<Vec<MovieSummary>>;

    /// Fetches the first page of `movie/now_playing`.
    ///
    /// # Errors
    ///
    /// Same as [`LocalTmdbApi::popular`].
    async fn now_playing(&self) -> FetchResult<Vec<MovieSummary>>;

    /// Fetches a single movie by its TMDB ID.
    ///
    /// # Errors
    ///
    /// As for the list queries, plus `InvalidId` for a non-numeric id and
    /// `NotFound` for HTTP 404.
    async fn movie_details(&self, id: &str) -> FetchResult<MovieDetail>;
}
