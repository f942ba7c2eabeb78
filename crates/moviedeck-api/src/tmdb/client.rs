//! `TmdbClient` - TMDB API client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::{FetchError, FetchResult};
use super::observer::{FetchObserver, TracingObserver};
use super::types::{
    MovieDetail, MovieList, MovieListResponse, MovieSummary, Query, TmdbErrorResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Default freshness hint sent with list queries.
const DEFAULT_REVALIDATE: Duration = Duration::from_secs(3600);

/// TMDB API client.
///
/// Holds no per-request state; a single client can serve any number of
/// concurrent queries.
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key (`api_key` query parameter). `None` when not configured.
    api_key: Option<String>,
    /// `language` query parameter.
    language: String,
    /// `Cache-Control: max-age` sent with list queries.
    revalidate: Duration,
    /// Diagnostics sink.
    observer: Arc<dyn FetchObserver>,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .field("revalidate", &self.revalidate)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

/// Builder for `TmdbClient`.
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    language: Option<String>,
    user_agent: Option<String>,
    revalidate: Option<Duration>,
    observer: Option<Arc<dyn FetchObserver>>,
}

impl fmt::Debug for TmdbClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .field("user_agent", &self.user_agent)
            .field("revalidate", &self.revalidate)
            .finish_non_exhaustive()
    }
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            language: None,
            user_agent: None,
            revalidate: None,
            observer: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key.
    ///
    /// Optional at build time. Without a non-empty key every query fails
    /// with [`FetchError::MissingCredential`] and sends nothing.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the response language (default: `en-US`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the freshness hint for list queries (default: 1 hour).
    #[must_use]
    pub const fn revalidate(mut self, max_age: Duration) -> Self {
        self.revalidate = Some(max_age);
        self
    }

    /// Replaces the default [`TracingObserver`].
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key: self.api_key.filter(|key| !key.is_empty()),
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            revalidate: self.revalidate.unwrap_or(DEFAULT_REVALIDATE),
            observer: self.observer.unwrap_or_else(|| Arc::new(TracingObserver)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Fetches the first page of one of the movie lists.
    ///
    /// Returns the `results` array in catalog order. Any non-2xx status,
    /// 404 included, is reported as [`FetchError::Status`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing, the request fails, the status
    /// is not 2xx, or the body is not a list response.
    #[instrument(skip_all, fields(list = %list))]
    pub async fn movie_list(&self, list: MovieList) -> FetchResult<Vec<MovieSummary>> {
        let query = Query::List(list);
        self.observer.on_request(&query);

        let path = format!("movie/{}", list.endpoint());
        let result = self
            .get_json::<MovieListResponse>(&path, &[("page", "1")], true)
            .await
            .map(|response| response.results);

        self.report(&query, &result);
        result
    }

    /// Fetches a single movie. See [`LocalTmdbApi::movie_details`].
    async fn fetch_movie_details(&self, id: &str) -> FetchResult<MovieDetail> {
        self.api_key()?;

        let movie_id = id.trim();
        if movie_id.is_empty() || !movie_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FetchError::InvalidId {
                id: String::from(id),
            });
        }

        let path = format!("movie/{movie_id}");
        match self.get_json::<MovieDetail>(&path, &[], false).await {
            Err(FetchError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }) => Err(FetchError::NotFound {
                id: String::from(movie_id),
            }),
            other => other,
        }
    }

    /// Returns the configured key or `MissingCredential`.
    fn api_key(&self) -> FetchResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential)
    }

    /// Sends one GET with `api_key`, `language`, and the extra params.
    ///
    /// `revalidate` adds the `Cache-Control: max-age` freshness hint.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        revalidate: bool,
    ) -> FetchResult<T> {
        let api_key = self.api_key()?;
        let url = self.base_url.join(path)?;

        let mut query: Vec<(&str, &str)> =
            vec![("api_key", api_key), ("language", self.language.as_str())];
        query.extend_from_slice(params);

        let mut request = self
            .http_client
            .get(url)
            .query(&query)
            .header(ACCEPT, "application/json");
        if revalidate {
            request = request.header(
                CACHE_CONTROL,
                format!("max-age={}", self.revalidate.as_secs()),
            );
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body)
                .map_or(body, |error_response| error_response.status_message);
            return Err(FetchError::Status { status, message });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Forwards the outcome to the observer.
    fn report<T>(&self, query: &Query<'_>, result: &FetchResult<T>) {
        match result {
            Ok(_) => self.observer.on_success(query),
            Err(err) => self.observer.on_failure(query, err),
        }
    }
}

impl LocalTmdbApi for TmdbClient {
    async fn popular(&self) -> FetchResult<Vec<MovieSummary>> {
        self.movie_list(MovieList::Popular).await
    }

    async fn top_rated(&self) -> FetchResult<Vec<MovieSummary>> {
        self.movie_list(MovieList::TopRated).await
    }

    async fn upcoming(&self) -> FetchResult<Vec<MovieSummary>> {
        self.movie_list(MovieList::Upcoming).await
    }

    async fn now_playing(&self) -> FetchResult<Vec<MovieSummary>> {
        self.movie_list(MovieList::NowPlaying).await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn movie_details(&self, id: &str) -> FetchResult<MovieDetail> {
        let query = Query::Detail(id);
        self.observer.on_request(&query);

        let result = self.fetch_movie_details(id).await;

        self.report(&query, &result);
        result
    }
}
