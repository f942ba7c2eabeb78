//! Diagnostic hooks invoked around every TMDB query.

use std::fmt;

use super::error::FetchError;
use super::types::Query;

/// Receives diagnostics for each query a [`TmdbClient`](super::TmdbClient) runs.
///
/// Diagnostics never change the query's result. The API key is never passed
/// to an observer.
pub trait FetchObserver: Send + Sync + fmt::Debug {
    /// Called before the request is sent (or rejected locally).
    fn on_request(&self, query: &Query<'_>) {
        let _ = query;
    }

    /// Called when the query produced a value.
    fn on_success(&self, query: &Query<'_>) {
        let _ = query;
    }

    /// Called when the query failed.
    fn on_failure(&self, query: &Query<'_>, error: &FetchError);
}

/// Default observer that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn on_request(&self, query: &Query<'_>) {
        tracing::debug!(%query, "TMDB API request");
    }

    fn on_success(&self, query: &Query<'_>) {
        tracing::debug!(%query, "TMDB API request succeeded");
    }

    fn on_failure(&self, query: &Query<'_>, error: &FetchError) {
        tracing::error!(%query, kind = ?error.kind(), %error, "TMDB query failed");
    }
}
