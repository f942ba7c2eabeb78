//! TMDB API response types and query descriptors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

// --- Movie lists ---

/// Response from the `movie/{list}` endpoints.
///
/// Only `results` is required; the paging fields are carried when present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieListResponse {
    /// Current page number.
    pub page: Option<u32>,
    /// Movies on this page, in catalog order.
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
    /// Total number of results.
    pub total_results: Option<u32>,
}

/// A field that may be absent, explicitly `null`, or set.
///
/// Decoding keeps the three states apart so that serializing a record emits
/// the same keys and values it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
    /// The key was not present.
    Absent,
    /// The key was present with `null`.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Nullable<T> {
    /// Whether the key was missing from the body.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The value, if one was set.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    // Only reached when the key is present; `#[serde(default)]` covers absence.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}

/// A single movie as returned inside a list response.
///
/// Fields this crate does not read are kept in `other`, and read fields keep
/// their wire form, so serializing a fetched summary reproduces the
/// catalog's object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (e.g. `/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg`).
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub poster_path: Nullable<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub release_date: Nullable<String>,
    /// Vote average (0-10), as the catalog wrote it (`0` or `7.5`).
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub vote_average: Nullable<Number>,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl MovieSummary {
    /// Poster image path, if set.
    #[must_use]
    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path.get().map(String::as_str)
    }

    /// Release date, if set.
    #[must_use]
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.get().map(String::as_str)
    }

    /// Vote average, if set.
    #[must_use]
    pub fn vote_average(&self) -> Option<f64> {
        self.vote_average.get().and_then(Number::as_f64)
    }
}

// --- Movie details ---

/// Response from the `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub poster_path: Nullable<String>,
    /// Backdrop image path.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub backdrop_path: Nullable<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub release_date: Nullable<String>,
    /// Vote average (0-10).
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub vote_average: Nullable<Number>,
    /// Overview text.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub overview: Nullable<String>,
    /// Runtime in minutes.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub runtime: Nullable<u32>,
    /// Genres, in catalog order.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub genres: Nullable<Vec<Genre>>,
    /// Tagline.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tagline: Nullable<String>,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl MovieDetail {
    /// Poster image path, if set.
    #[must_use]
    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path.get().map(String::as_str)
    }

    /// Backdrop image path, if set.
    #[must_use]
    pub fn backdrop_path(&self) -> Option<&str> {
        self.backdrop_path.get().map(String::as_str)
    }

    /// Release date, if set.
    #[must_use]
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.get().map(String::as_str)
    }

    /// Vote average, if set.
    #[must_use]
    pub fn vote_average(&self) -> Option<f64> {
        self.vote_average.get().and_then(Number::as_f64)
    }

    /// Overview text, if set.
    #[must_use]
    pub fn overview(&self) -> Option<&str> {
        self.overview.get().map(String::as_str)
    }

    /// Runtime in minutes, if set.
    #[must_use]
    pub fn runtime(&self) -> Option<u32> {
        self.runtime.get().copied()
    }

    /// Genres, if set.
    #[must_use]
    pub fn genres(&self) -> Option<&[Genre]> {
        self.genres.get().map(Vec::as_slice)
    }

    /// Tagline, if set.
    #[must_use]
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.get().map(String::as_str)
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Queries ---

/// The four unparameterized movie collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieList {
    /// `movie/popular`
    Popular,
    /// `movie/top_rated`
    TopRated,
    /// `movie/upcoming`
    Upcoming,
    /// `movie/now_playing`
    NowPlaying,
}

impl MovieList {
    /// Every list, in navigation order.
    pub const ALL: [Self; 4] = [Self::Popular, Self::TopRated, Self::Upcoming, Self::NowPlaying];

    /// Path segment under `movie/`.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "now_playing",
        }
    }

    /// Human-readable name (e.g. `"top-rated"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top-rated",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "now playing",
        }
    }
}

impl fmt::Display for MovieList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one client call in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'a> {
    /// One of the list queries.
    List(MovieList),
    /// The detail query for the given caller-supplied id.
    Detail(&'a str),
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => write!(f, "movie/{}", list.endpoint()),
            Self::Detail(id) => write!(f, "movie/{id}"),
        }
    }
}
