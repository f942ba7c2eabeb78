//! Field formatting shared by cards and the detail view.

use chrono::{Datelike, NaiveDate};

/// Shown when a field is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Poster stand-in for movies without one.
pub const PLACEHOLDER_POSTER: &str = "/placeholder.svg?width=500&height=750";

/// Builds an image URL such as `https://image.tmdb.org/t/p/w500/abc.jpg`.
pub fn image_url(image_base: &str, size: &str, path: &str) -> String {
    format!("{image_base}{size}{path}")
}

/// Poster URL at `w500`, or the placeholder.
pub fn poster_url(image_base: &str, poster_path: Option<&str>) -> String {
    poster_path
        .filter(|p| !p.is_empty())
        .map_or_else(
            || String::from(PLACEHOLDER_POSTER),
            |p| image_url(image_base, "w500", p),
        )
}

/// Year of a `YYYY-MM-DD` release date.
pub fn release_year(release_date: Option<&str>) -> Option<i32> {
    release_date
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year())
}

/// Year as text, `N/A` when absent or unparseable.
pub fn year_text(release_date: Option<&str>) -> String {
    release_year(release_date).map_or_else(|| String::from(NOT_AVAILABLE), |y| y.to_string())
}

/// Card rating with one decimal. Zero counts as unrated.
pub fn card_rating_text(vote_average: Option<f64>) -> String {
    vote_average
        .filter(|v| !v.is_nan() && *v != 0.0)
        .map_or_else(|| String::from(NOT_AVAILABLE), |v| format!("{v:.1}"))
}
