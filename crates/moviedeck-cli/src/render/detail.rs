//! Single-movie view.

use moviedeck_api::tmdb::{FetchResult, MovieDetail};

use super::format::{NOT_AVAILABLE, image_url, poster_url, year_text};

/// Ids offered when a movie cannot be shown.
const SUGGESTIONS: [(u64, &str); 3] = [
    (550, "Fight Club"),
    (13, "Forrest Gump"),
    (238, "The Godfather"),
];

/// Renders the detail view, or the error view with the failure's message.
#[must_use]
pub fn render_movie_detail(result: &FetchResult<MovieDetail>, image_base: &str) -> Vec<String> {
    match result {
        Ok(movie) => render_movie(movie, image_base),
        Err(err) => {
            let mut lines = vec![
                String::from("Error Loading Movie"),
                err.to_string(),
                String::new(),
                String::from("Try a specific movie like:"),
            ];
            lines.extend(
                SUGGESTIONS
                    .iter()
                    .map(|(id, title)| format!("    moviedeck movie --id {id}  ({title})")),
            );
            lines
        }
    }
}

fn render_movie(movie: &MovieDetail, image_base: &str) -> Vec<String> {
    let mut lines = vec![movie.title.clone()];

    // An empty tagline is treated as absent.
    if let Some(tagline) = movie.tagline().filter(|t| !t.is_empty()) {
        lines.push(format!("\"{tagline}\""));
    }

    let runtime = movie
        .runtime()
        .map_or_else(|| String::from(NOT_AVAILABLE), |m| m.to_string());
    let rating = movie
        .vote_average()
        .map_or_else(|| String::from(NOT_AVAILABLE), |v| format!("{v:.1}"));
    lines.push(format!(
        "{} • {runtime} min • ★ {rating}/10",
        year_text(movie.release_date())
    ));

    if let Some(genres) = movie.genres().filter(|g| !g.is_empty()) {
        let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(format!("Genres: {}", names.join(", ")));
    }

    if let Some(backdrop) = movie.backdrop_path().filter(|p| !p.is_empty()) {
        lines.push(format!(
            "Backdrop: {}",
            image_url(image_base, "w1280", backdrop)
        ));
    }
    lines.push(format!(
        "Poster: {}",
        poster_url(image_base, movie.poster_path())
    ));

    lines.push(String::new());
    lines.push(String::from("Overview"));
    lines.push(String::from(
        movie
            .overview()
            .filter(|o| !o.is_empty())
            .unwrap_or("No overview available for this movie."),
    ));

    lines
}
