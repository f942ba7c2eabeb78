//! Movie list page: a header and one card per movie.

use moviedeck_api::tmdb::{FetchResult, MovieList, MovieSummary};

use super::format::{card_rating_text, poster_url, year_text};

/// Which optional card fields to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Show the vote average.
    pub show_rating: bool,
    /// Show the release year.
    pub show_year: bool,
}

/// A list page: the list it shows plus its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPage {
    /// Collection to fetch.
    pub list: MovieList,
    /// Page title.
    pub heading: &'static str,
    /// Line under the title.
    pub subheading: &'static str,
    /// Card fields.
    pub options: GridOptions,
}

const ALL_FIELDS: GridOptions = GridOptions {
    show_rating: true,
    show_year: true,
};

impl GridPage {
    /// Landing page: popular movies, posters and titles only.
    pub const HOME: Self = Self {
        list: MovieList::Popular,
        heading: "Popular Movies",
        subheading: "Discover the most popular movies right now",
        options: GridOptions {
            show_rating: false,
            show_year: false,
        },
    };

    /// Popular movies with year and rating.
    pub const POPULAR: Self = Self {
        list: MovieList::Popular,
        heading: "Popular Movies",
        subheading: "The most popular movies trending right now, updated daily",
        options: ALL_FIELDS,
    };

    /// Top-rated movies.
    pub const TOP_RATED: Self = Self {
        list: MovieList::TopRated,
        heading: "Top Rated Movies",
        subheading: "The highest rated movies of all time, as voted by movie lovers worldwide",
        options: ALL_FIELDS,
    };

    /// Upcoming releases.
    pub const UPCOMING: Self = Self {
        list: MovieList::Upcoming,
        heading: "Upcoming Movies",
        subheading: "Movies coming soon to theaters",
        options: ALL_FIELDS,
    };

    /// Movies in theaters now.
    pub const NOW_PLAYING: Self = Self {
        list: MovieList::NowPlaying,
        heading: "Now Playing",
        subheading: "Movies currently in theaters",
        options: ALL_FIELDS,
    };

    /// Text shown in place of the grid when the fetch failed.
    #[must_use]
    pub fn fallback_message(&self) -> String {
        format!(
            "Failed to load {} movies. Please try again later.",
            self.list.label()
        )
    }
}

/// Renders a list page.
///
/// A failed fetch renders only the fallback message. An empty list is a
/// successful fetch and renders the header with a note.
#[must_use]
pub fn render_movie_grid(
    page: &GridPage,
    result: &FetchResult<Vec<MovieSummary>>,
    image_base: &str,
) -> Vec<String> {
    let Ok(movies) = result else {
        return vec![page.fallback_message()];
    };

    let mut lines = vec![
        String::from(page.heading),
        String::from(page.subheading),
        String::new(),
    ];

    if movies.is_empty() {
        lines.push(String::from("No movies to show."));
        return lines;
    }

    for movie in movies {
        lines.extend(render_card(movie, page.options, image_base));
    }
    lines
}

/// One card: title with id, poster, then the optional fields.
fn render_card(movie: &MovieSummary, options: GridOptions, image_base: &str) -> Vec<String> {
    let mut card = vec![
        format!("{} [{}]", movie.title, movie.id),
        format!(
            "    Poster: {}",
            poster_url(image_base, movie.poster_path())
        ),
    ];

    let mut meta = Vec::with_capacity(2);
    if options.show_year {
        meta.push(year_text(movie.release_date()));
    }
    if options.show_rating {
        meta.push(format!("★ {}", card_rating_text(movie.vote_average())));
    }
    if !meta.is_empty() {
        card.push(format!("    {}", meta.join("  ")));
    }

    card
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use moviedeck_api::tmdb::{FetchError, MovieListResponse};

    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";

    fn popular_fixture() -> Vec<MovieSummary> {
        let json = include_str!("../../../../fixtures/tmdb/movie_popular.json");
        let response: MovieListResponse = serde_json::from_str(json).unwrap();
        response.results
    }

    #[test]
    fn test_failure_renders_fallback_only() {
        // Arrange
        let result = Err(FetchError::MissingCredential);

        // Act
        let lines = render_movie_grid(&GridPage::TOP_RATED, &result, IMAGE_BASE);

        // Assert
        assert_eq!(
            lines,
            ["Failed to load top-rated movies. Please try again later."]
        );
    }

    #[test]
    fn test_empty_list_is_not_a_failure() {
        // Arrange
        let result = Ok(Vec::new());

        // Act
        let lines = render_movie_grid(&GridPage::UPCOMING, &result, IMAGE_BASE);

        // Assert
        assert_eq!(lines.first().map(String::as_str), Some("Upcoming Movies"));
        assert_eq!(lines.last().map(String::as_str), Some("No movies to show."));
    }

    #[test]
    fn test_popular_page_shows_year_and_rating() {
        // Arrange
        let result = Ok(popular_fixture());

        // Act
        let lines = render_movie_grid(&GridPage::POPULAR, &result, IMAGE_BASE);

        // Assert
        assert!(lines.contains(&String::from("Fight Club [550]")));
        assert!(lines.contains(&String::from(
            "    Poster: https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        )));
        assert!(lines.contains(&String::from("    1999  ★ 8.4")));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        // Arrange
        let result = Ok(popular_fixture());

        // Act
        let lines = render_movie_grid(&GridPage::POPULAR, &result, IMAGE_BASE);

        // Assert
        assert!(lines.contains(&String::from(
            "    Poster: /placeholder.svg?width=500&height=750"
        )));
        assert!(lines.contains(&String::from("    N/A  ★ N/A")));
    }

    #[test]
    fn test_home_page_hides_year_and_rating() {
        // Arrange
        let result = Ok(popular_fixture());

        // Act
        let lines = render_movie_grid(&GridPage::HOME, &result, IMAGE_BASE);

        // Assert
        assert_eq!(lines.len(), 3 + 3 * 2);
        assert!(!lines.iter().any(|l| l.contains('★')));
    }

    #[test]
    fn test_cards_keep_catalog_order() {
        // Arrange
        let result = Ok(popular_fixture());

        // Act
        let lines = render_movie_grid(&GridPage::HOME, &result, IMAGE_BASE);

        // Assert
        let titles: Vec<&str> = lines
            .iter()
            .filter(|l| l.ends_with(']'))
            .map(String::as_str)
            .collect();
        assert_eq!(
            titles,
            [
                "Fight Club [550]",
                "Forrest Gump [13]",
                "Untitled Feature [1184918]"
            ]
        );
    }

    #[test]
    fn test_fallback_messages_name_the_list() {
        // Arrange & Act & Assert
        assert_eq!(
            GridPage::NOW_PLAYING.fallback_message(),
            "Failed to load now playing movies. Please try again later."
        );
        assert_eq!(
            GridPage::HOME.fallback_message(),
            "Failed to load popular movies. Please try again later."
        );
    }
}
