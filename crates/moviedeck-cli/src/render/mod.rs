//! Terminal renderings of movie lists and movie details.
//!
//! Every function returns the lines to print; failures render as a fixed
//! fallback instead of an error.

mod detail;
mod format;
mod grid;

pub use detail::render_movie_detail;
pub use grid::{GridPage, render_movie_grid};
