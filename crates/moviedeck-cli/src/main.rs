//! moviedeck - browse TMDB movie lists and details in the terminal.

/// Application configuration (TOML).
mod config;
/// Terminal renderings of fetched movies.
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use crate::render::{GridPage, render_movie_detail, render_movie_grid};
use moviedeck_api::tmdb::{
    FetchResult, LocalTmdbApi, MovieDetail, MovieList, MovieSummary, TmdbClient,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands, one per page.
#[derive(Subcommand)]
enum Commands {
    /// Popular movies, posters and titles only.
    Home(ListArgs),
    /// Popular movies with year and rating.
    Popular(ListArgs),
    /// Highest rated movies of all time.
    TopRated(ListArgs),
    /// Movies coming soon to theaters.
    Upcoming(ListArgs),
    /// Movies currently in theaters.
    NowPlaying(ListArgs),
    /// Details for a single movie.
    Movie(MovieArgs),
}

/// Arguments for the list subcommands.
#[derive(clap::Args)]
struct ListArgs {
    /// Print the fetched movies as JSON instead of cards.
    #[arg(long)]
    json: bool,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID (e.g. 550).
    #[arg(long, required = true)]
    id: String,
    /// Print the fetched record as JSON instead of the detail view.
    #[arg(long)]
    json: bool,
}

/// Settings every subcommand needs once config is resolved.
struct Session {
    /// Catalog client.
    client: TmdbClient,
    /// Image CDN base URL.
    image_base: String,
}

/// Loads config and builds the `TmdbClient`.
///
/// The key comes from `TMDB_API_KEY`, falling back to `tmdb.api_key`. A
/// missing key is not an error here; the client reports it per query.
///
/// # Errors
///
/// Returns an error if config cannot be loaded or the client fails to build.
fn build_session(dir: Option<&PathBuf>) -> Result<Session> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let tmdb = &config.tmdb;

    let mut builder = TmdbClient::builder()
        .base_url(tmdb.base_url()?)
        .language(tmdb.language.as_str())
        .revalidate(Duration::from_secs(tmdb.revalidate_secs))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(api_key) = tmdb.resolve_api_key(std::env::var(API_KEY_ENV).ok()) {
        builder = builder.api_key(api_key);
    }
    let client = builder.build().context("failed to build TMDB client")?;

    Ok(Session {
        client,
        image_base: tmdb.image_base_url(),
    })
}

/// Runs the query behind a list page.
#[allow(clippy::future_not_send)]
async fn fetch_list<C: LocalTmdbApi>(
    client: &C,
    list: MovieList,
) -> FetchResult<Vec<MovieSummary>> {
    match list {
        MovieList::Popular => client.popular().await,
        MovieList::TopRated => client.top_rated().await,
        MovieList::Upcoming => client.upcoming().await,
        MovieList::NowPlaying => client.now_playing().await,
    }
}

/// Maps a fetch outcome to the process exit status.
fn exit_code<T>(result: &FetchResult<T>) -> ExitCode {
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Prints rendered lines.
fn emit(lines: &[String]) {
    for line in lines {
        tracing::info!("{line}");
    }
}

/// Runs one of the list subcommands.
///
/// # Errors
///
/// Returns an error if config loading fails or JSON output cannot be produced.
#[instrument(skip_all, fields(list = %page.list))]
async fn run_list(page: &GridPage, args: &ListArgs, dir: Option<&PathBuf>) -> Result<ExitCode> {
    let session = build_session(dir)?;
    let result = fetch_list(&session.client, page.list).await;

    match &result {
        Ok(movies) if args.json => {
            let json = serde_json::to_string_pretty(movies).context("failed to encode movies")?;
            tracing::info!("{json}");
        }
        _ => emit(&render_movie_grid(page, &result, &session.image_base)),
    }

    Ok(exit_code(&result))
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if config loading fails or JSON output cannot be produced.
#[instrument(skip_all, fields(id = %args.id))]
async fn run_movie(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<ExitCode> {
    let session = build_session(dir)?;
    let result: FetchResult<MovieDetail> = session.client.movie_details(&args.id).await;

    match &result {
        Ok(movie) if args.json => {
            let json = serde_json::to_string_pretty(movie).context("failed to encode movie")?;
            tracing::info!("{json}");
        }
        _ => emit(&render_movie_detail(&result, &session.image_base)),
    }

    Ok(exit_code(&result))
}

/// Installs the `fmt` subscriber, plus an OTLP span exporter when
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
fn init_tracing() {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if configuration or output fails. A failed fetch is
/// rendered and reported through the exit status instead.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Home(args) => run_list(&GridPage::HOME, &args, dir).await,
        Commands::Popular(args) => run_list(&GridPage::POPULAR, &args, dir).await,
        Commands::TopRated(args) => run_list(&GridPage::TOP_RATED, &args, dir).await,
        Commands::Upcoming(args) => run_list(&GridPage::UPCOMING, &args, dir).await,
        Commands::NowPlaying(args) => run_list(&GridPage::NOW_PLAYING, &args, dir).await,
        Commands::Movie(args) => run_movie(&args, dir).await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use moviedeck_api::tmdb::FetchError;

    use super::*;

    /// Stub catalog that answers each list with its own title.
    struct StubCatalog;

    fn one_movie(title: &str) -> FetchResult<Vec<MovieSummary>> {
        let json = format!(r#"{{"id":1,"title":"{title}"}}"#);
        Ok(vec![serde_json::from_str(&json).unwrap()])
    }

    impl LocalTmdbApi for StubCatalog {
        async fn popular(&self) -> FetchResult<Vec<MovieSummary>> {
            one_movie("popular")
        }

        async fn top_rated(&self) -> FetchResult<Vec<MovieSummary>> {
            one_movie("top_rated")
        }

        async fn upcoming(&self) -> FetchResult<Vec<MovieSummary>> {
            one_movie("upcoming")
        }

        async fn now_playing(&self) -> FetchResult<Vec<MovieSummary>> {
            Err(FetchError::MissingCredential)
        }

        async fn movie_details(&self, id: &str) -> FetchResult<MovieDetail> {
            Err(FetchError::NotFound {
                id: String::from(id),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_list_dispatches_by_list() {
        // Arrange
        let catalog = StubCatalog;

        // Act
        let popular = fetch_list(&catalog, MovieList::Popular).await.unwrap();
        let top_rated = fetch_list(&catalog, MovieList::TopRated).await.unwrap();
        let upcoming = fetch_list(&catalog, MovieList::Upcoming).await.unwrap();
        let now_playing = fetch_list(&catalog, MovieList::NowPlaying).await;

        // Assert
        assert_eq!(popular[0].title, "popular");
        assert_eq!(top_rated[0].title, "top_rated");
        assert_eq!(upcoming[0].title, "upcoming");
        assert!(now_playing.is_err());
    }

    #[tokio::test]
    async fn test_exit_code_follows_fetch_outcome() {
        // Arrange
        let catalog = StubCatalog;

        // Act
        let ok = fetch_list(&catalog, MovieList::Popular).await;
        let failed = catalog.movie_details("42").await;

        // Assert
        assert_eq!(
            format!("{:?}", exit_code(&ok)),
            format!("{:?}", ExitCode::SUCCESS)
        );
        assert_eq!(
            format!("{:?}", exit_code(&failed)),
            format!("{:?}", ExitCode::FAILURE)
        );
    }

    #[test]
    fn test_build_session_with_dir_and_no_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();

        // Act
        let session = build_session(Some(&path)).unwrap();

        // Assert
        assert_eq!(session.image_base, "https://image.tmdb.org/t/p/");
    }

    #[test]
    fn test_build_session_rejects_bad_base_url() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[tmdb]\nbase_url = \"not a url\"\n",
        )
        .unwrap();
        let path = dir.path().to_path_buf();

        // Act
        let result = build_session(Some(&path));

        // Assert
        assert!(result.is_err());
    }
}
