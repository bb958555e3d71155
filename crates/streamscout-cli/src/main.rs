//! streamscout - find well-rated movies and shows on your streaming providers.
#![allow(clippy::future_not_send)]

/// Application configuration (defaults, TOML, environment).
mod config;
/// Terminal rendering.
mod display;
/// Per-title enrichment.
mod enrich;

use std::io::{self, Write};
use std::path::PathBuf;
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

use crate::config::{AppConfig, FilterSettings};
use crate::display::{
    Palette, TitleRecord, write_actor_rows, write_criteria, write_genre_table,
    write_search_complete, write_search_no_results, write_separator, write_summary,
};
use crate::enrich::Enricher;
use streamscout_api::tmdb::{
    ListingItem, LocalTmdbApi, MediaKind, SearchMovieParams, TmdbClient, TmdbGenre,
    TmdbListingResponse, TmdbPerson, search_person_pages,
};
use streamscout_core::processor::{
    DEFAULT_MAX_RESULTS, FilterCriteria, ListingProcessor, ProcessOutcome, SearchLimits,
    TmdbAvailability,
};

/// Maximum number of people listed.
const MAX_ACTORS_LISTED: usize = 15;

/// Maximum number of person search pages fetched.
const MAX_PERSON_PAGES: u32 = 5;

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

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Find top-rated movies available on your streaming providers.
    Top(FilterArgs),
    /// Find popular movies available on your streaming providers.
    Popular(FilterArgs),
    /// Find top-rated TV shows available on your streaming providers.
    Shows(FilterArgs),
    /// Search for movies by title.
    Search(SearchArgs),
    /// List all available movie genres.
    Genres(GenresArgs),
    /// Find an actor's filmography with streaming availability.
    Actor(ActorArgs),
}

/// Filter flags shared by the listing commands. Unset flags fall back to configuration.
#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Comma-separated providers (e.g. "Netflix,AmazonPrime").
    #[arg(short = 'p', long)]
    providers: Option<String>,

    /// Watch region (ISO 3166-1, e.g. "DE").
    #[arg(short = 'r', long)]
    region: Option<String>,

    /// Minimum rating (inclusive).
    #[arg(long)]
    min_rating: Option<f64>,

    /// Minimum vote count (inclusive).
    #[arg(long)]
    min_votes: Option<u32>,

    /// Request timeout in seconds.
    #[arg(short = 'T', long)]
    timeout: Option<u64>,

    /// Filter by genre (name or ID).
    #[arg(long)]
    genre: Option<String>,
}

impl FilterArgs {
    /// Applies the flags over the configured defaults.
    fn resolve(&self, config: &AppConfig) -> FilterSettings {
        FilterSettings {
            region: self
                .region
                .clone()
                .unwrap_or_else(|| config.filter.region.clone()),
            providers: self
                .providers
                .clone()
                .unwrap_or_else(|| config.filter.providers.clone()),
            min_rating: self.min_rating.unwrap_or(config.filter.min_rating),
            min_votes: self.min_votes.unwrap_or(config.filter.min_votes),
            timeout_secs: self.timeout.unwrap_or(config.tmdb.timeout_secs),
            genre: self.genre.clone().unwrap_or_default(),
        }
    }
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Title to search for.
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Maximum results to display.
    #[arg(long, default_value_t = 20)]
    max: u32,

    /// Filter flags.
    #[command(flatten)]
    filter: FilterArgs,
}

/// Arguments for the `genres` subcommand.
#[derive(clap::Args, Debug)]
struct GenresArgs {
    /// Language for genre names.
    #[arg(short = 'l', long, default_value = "de-DE")]
    language: String,
}

/// Arguments for the `actor` subcommand.
#[derive(clap::Args, Debug, Default)]
struct ActorArgs {
    /// Actor name. Lists popular actors when omitted.
    name: Option<String>,

    /// Position in the match list (1-based).
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    index: Option<u32>,

    /// List matching actors instead of showing a filmography.
    #[arg(long)]
    list: bool,

    /// Filter flags.
    #[command(flatten)]
    filter: FilterArgs,
}

/// Listing endpoints walked by `top`, `popular` and `shows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    TopMovies,
    PopularMovies,
    TopShows,
}

impl Listing {
    const fn kind(self) -> MediaKind {
        match self {
            Self::TopMovies | Self::PopularMovies => MediaKind::Movie,
            Self::TopShows => MediaKind::Tv,
        }
    }

    const fn heading(self) -> &'static str {
        match self {
            Self::TopMovies => "Top Rated Movies",
            Self::PopularMovies => "Popular Movies",
            Self::TopShows => "Top Rated TV Shows",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::TopMovies => "top-rated movies",
            Self::PopularMovies => "popular movies",
            Self::TopShows => "top-rated TV shows",
        }
    }

    const fn noun(self) -> &'static str {
        match self {
            Self::TopMovies | Self::PopularMovies => "movies",
            Self::TopShows => "TV shows",
        }
    }

    /// Movie listings show the title in the region's language.
    const fn regional_titles(self) -> bool {
        matches!(self, Self::TopMovies | Self::PopularMovies)
    }

    async fn fetch(
        self,
        api: &impl LocalTmdbApi,
        page: u32,
        language: &str,
    ) -> Result<TmdbListingResponse> {
        match self {
            Self::TopMovies | Self::TopShows => api.top_rated(self.kind(), page, language).await,
            Self::PopularMovies => api.popular(self.kind(), page, language).await,
        }
    }
}

/// Builds a TMDB client from the configured credential.
///
/// # Errors
///
/// Returns an error if no credential is configured or the client fails to build.
fn build_tmdb_client(config: &AppConfig, timeout_secs: u64) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(ref token) = config.tmdb.api_token {
        builder = builder.api_token(token);
    }
    if let Some(ref key) = config.tmdb.api_key {
        builder = builder.api_key(key);
    }
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build().context("failed to build TMDB client")
}

/// Fetches the genre list, degrading to an empty list on failure.
async fn load_genres(api: &impl LocalTmdbApi, kind: MediaKind, language: &str) -> Vec<TmdbGenre> {
    match api.genres(kind, language).await {
        Ok(list) => list.genres,
        Err(e) => {
            tracing::warn!("Failed to load genres, genre filter disabled: {e:#}");
            Vec::new()
        }
    }
}

/// Walks a listing and prints every accepted title.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
async fn show_listing<A: LocalTmdbApi, W: Write>(
    api: &A,
    listing: Listing,
    settings: &FilterSettings,
    limits: SearchLimits,
    palette: Palette,
    out: &mut W,
) -> Result<ProcessOutcome> {
    let kind = listing.kind();
    let language = settings.language();
    let criteria = settings.criteria(load_genres(api, kind, &language).await);

    writeln!(out, "Searching TMDb's {}...", listing.heading())?;
    write_criteria(out, settings)?;

    let lookup = TmdbAvailability::new(api, kind);
    let mut enricher = Enricher::new(api, kind);
    if listing.regional_titles() {
        enricher = enricher.with_regional_titles(&settings.region);
    }

    let mut number = 0_u32;
    let outcome = ListingProcessor::new(&lookup, &criteria, limits)
        .process(
            async |page: u32| -> Result<TmdbListingResponse> {
                listing.fetch(api, page, &language).await
            },
            async |item: &ListingItem, providers: &[String], genres: &[String]| -> Result<()> {
                number = number.saturating_add(1);
                let enrichment = enricher.enrich(item).await;
                TitleRecord::new(number, kind, item, enrichment, providers, genres)
                    .write_to(&mut *out, palette)?;
                Ok(())
            },
        )
        .await;

    write_summary(
        out,
        palette,
        listing.label(),
        listing.noun(),
        outcome.accepted,
    )?;
    Ok(outcome)
}

/// Searches movies by title and prints every accepted result.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
async fn show_search<A: LocalTmdbApi, W: Write>(
    api: &A,
    query: &str,
    max: u32,
    settings: &FilterSettings,
    palette: Palette,
    out: &mut W,
) -> Result<ProcessOutcome> {
    let language = settings.language();
    let criteria = settings.criteria(load_genres(api, MediaKind::Movie, &language).await);

    writeln!(out, "Searching for: \"{query}\"")?;
    write_criteria(out, settings)?;

    let lookup = TmdbAvailability::new(api, MediaKind::Movie);
    let enricher = Enricher::new(api, MediaKind::Movie);
    let limits = SearchLimits {
        max_results: max,
        ..SearchLimits::default()
    };

    let mut number = 0_u32;
    let outcome = ListingProcessor::new(&lookup, &criteria, limits)
        .process(
            async |page: u32| -> Result<TmdbListingResponse> {
                let params = SearchMovieParams::new(query)
                    .language(language.as_str())
                    .region(settings.region.to_uppercase())
                    .page(page);
                api.search_movie(&params).await
            },
            async |item: &ListingItem, providers: &[String], genres: &[String]| -> Result<()> {
                number = number.saturating_add(1);
                let enrichment = enricher.enrich(item).await;
                TitleRecord::new(number, MediaKind::Movie, item, enrichment, providers, genres)
                    .write_to(&mut *out, palette)?;
                Ok(())
            },
        )
        .await;

    if outcome.pages_fetched > 0 && outcome.items_evaluated == 0 {
        write_separator(out, palette)?;
        writeln!(out, "No movies found for \"{query}\"")?;
    } else if outcome.accepted == 0 {
        write_search_no_results(out, palette, query, outcome.items_evaluated, settings)?;
    } else {
        write_search_complete(out, palette, outcome.accepted, outcome.items_evaluated)?;
    }
    Ok(outcome)
}

/// Prints the movie genre table.
///
/// # Errors
///
/// Returns an error if the genre request fails or writing to `out` fails.
async fn show_genres<A: LocalTmdbApi, W: Write>(
    api: &A,
    language: &str,
    palette: Palette,
    out: &mut W,
) -> Result<()> {
    let list = api
        .genres(MediaKind::Movie, language)
        .await
        .context("TMDB genre list request failed")?;

    if list.genres.is_empty() {
        writeln!(out, "No genres found.")?;
        return Ok(());
    }
    write_genre_table(out, palette, &list.genres)?;
    Ok(())
}

/// Resolves an actor and prints the filmography, or a list of candidates.
///
/// # Errors
///
/// Returns an error if a people or credits request fails or writing to `out` fails.
async fn show_actor<A: LocalTmdbApi + Sync, W: Write>(
    api: &A,
    args: &ActorArgs,
    settings: &FilterSettings,
    palette: Palette,
    out: &mut W,
) -> Result<()> {
    let language = settings.language();

    let Some(name) = args.name.as_deref().filter(|n| !n.is_empty()) else {
        return show_popular_people(api, &language, palette, out).await;
    };

    writeln!(out, "Searching for actor: {name}\n")?;
    let mut people = search_person_pages(api, name, &language, MAX_PERSON_PAGES)
        .await
        .context("TMDB person search failed")?;

    if people.is_empty() {
        writeln!(out, "No actors found matching '{name}'")?;
        return Ok(());
    }
    people.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

    if let Some(index) = args.index {
        let selected = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| people.get(i));
        let Some(person) = selected else {
            writeln!(
                out,
                "Invalid actor index: {index}. Found only {} actors matching '{name}' (use 1-{})",
                people.len(),
                people.len()
            )?;
            write_actor_rows(out, palette, &people, MAX_ACTORS_LISTED)?;
            return Ok(());
        };
        show_filmography(api, person, settings, palette, out).await?;
        return Ok(());
    }

    if args.list {
        write_actor_rows(out, palette, &people, MAX_ACTORS_LISTED)?;
        return Ok(());
    }

    match people.as_slice() {
        [person] => {
            show_filmography(api, person, settings, palette, out).await?;
        }
        _ => {
            writeln!(
                out,
                "Found {} actors matching '{name}'. Did you mean one of these?\n",
                people.len()
            )?;
            write_actor_rows(out, palette, &people, MAX_ACTORS_LISTED)?;
            writeln!(
                out,
                "\nTo view filmography, use:\n  streamscout actor \"{name}\" 1\n"
            )?;
        }
    }
    Ok(())
}

/// Prints the most popular people.
async fn show_popular_people<A: LocalTmdbApi, W: Write>(
    api: &A,
    language: &str,
    palette: Palette,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Popular actors:")?;
    let mut people = api
        .popular_people(language, 1)
        .await
        .context("TMDB popular people request failed")?
        .results;

    if people.is_empty() {
        writeln!(out, "No popular actors found.")?;
        return Ok(());
    }
    people.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

    let shown = write_actor_rows(out, palette, &people, MAX_ACTORS_LISTED)?;
    writeln!(out, "Showing top {shown} popular actors")?;
    Ok(())
}

/// Filters and prints one person's movie credits.
async fn show_filmography<A: LocalTmdbApi, W: Write>(
    api: &A,
    person: &TmdbPerson,
    settings: &FilterSettings,
    palette: Palette,
    out: &mut W,
) -> Result<ProcessOutcome> {
    let language = settings.language();
    writeln!(
        out,
        "Found: {} (TMDb ID: {})",
        palette.title(&person.name),
        person.id
    )?;
    writeln!(out, "Fetching filmography...\n")?;

    let credits = api
        .person_movie_credits(person.id, &language)
        .await
        .context("TMDB movie credits request failed")?;
    if credits.cast.is_empty() {
        writeln!(out, "No movie credits found.")?;
        return Ok(ProcessOutcome::default());
    }

    let criteria: FilterCriteria =
        settings.criteria(load_genres(api, MediaKind::Movie, &language).await);
    write_criteria(out, settings)?;

    let total_results = u32::try_from(credits.cast.len()).unwrap_or(u32::MAX);
    let mut credits_page = Some(TmdbListingResponse {
        page: 1,
        results: credits.cast,
        total_pages: 1,
        total_results,
    });
    let limits = SearchLimits {
        max_pages: 1,
        max_results: DEFAULT_MAX_RESULTS,
    };
    let lookup = TmdbAvailability::new(api, MediaKind::Movie);
    let enricher =
        Enricher::new(api, MediaKind::Movie).with_regional_titles(&settings.region);

    let mut number = 0_u32;
    let outcome = ListingProcessor::new(&lookup, &criteria, limits)
        .process(
            async |_page: u32| -> Result<TmdbListingResponse> {
                credits_page.take().context("filmography already processed")
            },
            async |item: &ListingItem, providers: &[String], genres: &[String]| -> Result<()> {
                number = number.saturating_add(1);
                let enrichment = enricher.enrich(item).await;
                TitleRecord::new(number, MediaKind::Movie, item, enrichment, providers, genres)
                    .write_to(&mut *out, palette)?;
                Ok(())
            },
        )
        .await;

    write_separator(out, palette)?;
    if outcome.accepted == 0 {
        writeln!(out, "No movies found for {}.", person.name)?;
        writeln!(
            out,
            "(Checked {} movies meeting criteria)",
            outcome.qualified
        )?;
    } else {
        writeln!(
            out,
            "Found {} movies starring {}.",
            outcome.accepted, person.name
        )?;
    }
    Ok(outcome)
}

/// Runs the `top`, `popular` or `shows` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or output cannot be written.
#[instrument(skip_all)]
async fn run_listing(listing: Listing, args: &FilterArgs, config: &AppConfig) -> Result<()> {
    let settings = args.resolve(config);
    let client = build_tmdb_client(config, settings.timeout_secs)?;
    let mut out = io::stdout().lock();
    show_listing(
        &client,
        listing,
        &settings,
        SearchLimits::default(),
        Palette::detect(),
        &mut out,
    )
    .await?;
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or output cannot be written.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let settings = args.filter.resolve(config);
    let client = build_tmdb_client(config, settings.timeout_secs)?;
    let query = args.query.join(" ");
    let mut out = io::stdout().lock();
    show_search(
        &client,
        &query,
        args.max,
        &settings,
        Palette::detect(),
        &mut out,
    )
    .await?;
    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_genres(args: &GenresArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config, config.tmdb.timeout_secs)?;
    let mut out = io::stdout().lock();
    show_genres(&client, &args.language, Palette::detect(), &mut out).await
}

/// Runs the `actor` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or an API request fails.
#[instrument(skip_all)]
async fn run_actor(args: &ActorArgs, config: &AppConfig) -> Result<()> {
    let settings = args.filter.resolve(config);
    let client = build_tmdb_client(config, settings.timeout_secs)?;
    let mut out = io::stdout().lock();
    show_actor(&client, args, &settings, Palette::detect(), &mut out).await
}

/// Default log filter when `RUST_LOG` is unset.
const fn default_log_filter(debug: bool) -> &'static str {
    if debug {
        "debug,streamscout_api=trace"
    } else {
        "info"
    }
}

/// Initializes the tracing subscriber. Logs go to stderr; stdout carries results.
fn init_tracing(debug: bool) {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_log_filter(debug))),
            )
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_log_filter(debug)));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr);

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
/// Returns an error if configuration is invalid or subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Warnings raised while loading config go to stderr before the real subscriber exists.
    let bootstrap = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    let config =
        tracing::subscriber::with_default(bootstrap, || AppConfig::resolve(cli.dir.as_ref()))?;
    init_tracing(config.debug);

    match cli.command {
        Commands::Top(args) => run_listing(Listing::TopMovies, &args, &config).await,
        Commands::Popular(args) => run_listing(Listing::PopularMovies, &args, &config).await,
        Commands::Shows(args) => run_listing(Listing::TopShows, &args, &config).await,
        Commands::Search(args) => run_search(&args, &config).await,
        Commands::Genres(args) => run_genres(&args, &config).await,
        Commands::Actor(args) => run_actor(&args, &config).await,
    }
}
