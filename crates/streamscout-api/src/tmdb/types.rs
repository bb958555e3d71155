//! TMDB API response types and search parameters.

use std::collections::HashMap;

use serde::Deserialize;

// --- Media kind ---

/// Selects between the movie and TV variants of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// `movie/...` endpoints.
    Movie,
    /// `tv/...` endpoints.
    Tv,
}

impl MediaKind {
    /// Path segment used in API URLs (`movie` or `tv`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Public TMDB web page for the given ID.
    #[must_use]
    pub fn web_url(self, id: u64) -> String {
        format!("https://www.themoviedb.org/{}/{id}", self.path_segment())
    }
}

// --- Listings (top rated, popular, search, credits) ---

/// Paginated response shared by listing and search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbListingResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Entries on this page, in upstream order.
    #[serde(default)]
    pub results: Vec<ListingItem>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single movie or TV show entry from a listing.
///
/// Movies carry `title`/`release_date`, shows carry `name`/`first_air_date`.
/// Both shapes deserialize into this struct.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingItem {
    /// TMDB ID.
    pub id: u64,
    /// Localized movie title.
    pub title: Option<String>,
    /// Localized show name.
    pub name: Option<String>,
    /// Original movie title.
    pub original_title: Option<String>,
    /// Original show name.
    pub original_name: Option<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD, empty or null).
    pub release_date: Option<String>,
    /// First air date (YYYY-MM-DD, empty or null).
    pub first_air_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Embedded genre objects (details and some credit payloads).
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Character played (person credits only).
    pub character: Option<String>,
}

/// Returns the string if it is present and non-empty.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl ListingItem {
    /// Title used for display: the movie title, falling back to the show name.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_ref())
            .or_else(|| non_empty(self.name.as_ref()))
            .unwrap_or_default()
    }

    /// Original-language title, falling back to the original show name.
    #[must_use]
    pub fn original_display_title(&self) -> &str {
        non_empty(self.original_title.as_ref())
            .or_else(|| non_empty(self.original_name.as_ref()))
            .unwrap_or_default()
    }

    /// Four-digit year of the release date, or of the first air date when
    /// there is no release date.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        let date = non_empty(self.release_date.as_ref())
            .or_else(|| non_empty(self.first_air_date.as_ref()))?;
        date.get(..4)
    }

    /// Year formatted as `(YYYY)`, or an empty string.
    #[must_use]
    pub fn year_label(&self) -> String {
        self.year()
            .map_or_else(String::new, |year| format!("({year})"))
    }
}

// --- Genres ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/{kind}/list` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbGenreList {
    /// All genres for the requested media kind.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

// --- Watch providers ---

/// A single streaming/rental/purchase provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchProvider {
    /// TMDB provider ID.
    #[serde(default)]
    pub provider_id: u32,
    /// Display name (e.g. "Netflix").
    pub provider_name: String,
}

impl WatchProvider {
    /// Creates a provider entry with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            provider_id: 0,
            provider_name: name.into(),
        }
    }
}

/// Provider tiers for one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegionProviders {
    /// JustWatch landing page for the title.
    pub link: Option<String>,
    /// Subscription providers.
    #[serde(default)]
    pub flatrate: Vec<WatchProvider>,
    /// Rental providers.
    #[serde(default)]
    pub rent: Vec<WatchProvider>,
    /// Purchase providers.
    #[serde(default)]
    pub buy: Vec<WatchProvider>,
}

/// Response from `{kind}/{id}/watch/providers` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbWatchProvidersResponse {
    /// TMDB ID.
    pub id: u64,
    /// Provider tiers keyed by region code (ISO 3166-1).
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

// --- Details / external IDs ---

/// External IDs of a movie or show.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbExternalIds {
    /// TMDB ID.
    #[serde(default)]
    pub id: u64,
    /// IMDb ID (e.g. "tt0111161").
    pub imdb_id: Option<String>,
    /// TheTVDB series ID (shows only).
    pub tvdb_id: Option<u64>,
}

/// Minimal details payload used to read a localized title.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbTitleDetails {
    /// Movie title.
    pub title: Option<String>,
    /// Show name.
    pub name: Option<String>,
}

// --- People ---

/// A person entry from search or popular listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbPerson {
    /// TMDB person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Titles the person is known for.
    #[serde(default)]
    pub known_for: Vec<ListingItem>,
}

/// Response from `search/person` and `person/popular` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbPersonSearchResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// People on this page.
    #[serde(default)]
    pub results: Vec<TmdbPerson>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// Response from `person/{id}/movie_credits` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbPersonCredits {
    /// TMDB person ID.
    #[serde(default)]
    pub id: u64,
    /// Movies the person acted in.
    #[serde(default)]
    pub cast: Vec<ListingItem>,
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
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by year.
    pub year: Option<u32>,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            year: None,
            region: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}
