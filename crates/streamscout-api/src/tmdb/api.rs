//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    MediaKind, RegionProviders, SearchMovieParams, TmdbExternalIds, TmdbGenreList,
    TmdbListingResponse, TmdbPersonCredits, TmdbPersonSearchResponse,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches one page of the top-rated listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated(
        &self,
        kind: MediaKind,
        page: u32,
        language: &str,
    ) -> Result<TmdbListingResponse>;

    /// Fetches one page of the popular listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular(&self, kind: MediaKind, page: u32, language: &str)
    -> Result<TmdbListingResponse>;

    /// Searches for movies by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbListingResponse>;

    /// Fetches the genre list for a media kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genres(&self, kind: MediaKind, language: &str) -> Result<TmdbGenreList>;

    /// Fetches provider tiers for one title in one region.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails, or
    /// the response has no entry for `region`.
    async fn watch_providers(
        &self,
        kind: MediaKind,
        id: u64,
        region: &str,
    ) -> Result<RegionProviders>;

    /// Fetches IMDb/TVDB IDs for a title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn external_ids(&self, kind: MediaKind, id: u64) -> Result<TmdbExternalIds>;

    /// Fetches the title (movies) or name (shows) in the given language.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn localized_title(&self, kind: MediaKind, id: u64, language: &str) -> Result<String>;

    /// Searches for people by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_person(
        &self,
        query: &str,
        language: &str,
        page: u32,
    ) -> Result<TmdbPersonSearchResponse>;

    /// Fetches one page of popular people.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_people(&self, language: &str, page: u32) -> Result<TmdbPersonSearchResponse>;

    /// Fetches the movie credits of a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person_movie_credits(&self, person_id: u64, language: &str)
    -> Result<TmdbPersonCredits>;
}
