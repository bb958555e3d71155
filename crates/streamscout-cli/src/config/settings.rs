//! Effective per-command filter settings.

use streamscout_api::tmdb::TmdbGenre;
use streamscout_core::processor::FilterCriteria;

/// Builds the TMDB language tag for a region (`de` / `DE` -> `de-DE`).
#[must_use]
pub fn region_language(region: &str) -> String {
    format!("{}-{}", region.to_lowercase(), region.to_uppercase())
}

/// Filter values after applying command-line flags over the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    /// Watch region as given.
    pub region: String,
    /// Raw comma-separated provider list.
    pub providers: String,
    /// Minimum rating.
    pub min_rating: f64,
    /// Minimum vote count.
    pub min_votes: u32,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Genre selector (empty = no genre filter).
    pub genre: String,
}

impl FilterSettings {
    /// Response language derived from the region.
    #[must_use]
    pub fn language(&self) -> String {
        region_language(&self.region)
    }

    /// Builds the processor criteria with the given genre list.
    #[must_use]
    pub fn criteria(&self, genres: Vec<TmdbGenre>) -> FilterCriteria {
        FilterCriteria::new(
            self.min_rating,
            self.min_votes,
            &self.providers,
            self.region.to_uppercase(),
        )
        .with_genre(self.genre.clone())
        .with_genres(genres)
    }
}
