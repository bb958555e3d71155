//! Paginated fetch-filter processor.
//!
//! Walks a paginated TMDB listing page by page, applies the rating, genre
//! and provider filters to every item and hands accepted items to a
//! consumer. Failures of a single page, lookup or consumer call are
//! logged and absorbed; a run always completes.
#![allow(clippy::future_not_send)]

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use streamscout_api::tmdb::{
    ListingItem, LocalTmdbApi, MediaKind, RegionProviders, TmdbGenre, TmdbListingResponse,
};

use crate::filters::{
    ProviderAvailability, build_genre_map, check_availability, filter_by_genre,
    meets_rating_criteria, parse_providers, resolve_genre_names,
};

/// Default number of listing pages to walk.
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Default number of accepted items per run.
pub const DEFAULT_MAX_RESULTS: u32 = 40;

/// Looks up the provider tiers of a title in one region.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(AvailabilityLookup: Send)]
pub trait LocalAvailabilityLookup {
    /// Returns the provider tiers for `item_id` in `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or the region has no data.
    async fn region_providers(&self, item_id: u64, region: &str) -> Result<RegionProviders>;
}

/// Availability lookup backed by the TMDB watch-providers endpoint.
#[derive(Debug)]
pub struct TmdbAvailability<'a, A> {
    api: &'a A,
    kind: MediaKind,
}

impl<'a, A: LocalTmdbApi> TmdbAvailability<'a, A> {
    /// Creates a lookup for titles of the given media kind.
    #[must_use]
    pub const fn new(api: &'a A, kind: MediaKind) -> Self {
        Self { api, kind }
    }
}

impl<A: LocalTmdbApi> LocalAvailabilityLookup for TmdbAvailability<'_, A> {
    async fn region_providers(&self, item_id: u64, region: &str) -> Result<RegionProviders> {
        self.api.watch_providers(self.kind, item_id, region).await
    }
}

/// Filter settings for one run. Not modified while processing.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Minimum average rating (inclusive).
    pub min_rating: f64,
    /// Minimum vote count (inclusive).
    pub min_votes: u32,
    /// Genre selector (ID or name). Empty disables the genre filter.
    pub genre: String,
    /// Normalized desired provider tokens.
    pub providers: HashSet<String>,
    /// Genre list used to resolve names.
    pub genres: Vec<TmdbGenre>,
    /// Lowercased genre name to ID.
    pub genre_map: HashMap<String, u32>,
    /// Watch region (ISO 3166-1).
    pub region: String,
}

impl FilterCriteria {
    /// Creates criteria from a raw comma-separated provider list.
    #[must_use]
    pub fn new(min_rating: f64, min_votes: u32, providers: &str, region: impl Into<String>) -> Self {
        Self {
            min_rating,
            min_votes,
            providers: parse_providers(providers),
            region: region.into(),
            ..Self::default()
        }
    }

    /// Sets the genre selector.
    #[must_use]
    pub fn with_genre(mut self, selector: impl Into<String>) -> Self {
        self.genre = selector.into();
        self
    }

    /// Sets the genre list and rebuilds the name map.
    #[must_use]
    pub fn with_genres(mut self, genres: Vec<TmdbGenre>) -> Self {
        self.genre_map = build_genre_map(&genres);
        self.genres = genres;
        self
    }
}

/// Upper bounds on the work done by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of pages to fetch.
    pub max_pages: u32,
    /// Maximum number of accepted items.
    pub max_results: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Pages fetched successfully.
    pub pages_fetched: u32,
    /// Items examined by the filters.
    pub items_evaluated: u32,
    /// Items that met the rating and vote minimums.
    pub qualified: u32,
    /// Items handed to the consumer.
    pub accepted: u32,
}

/// Single-use processor for one paginated listing.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ListingProcessor<'a, L> {
    lookup: &'a L,
    criteria: &'a FilterCriteria,
    limits: SearchLimits,
}

impl<'a, L: LocalAvailabilityLookup> ListingProcessor<'a, L> {
    /// Creates a processor.
    #[must_use]
    pub const fn new(lookup: &'a L, criteria: &'a FilterCriteria, limits: SearchLimits) -> Self {
        Self {
            lookup,
            criteria,
            limits,
        }
    }

    /// Walks pages `1..=max_pages` and calls `on_match` for every accepted item.
    ///
    /// The result cap is checked before each page and before each item, so
    /// no page is fetched once the cap is reached. Stops after the page
    /// whose number reaches `total_pages`.
    ///
    /// `on_match` receives the item, the matching provider names and the
    /// resolved genre names.
    pub async fn process<F, C>(self, mut fetch_page: F, mut on_match: C) -> ProcessOutcome
    where
        F: AsyncFnMut(u32) -> Result<TmdbListingResponse>,
        C: AsyncFnMut(&ListingItem, &[String], &[String]) -> Result<()>,
    {
        let mut outcome = ProcessOutcome::default();

        for page in 1..=self.limits.max_pages {
            if outcome.accepted >= self.limits.max_results {
                break;
            }

            tracing::info!(page, "Fetching page");
            let response = match fetch_page(page).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(page, "Failed to fetch page: {e:#}");
                    continue;
                }
            };
            outcome.pages_fetched = outcome.pages_fetched.saturating_add(1);

            for item in &response.results {
                if outcome.accepted >= self.limits.max_results {
                    break;
                }
                outcome.items_evaluated = outcome.items_evaluated.saturating_add(1);

                if !meets_rating_criteria(
                    item.vote_average,
                    item.vote_count,
                    self.criteria.min_rating,
                    self.criteria.min_votes,
                ) {
                    continue;
                }
                outcome.qualified = outcome.qualified.saturating_add(1);

                let Some(availability) = self.evaluate(item).await else {
                    continue;
                };

                outcome.accepted = outcome.accepted.saturating_add(1);
                let genre_names = resolve_genre_names(&item.genre_ids, &self.criteria.genres);
                if let Err(e) = on_match(item, &availability.providers, &genre_names).await {
                    tracing::warn!(id = item.id, "Failed to handle match: {e:#}");
                }
            }

            if page >= response.total_pages {
                break;
            }
        }

        outcome
    }

    /// Runs the genre and provider filters on an item that met the rating
    /// minimums. Returns the matching providers when accepted.
    async fn evaluate(&self, item: &ListingItem) -> Option<ProviderAvailability> {
        let criteria = self.criteria;

        if !criteria.genre.is_empty() && !filter_by_genre(item, &criteria.genre, &criteria.genre_map)
        {
            return None;
        }

        let region_providers = match self
            .lookup
            .region_providers(item.id, &criteria.region)
            .await
        {
            Ok(providers) => providers,
            Err(e) => {
                tracing::debug!(id = item.id, "Provider lookup failed: {e:#}");
                return None;
            }
        };

        let availability = check_availability(&region_providers, &criteria.providers);
        availability.is_available().then_some(availability)
    }
}
