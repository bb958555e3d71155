//! Per-title enrichment: external IDs and alternate-language titles.
#![allow(clippy::future_not_send)]

use streamscout_api::tmdb::{ListingItem, LocalTmdbApi, MediaKind, TmdbExternalIds};

use crate::config::region_language;

/// Language used for the secondary title.
const ENGLISH: &str = "en-US";

/// Extra details fetched for an accepted title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Title to show first.
    pub title: String,
    /// English title (falls back to the original title).
    pub english_title: String,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// TheTVDB ID.
    pub tvdb_id: Option<u64>,
}

/// Fetches enrichment data for accepted titles.
///
/// Every lookup is best effort: failures are logged at debug level and
/// replaced with fallbacks.
#[derive(Debug)]
pub struct Enricher<'a, A> {
    api: &'a A,
    kind: MediaKind,
    regional_language: Option<String>,
}

impl<'a, A: LocalTmdbApi> Enricher<'a, A> {
    /// Creates an enricher that keeps the listing title.
    #[must_use]
    pub const fn new(api: &'a A, kind: MediaKind) -> Self {
        Self {
            api,
            kind,
            regional_language: None,
        }
    }

    /// Replaces the listing title with the title in the region's language.
    #[must_use]
    pub fn with_regional_titles(mut self, region: &str) -> Self {
        self.regional_language = Some(region_language(region));
        self
    }

    /// Fetches external IDs and titles for one item.
    pub async fn enrich(&self, item: &ListingItem) -> Enrichment {
        let ids = match self.api.external_ids(self.kind, item.id).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::debug!(id = item.id, "External ID lookup failed: {e:#}");
                TmdbExternalIds::default()
            }
        };

        let english_title = self
            .localized(item.id, ENGLISH)
            .await
            .unwrap_or_else(|| String::from(item.original_display_title()));

        let title = match self.regional_language.as_deref() {
            Some(language) => self.localized(item.id, language).await,
            None => None,
        }
        .unwrap_or_else(|| String::from(item.display_title()));

        Enrichment {
            title,
            english_title,
            imdb_id: ids.imdb_id,
            tvdb_id: ids.tvdb_id,
        }
    }

    /// Non-empty localized title, or `None` on failure.
    async fn localized(&self, id: u64, language: &str) -> Option<String> {
        match self.api.localized_title(self.kind, id, language).await {
            Ok(title) if !title.is_empty() => Some(title),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(id, language, "Localized title lookup failed: {e:#}");
                None
            }
        }
    }
}
