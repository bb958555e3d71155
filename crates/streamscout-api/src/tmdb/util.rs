//! TMDB API utility functions.

use anyhow::{Context, Result};
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::types::TmdbPerson;

/// Searches people by name across several result pages.
///
/// Fetches page 1, then pages `2..=min(max_pages, total_pages)`, and
/// concatenates the results in page order.
///
/// # Errors
///
/// Returns an error if any page request fails.
#[instrument(skip_all)]
pub async fn search_person_pages(
    api: &(impl LocalTmdbApi + Sync),
    query: &str,
    language: &str,
    max_pages: u32,
) -> Result<Vec<TmdbPerson>> {
    let first = api
        .search_person(query, language, 1)
        .await
        .with_context(|| format!("person search failed on page 1 (query: {query})"))?;

    let last_page = max_pages.min(first.total_pages);
    let mut people = first.results;

    for page in 2..=last_page {
        tracing::debug!(page, "person search request");
        let response = api
            .search_person(query, language, page)
            .await
            .with_context(|| format!("person search failed on page {page} (query: {query})"))?;
        people.extend(response.results);
    }

    tracing::debug!(
        total = people.len(),
        pages = last_page.max(1),
        "person search completed"
    );

    Ok(people)
}
