//! Filter predicates applied to listing items.
//!
//! Everything here is pure: no I/O and no failure modes.

use std::collections::{HashMap, HashSet};

use streamscout_api::tmdb::{ListingItem, RegionProviders, TmdbGenre};

/// Provider tokens that match any "Amazon Prime Video" variant.
const AMAZON_ALIASES: [&str; 2] = ["amazon", "amazonprime"];

/// Substring identifying Amazon Prime Video provider names.
const AMAZON_PRIME_VIDEO: &str = "amazon prime video";

/// Desired providers found in the subscription tier of one title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderAvailability {
    /// Matching provider names in upstream order.
    pub providers: Vec<String>,
}

impl ProviderAvailability {
    /// Whether at least one desired provider streams the title.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.providers.is_empty()
    }
}

/// Returns `true` when both the rating and the vote count reach their minimums.
///
/// Both bounds are inclusive and compared without tolerance.
#[must_use]
pub fn meets_rating_criteria(rating: f64, vote_count: u32, min_rating: f64, min_votes: u32) -> bool {
    rating >= min_rating && vote_count >= min_votes
}

/// Splits a comma-separated provider list into a set of trimmed, lowercased tokens.
///
/// Empty segments are kept, so `""` yields `{""}`, which matches no provider.
#[must_use]
pub fn parse_providers(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|part| part.trim().to_lowercase())
        .collect()
}

/// Returns `true` when the provider name matches any desired token.
///
/// `amazon` and `amazonprime` match names containing "amazon prime video";
/// every other token must equal the lowercased name.
#[must_use]
pub fn matches_desired_provider(provider_name: &str, desired: &HashSet<String>) -> bool {
    let name = provider_name.to_lowercase();
    desired.iter().any(|token| {
        if AMAZON_ALIASES.contains(&token.as_str()) {
            name.contains(AMAZON_PRIME_VIDEO)
        } else {
            *token == name
        }
    })
}

/// Collects the desired providers offering the title by subscription.
///
/// Only the flatrate tier counts; rent and buy are ignored.
#[must_use]
pub fn check_availability(
    region_providers: &RegionProviders,
    desired: &HashSet<String>,
) -> ProviderAvailability {
    let providers = region_providers
        .flatrate
        .iter()
        .filter(|p| matches_desired_provider(&p.provider_name, desired))
        .map(|p| p.provider_name.clone())
        .collect();
    ProviderAvailability { providers }
}

/// Returns `true` when the item belongs to the selected genre.
///
/// An empty selector disables the filter. A numeric selector is matched
/// against genre IDs; anything else is matched by name, either against
/// embedded genre objects or through `genre_map`.
#[must_use]
pub fn filter_by_genre(
    item: &ListingItem,
    selector: &str,
    genre_map: &HashMap<String, u32>,
) -> bool {
    if selector.is_empty() {
        return true;
    }

    let wanted = selector.trim().to_lowercase();

    if let Ok(id) = wanted.parse::<i64>() {
        return item.genre_ids.iter().any(|g| i64::from(*g) == id)
            || item.genres.iter().any(|g| i64::from(g.id) == id);
    }

    if item.genres.iter().any(|g| g.name.to_lowercase() == wanted) {
        return true;
    }

    genre_map
        .get(&wanted)
        .is_some_and(|id| item.genre_ids.contains(id))
}

/// Builds a lowercased genre name to ID map. Later entries win on collisions.
#[must_use]
pub fn build_genre_map(genres: &[TmdbGenre]) -> HashMap<String, u32> {
    genres
        .iter()
        .map(|g| (g.name.to_lowercase(), g.id))
        .collect()
}

/// Maps genre IDs to names, keeping order and duplicates and skipping unknown IDs.
#[must_use]
pub fn resolve_genre_names(genre_ids: &[u32], genres: &[TmdbGenre]) -> Vec<String> {
    let id_to_name: HashMap<u32, &str> = genres.iter().map(|g| (g.id, g.name.as_str())).collect();
    genre_ids
        .iter()
        .filter_map(|id| id_to_name.get(id).map(|name| String::from(*name)))
        .collect()
}
