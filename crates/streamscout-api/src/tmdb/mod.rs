//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB v3 API for listings, title search,
//! watch providers, external IDs and people.

mod api;
mod client;
mod types;
mod util;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    ListingItem, MediaKind, RegionProviders, SearchMovieParams, TmdbErrorResponse,
    TmdbExternalIds, TmdbGenre, TmdbGenreList, TmdbListingResponse, TmdbPerson,
    TmdbPersonCredits, TmdbPersonSearchResponse, TmdbTitleDetails, TmdbWatchProvidersResponse,
    WatchProvider,
};
pub use util::search_person_pages;
