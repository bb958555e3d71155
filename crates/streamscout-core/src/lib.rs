//! Core filtering pipeline for streamscout.
//!
//! Pure filter predicates plus the paginated processor that walks a
//! TMDB listing, checks each title and hands matches to a consumer.

/// Rating, provider and genre predicates.
pub mod filters;

/// Paginated fetch-filter processor.
pub mod processor;
