//! API client library for streamscout.
//!
//! Provides the TMDB v3 client used to list, search and enrich
//! movies and TV shows.

/// TMDB API client.
pub mod tmdb;
