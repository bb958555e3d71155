//! Headers, summaries and tables printed around the title records.

use std::io::{self, Write};

use streamscout_api::tmdb::{TmdbGenre, TmdbPerson};

use super::styles::Palette;
use crate::config::FilterSettings;

/// Width of separator lines.
const SEPARATOR_WIDTH: usize = 60;

/// Writes a separator line.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_separator<W: Write + ?Sized>(out: &mut W, palette: Palette) -> io::Result<()> {
    writeln!(out, "{}", palette.separator(&"=".repeat(SEPARATOR_WIDTH)))
}

/// Writes the active criteria below a command heading.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_criteria<W: Write + ?Sized>(out: &mut W, settings: &FilterSettings) -> io::Result<()> {
    writeln!(
        out,
        "Criteria: Min Rating: {:.1} | Min Votes: {}",
        settings.min_rating, settings.min_votes
    )?;
    if !settings.genre.is_empty() {
        writeln!(out, "Genre: {}", settings.genre)?;
    }
    writeln!(
        out,
        "Filtering for [{}] in region [{}]\n",
        settings.providers,
        settings.region.to_uppercase()
    )
}

/// Writes the closing line of a listing command.
///
/// `label` names the listing ("top-rated movies"), `noun` the kind of
/// title ("movies") used when nothing was found.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_summary<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    label: &str,
    noun: &str,
    found: u32,
) -> io::Result<()> {
    write_separator(out, palette)?;
    if found == 0 {
        writeln!(out, "No {noun} found matching criteria.")
    } else {
        writeln!(out, "Displayed {found} {label}.")
    }
}

/// Writes the hint shown when a title search yields nothing.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_search_no_results<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    query: &str,
    checked: u32,
    settings: &FilterSettings,
) -> io::Result<()> {
    write_separator(out, palette)?;
    writeln!(
        out,
        "No movies found for \"{query}\" that meet criteria and are available on your providers."
    )?;
    writeln!(out, "(Checked {checked} movies from search results)")?;
    writeln!(out, "\nTry:")?;
    writeln!(
        out,
        "  - Lowering --min-rating (current: {:.1})",
        settings.min_rating
    )?;
    writeln!(
        out,
        "  - Lowering --min-votes (current: {})",
        settings.min_votes
    )?;
    writeln!(out, "  - Adding more --providers")
}

/// Writes the closing line of a successful title search.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_search_complete<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    found: u32,
    checked: u32,
) -> io::Result<()> {
    write_separator(out, palette)?;
    writeln!(
        out,
        "Search complete: Displayed {found} movies (out of {checked} checked)."
    )
}

/// Writes genres sorted by name in two columns.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_genre_table<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    genres: &[TmdbGenre],
) -> io::Result<()> {
    let mut sorted: Vec<&TmdbGenre> = genres.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    write_separator(out, palette)?;
    writeln!(out, "Available Movie Genres ({} total)", sorted.len())?;
    write_separator(out, palette)?;

    let half = sorted.len().div_ceil(2);
    let (left, right) = sorted.split_at(half);
    for (i, genre) in left.iter().enumerate() {
        let left_cell = palette.provider(&genre_cell(genre));
        match right.get(i) {
            Some(other) => writeln!(
                out,
                "{left_cell} | {}",
                palette.provider(&genre_cell(other))
            )?,
            None => writeln!(out, "{left_cell}")?,
        }
    }

    write_separator(out, palette)?;
    writeln!(out, "\nUsage examples:")?;
    writeln!(out, "   streamscout top --genre Action")?;
    writeln!(out, "   streamscout search \"star\" --genre \"Science Fiction\"")?;
    writeln!(out, "   streamscout actor \"Tom Hanks\" --genre Drama")
}

fn genre_cell(genre: &TmdbGenre) -> String {
    format!("{:<20} {:<5}", genre.name, genre.id)
}

/// Writes up to `max` people as numbered rows between separators.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_actor_rows<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    people: &[TmdbPerson],
    max: usize,
) -> io::Result<usize> {
    write_separator(out, palette)?;
    let mut written = 0_usize;
    for (number, person) in (1_usize..).zip(people.iter().take(max)) {
        writeln!(
            out,
            "{number}. {} (Popularity: {}) - TMDb ID: {}",
            palette.actor(&person.name),
            palette.popularity(&format!("{:.1}", person.popularity)),
            person.id
        )?;
        written = number;
    }
    write_separator(out, palette)?;
    Ok(written)
}
