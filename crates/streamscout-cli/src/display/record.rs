//! Formatted title records.

use std::io::{self, Write};

use streamscout_api::tmdb::{ListingItem, MediaKind};

use super::messages::write_separator;
use super::styles::Palette;
use crate::enrich::Enrichment;

/// Overview length shown before truncation.
const OVERVIEW_CHARS: usize = 100;

/// One accepted title, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecord {
    /// 1-based position in the output.
    pub number: u32,
    /// Movie or show.
    pub kind: MediaKind,
    /// TMDB ID.
    pub tmdb_id: u64,
    /// Title shown first (regional or listing title).
    pub title: String,
    /// English title, shown when it differs from `title`.
    pub english_title: String,
    /// `(YYYY)` or empty.
    pub year_label: String,
    /// Average rating.
    pub rating: f64,
    /// Vote count.
    pub votes: u32,
    /// Genre names.
    pub genres: Vec<String>,
    /// Role played (actor filmographies only).
    pub character: Option<String>,
    /// Matching subscription providers.
    pub providers: Vec<String>,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// TheTVDB ID (shows only).
    pub tvdb_id: Option<u64>,
    /// Overview text.
    pub overview: String,
}

impl TitleRecord {
    /// Assembles a record from a listing item and its enrichment.
    #[must_use]
    pub fn new(
        number: u32,
        kind: MediaKind,
        item: &ListingItem,
        enrichment: Enrichment,
        providers: &[String],
        genres: &[String],
    ) -> Self {
        Self {
            number,
            kind,
            tmdb_id: item.id,
            title: enrichment.title,
            english_title: enrichment.english_title,
            year_label: item.year_label(),
            rating: item.vote_average,
            votes: item.vote_count,
            genres: genres.to_vec(),
            character: item.character.clone(),
            providers: providers.to_vec(),
            imdb_id: enrichment.imdb_id,
            tvdb_id: enrichment.tvdb_id,
            overview: item.overview.clone().unwrap_or_default(),
        }
    }

    /// Writes the record, preceded by a separator line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W, palette: Palette) -> io::Result<()> {
        write_separator(out, palette)?;

        let english = if !self.english_title.is_empty() && self.english_title != self.title {
            palette.english_title(&format!(" ({})", self.english_title))
        } else {
            String::new()
        };
        let heading = format!(
            "{}. {}{} {}",
            self.number,
            palette.title(&self.title),
            english,
            self.year_label
        );
        writeln!(out, "{}", heading.trim_end())?;

        writeln!(
            out,
            "   Rating: {}/10 (Votes: {})",
            palette.rating(&format!("{:.1}", self.rating)),
            self.votes
        )?;

        if !self.genres.is_empty() {
            writeln!(out, "   Genres: {}", self.genres.join(", "))?;
        }

        if let Some(character) = self.character.as_deref().filter(|c| !c.is_empty()) {
            writeln!(out, "   Character: {character}")?;
        }

        let providers: Vec<String> = self.providers.iter().map(|p| palette.provider(p)).collect();
        writeln!(out, "   STREAMING on: {}", providers.join(", "))?;

        writeln!(out, "   TMDb Details: {}", self.kind.web_url(self.tmdb_id))?;
        if let Some(imdb_id) = self.imdb_id.as_deref().filter(|id| !id.is_empty()) {
            writeln!(out, "   IMDb Details: https://www.imdb.com/title/{imdb_id}/")?;
        }
        if self.kind == MediaKind::Tv
            && let Some(tvdb_id) = self.tvdb_id.filter(|id| *id > 0)
        {
            writeln!(out, "   TVDB Details: https://thetvdb.com/?tab=series&id={tvdb_id}")?;
        }

        writeln!(out, "   Overview: {}", truncate(&self.overview, OVERVIEW_CHARS))
    }
}

/// Shortens `text` to `max_chars` characters, trimmed and suffixed with `...`.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => {
            let head = text.get(..end).unwrap_or(text);
            format!("{}...", head.trim())
        }
        None => String::from(text),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn record() -> TitleRecord {
        TitleRecord {
            number: 1,
            kind: MediaKind::Movie,
            tmdb_id: 278,
            title: String::from("Die Verurteilten"),
            english_title: String::from("The Shawshank Redemption"),
            year_label: String::from("(1994)"),
            rating: 8.712,
            votes: 27_412,
            genres: vec![String::from("Drama"), String::from("Krimi")],
            character: None,
            providers: vec![String::from("Netflix"), String::from("WOW")],
            imdb_id: Some(String::from("tt0111161")),
            tvdb_id: None,
            overview: String::from("Zwei Häftlinge freunden sich an."),
        }
    }

    fn render(record: &TitleRecord) -> String {
        let mut out = Vec::new();
        record.write_to(&mut out, Palette::new(false)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_movie_record() {
        // Arrange
        let record = record();

        // Act
        let text = render(&record);

        // Assert
        let expected = format!(
            "{}\n\
             1. Die Verurteilten (The Shawshank Redemption) (1994)\n   \
             Rating: 8.7/10 (Votes: 27412)\n   \
             Genres: Drama, Krimi\n   \
             STREAMING on: Netflix, WOW\n   \
             TMDb Details: https://www.themoviedb.org/movie/278\n   \
             IMDb Details: https://www.imdb.com/title/tt0111161/\n   \
             Overview: Zwei Häftlinge freunden sich an.\n",
            "=".repeat(60)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_hides_same_english_title_and_empty_year() {
        // Arrange
        let mut record = record();
        record.english_title = record.title.clone();
        record.year_label = String::new();
        record.genres.clear();
        record.imdb_id = None;

        // Act
        let text = render(&record);

        // Assert
        assert!(text.contains("\n1. Die Verurteilten\n"));
        assert!(!text.contains("Genres:"));
        assert!(!text.contains("IMDb Details"));
    }

    #[test]
    fn test_render_show_with_tvdb_and_character() {
        // Arrange
        let mut record = record();
        record.kind = MediaKind::Tv;
        record.tmdb_id = 70_523;
        record.tvdb_id = Some(334_824);
        record.character = Some(String::from("Jonas Kahnwald"));

        // Act
        let text = render(&record);

        // Assert
        assert!(text.contains("   Character: Jonas Kahnwald\n"));
        assert!(text.contains("   TMDb Details: https://www.themoviedb.org/tv/70523\n"));
        assert!(text.contains("   TVDB Details: https://thetvdb.com/?tab=series&id=334824\n"));
    }

    #[test]
    fn test_render_skips_zero_tvdb_id() {
        // Arrange
        let mut record = record();
        record.kind = MediaKind::Tv;
        record.tvdb_id = Some(0);

        // Act
        let text = render(&record);

        // Assert
        assert!(!text.contains("TVDB Details"));
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        // Arrange & Act & Assert
        assert_eq!(truncate("short", 100), "short");
        assert_eq!(truncate("", 100), "");
    }

    #[test]
    fn test_truncate_long_text_trims_and_appends_ellipsis() {
        // Arrange
        let text = format!("{} tail", "a".repeat(99));

        // Act
        let result = truncate(&text, 100);

        // Assert
        assert_eq!(result, format!("{}...", "a".repeat(99)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        // Arrange
        let text = "ä".repeat(120);

        // Act
        let result = truncate(&text, 100);

        // Assert
        assert_eq!(result.chars().count(), 103);
        assert!(result.ends_with("..."));
    }
}
