//! Terminal colour styles.

use crossterm::style::{Attribute, Color, Stylize};
use crossterm::tty::IsTty;

const TITLE: Color = Color::Rgb {
    r: 0xFA,
    g: 0xFA,
    b: 0xFA,
};
const ENGLISH_TITLE: Color = Color::Rgb {
    r: 0x88,
    g: 0x88,
    b: 0x88,
};
const RATING: Color = Color::Rgb {
    r: 0xFC,
    g: 0xE0,
    b: 0x43,
};
const SEPARATOR: Color = Color::Rgb {
    r: 0x55,
    g: 0x55,
    b: 0x55,
};
const PROVIDER: Color = Color::Rgb {
    r: 0x00,
    g: 0xBF,
    b: 0xFF,
};
const ACTOR: Color = Color::Rgb {
    r: 0xFF,
    g: 0xD7,
    b: 0x00,
};
const POPULARITY: Color = Color::Rgb {
    r: 0x00,
    g: 0xFF,
    b: 0x00,
};

/// Applies colours to output fragments, or passes them through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Creates a palette; a disabled palette emits no escape sequences.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colours only when stdout is a terminal and `NO_COLOR` is unset or empty.
    #[must_use]
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color && std::io::stdout().is_tty())
    }

    fn paint(self, text: &str, color: Color, attributes: &[Attribute]) -> String {
        if !self.enabled {
            return String::from(text);
        }
        let mut styled = text.with(color);
        for attribute in attributes {
            styled = styled.attribute(*attribute);
        }
        styled.to_string()
    }

    /// Main title.
    #[must_use]
    pub fn title(self, text: &str) -> String {
        self.paint(text, TITLE, &[Attribute::Bold])
    }

    /// Secondary (English) title.
    #[must_use]
    pub fn english_title(self, text: &str) -> String {
        self.paint(text, ENGLISH_TITLE, &[Attribute::Italic])
    }

    /// Rating value.
    #[must_use]
    pub fn rating(self, text: &str) -> String {
        self.paint(text, RATING, &[Attribute::Bold])
    }

    /// Separator lines.
    #[must_use]
    pub fn separator(self, text: &str) -> String {
        self.paint(text, SEPARATOR, &[])
    }

    /// Provider names and genre table cells.
    #[must_use]
    pub fn provider(self, text: &str) -> String {
        self.paint(text, PROVIDER, &[Attribute::Bold])
    }

    /// Actor names.
    #[must_use]
    pub fn actor(self, text: &str) -> String {
        self.paint(text, ACTOR, &[Attribute::Bold])
    }

    /// Popularity scores.
    #[must_use]
    pub fn popularity(self, text: &str) -> String {
        self.paint(text, POPULARITY, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_passes_text_through() {
        // Arrange
        let palette = Palette::new(false);

        // Act & Assert
        assert_eq!(palette.title("Dark"), "Dark");
        assert_eq!(palette.provider("Netflix"), "Netflix");
    }

    #[test]
    fn test_colored_palette_wraps_text() {
        // Arrange
        let palette = Palette::new(true);

        // Act
        let styled = palette.rating("8.4");

        // Assert
        assert!(styled.contains("8.4"));
        assert!(styled.contains('\u{1b}'));
        assert_ne!(styled, "8.4");
    }
}
