//! Marquee theme for ReviewTUI
//!
//! Palette and style helpers for the TUI: a dark auditorium with gold
//! marquee lights and a red velvet accent.

use ratatui::style::{Color, Modifier, Style};

/// Ratings at or above this are shown as good
pub const GOOD_RATING: f32 = 7.5;
/// Ratings at or above this (and below good) are shown as fair
pub const FAIR_RATING: f32 = 5.0;

/// Color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0f0d0c (dark auditorium)
    pub const BACKGROUND: Color = Color::Rgb(0x0f, 0x0d, 0x0c);

    /// Primary: #f5c518 (marquee gold)
    pub const PRIMARY: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Secondary: #c0392b (velvet red)
    pub const SECONDARY: Color = Color::Rgb(0xc0, 0x39, 0x2b);

    /// Highlight: #ffe08a (lit bulb)
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0xe0, 0x8a);

    /// Text: #ece6dc (screen white)
    pub const TEXT: Color = Color::Rgb(0xec, 0xe6, 0xdc);

    /// Dim: #6b625a (house lights down)
    pub const DIM: Color = Color::Rgb(0x6b, 0x62, 0x5a);

    /// Good rating: #5fd068
    pub const GOOD: Color = Color::Rgb(0x5f, 0xd0, 0x68);

    /// Fair rating: #f0a030
    pub const FAIR: Color = Color::Rgb(0xf0, 0xa0, 0x30);

    /// Poor rating / errors: #ff5a4f
    pub const POOR: Color = Color::Rgb(0xff, 0x5a, 0x4f);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Selected row background
    pub const BACKGROUND_HOVER: Color = Color::Rgb(0x2a, 0x22, 0x1a);

    /// Border color (dim gold)
    pub const BORDER: Color = Color::Rgb(0x7a, 0x62, 0x10);

    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::POOR).add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .bg(Self::BACKGROUND_HOVER)
            .add_modifier(Modifier::BOLD)
    }

    /// Search input text
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Key name in the hint bar
    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_HOVER)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::ITALIC)
    }

    /// Author names and dates
    pub fn byline() -> Style {
        Style::default().fg(Self::SECONDARY).add_modifier(Modifier::BOLD)
    }

    /// Color for a rating out of 10
    pub fn rating_color(rating: f32) -> Color {
        if rating >= GOOD_RATING {
            Self::GOOD
        } else if rating >= FAIR_RATING {
            Self::FAIR
        } else {
            Self::POOR
        }
    }

    /// Rating style; selected rows keep the selection background
    pub fn rating_style(rating: f32, selected: bool) -> Style {
        let style = Style::default()
            .fg(Self::rating_color(rating))
            .add_modifier(Modifier::BOLD);
        if selected {
            style.bg(Self::BACKGROUND_HOVER)
        } else {
            style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Theme::rating_color(10.0), Theme::GOOD);
        assert_eq!(Theme::rating_color(7.5), Theme::GOOD);
        assert_eq!(Theme::rating_color(7.4), Theme::FAIR);
        assert_eq!(Theme::rating_color(5.0), Theme::FAIR);
        assert_eq!(Theme::rating_color(4.9), Theme::POOR);
        assert_eq!(Theme::rating_color(0.0), Theme::POOR);
    }

    #[test]
    fn test_rating_style_selected_background() {
        assert_eq!(Theme::rating_style(8.0, true).bg, Some(Theme::BACKGROUND_HOVER));
        assert_eq!(Theme::rating_style(8.0, false).bg, None);
    }

    #[test]
    fn test_palette_is_rgb() {
        for color in [
            Theme::BACKGROUND,
            Theme::PRIMARY,
            Theme::SECONDARY,
            Theme::TEXT,
            Theme::DIM,
            Theme::GOOD,
            Theme::FAIR,
            Theme::POOR,
        ] {
            assert!(matches!(color, Color::Rgb(..)), "{:?} is not RGB", color);
        }
    }
}
