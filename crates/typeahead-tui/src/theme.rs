//! Color scheme and styling for the search page.

use ratatui::style::{Color, Modifier, Style};

/// The color palette for typeahead's TUI.
///
/// RGB colors with a subdued base and a single blue accent for focus,
/// open suggestions and the matched part of each suggestion.
pub struct Theme;

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn bg() -> Color {
        Color::Reset
    }

    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(110, 170, 255)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    pub fn selection_bg() -> Color {
        Color::Rgb(40, 40, 60)
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn cursor() -> Style {
        Style::default().fg(Self::bg()).bg(Self::accent())
    }

    // ── Suggestions ─────────────────────────────────────────

    /// Border of a field container while it has open suggestions.
    pub fn has_suggestions() -> Style {
        Style::default().fg(Self::accent())
    }

    /// The matched part of a suggestion.
    pub fn emphasis() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn icon() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    /// The highlighted suggestion row.
    pub fn active_entry() -> Style {
        Style::default().bg(Self::selection_bg())
    }

    pub fn submitted() -> Style {
        Style::default().fg(Self::success())
    }
}
