//! Colours and text styles shared by every screen.
//!
//! Teal accents on a slate background. Risk colours are not defined here:
//! they come from `RiskLevel::color` so the gauge matches the report.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLevel;

/// Style presets for the prediction screens.
pub struct MedicalTheme;

impl MedicalTheme {
    pub const ACCENT: Color = Color::Rgb(13, 148, 136);
    /// Headings and key hints.
    pub const ACCENT_BRIGHT: Color = Color::Rgb(45, 212, 191);

    /// Loaded model, saved report.
    pub const OK: Color = Color::Rgb(16, 185, 129);
    /// Missing models, failed saves, rejected input.
    pub const ERROR: Color = Color::Rgb(244, 63, 94);

    /// Text drawn on an `ACCENT` background.
    pub const ON_ACCENT: Color = Color::Rgb(15, 23, 42);

    pub const FG: Color = Color::Rgb(248, 250, 252);
    /// Labels, hints and unfocused borders.
    pub const FG_DIM: Color = Color::Rgb(148, 163, 184);
    /// Models that are not loaded.
    pub const FG_FAINT: Color = Color::Rgb(100, 116, 139);

    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    /// Panel titles and section headings.
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT_BRIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::FG_FAINT)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::OK)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Highlighted disease row and the chosen categorical value.
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ON_ACCENT)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Label of the active form field.
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::ACCENT_BRIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_BRIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Foreground for a risk bucket.
    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        let (r, g, b) = level.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_styles_follow_risk_colors() {
        for level in [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High] {
            let (r, g, b) = level.color();
            assert_eq!(MedicalTheme::risk_level(level).fg, Some(Color::Rgb(r, g, b)));
        }
        assert_ne!(
            MedicalTheme::risk_level(RiskLevel::Low),
            MedicalTheme::risk_level(RiskLevel::High)
        );
    }
}
