//! Colour palette and preset styles for the dashboard.

use ratatui::style::{Color, Modifier, Style};
use revenue_core::scoring::HealthTier;

pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Rgb(56, 189, 248); // #38BDF8
    pub const HEALTHY: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WATCHLIST: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const AT_RISK: Color = Color::Rgb(244, 63, 94); // #F43F5E
    pub const BORDER: Color = Color::Rgb(100, 116, 139); // #64748B
    pub const TEXT: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_MUTED: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const SELECTION: Color = Color::Rgb(51, 65, 85); // #334155

    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    #[must_use]
    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn kpi_value() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected_row() -> Style {
        Style::default().bg(Self::SELECTION).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn active_tab() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tier_color(tier: HealthTier) -> Color {
        match tier {
            HealthTier::Healthy => Self::HEALTHY,
            HealthTier::Watchlist => Self::WATCHLIST,
            HealthTier::AtRisk => Self::AT_RISK,
        }
    }

    #[must_use]
    pub fn tier(tier: HealthTier) -> Style {
        Style::default().fg(Self::tier_color(tier))
    }
}
