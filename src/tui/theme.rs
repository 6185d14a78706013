//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::output::charts::{Rgb, CONTROL_FILL, RADAR_FILL, WARMTH_FILL};
use crate::scoring::Category;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Percentage colors (traffic light pattern, high is good here)
    pub level_high: Color,
    pub level_mid: Color,
    pub level_low: Color,

    // Chart colors
    pub warmth: Color,
    pub control: Color,
    pub support: Color,
    pub gauge_empty: Color,

    // Form and list colors
    pub field_active: Style,
    pub field_label: Color,
    pub answered: Color,
    pub unanswered: Color,
    pub option_selected: Style,

    // Table colors
    pub row_alt_bg: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub text: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            level_high: Color::Green,
            level_mid: Color::Yellow,
            level_low: Color::Red,
            warmth: rgb(WARMTH_FILL),
            control: rgb(CONTROL_FILL),
            support: rgb(RADAR_FILL),
            gauge_empty: Color::Indexed(238),
            field_active: Style::new().fg(Color::Cyan).bold(),
            field_label: Color::Gray,
            answered: Color::Cyan,
            unanswered: Color::DarkGray,
            option_selected: Style::new().fg(Color::Black).bg(Color::White).bold(),
            row_alt_bg: Color::Indexed(235),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            text: Color::White,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            level_high: Color::Indexed(28),
            level_mid: Color::Indexed(136),
            level_low: Color::Indexed(124),
            warmth: rgb(WARMTH_FILL),
            control: rgb(CONTROL_FILL),
            support: rgb(RADAR_FILL),
            gauge_empty: Color::Indexed(252),
            field_active: Style::new().fg(Color::Blue).bold(),
            field_label: Color::Indexed(240),
            answered: Color::Blue,
            unanswered: Color::Indexed(246),
            option_selected: Style::new().fg(Color::White).bg(Color::Indexed(236)).bold(),
            row_alt_bg: Color::Indexed(254),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            text: Color::Black,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(124),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Warmth => self.warmth,
            Category::Control => self.control,
            Category::Support => self.support,
        }
    }

    /// Color for a 0-100 percentage
    pub fn level_color(&self, percent: u32) -> Color {
        if percent > 60 {
            self.level_high
        } else if percent >= 40 {
            self.level_mid
        } else {
            self.level_low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors::dark(),
            Theme::Light => ThemeColors::light(),
        }
    }
}

/// Pick a theme from the config setting, probing the terminal background
/// for `auto`. Falls back to dark when the terminal does not answer.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                tracing::debug!(error = %e, "terminal background detection failed");
                Theme::Dark
            }
        },
    }
}
