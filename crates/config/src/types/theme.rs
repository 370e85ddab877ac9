//! Dashboard colour themes.
//!
//! `ColorTheme` is what gets persisted; `Theme` is the palette the TUI paints
//! with and is never serialized.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Theme choice stored in the TUI state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    #[default]
    Default,
    Light,
    Dark,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [Self::Default, Self::Light, Self::Dark];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    /// Following theme in `ALL`, wrapping around.
    pub fn cycle_next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Runtime palette, named by meaning rather than by hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub title: Color,
    /// Focused borders.
    pub accent: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub disabled: Color,
    /// Object keys in rendered API responses.
    pub json_key: Color,
    pub json_value: Color,
}

const DEFAULT_PALETTE: Theme = Theme {
    text: Color::White,
    text_dim: Color::Gray,
    border: Color::Cyan,
    title: Color::Cyan,
    accent: Color::Yellow,
    highlight_fg: Color::Yellow,
    highlight_bg: Color::DarkGray,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    info: Color::Cyan,
    disabled: Color::DarkGray,
    json_key: Color::Blue,
    json_value: Color::Green,
};

const LIGHT_PALETTE: Theme = Theme {
    text: Color::Black,
    border: Color::Blue,
    title: Color::Blue,
    accent: Color::Magenta,
    highlight_fg: Color::Black,
    highlight_bg: Color::Gray,
    info: Color::Blue,
    disabled: Color::Gray,
    json_value: Color::Black,
    ..DEFAULT_PALETTE
};

// 256-colour indices: 110 soft blue, 214 orange, 236 near-black.
const DARK_PALETTE: Theme = Theme {
    border: Color::Indexed(110),
    title: Color::Indexed(110),
    accent: Color::Indexed(214),
    highlight_fg: Color::White,
    highlight_bg: Color::Indexed(236),
    info: Color::Indexed(110),
    json_key: Color::Indexed(75),
    json_value: Color::Indexed(150),
    ..DEFAULT_PALETTE
};

impl Theme {
    pub fn from_color_theme(theme: ColorTheme) -> Self {
        match theme {
            ColorTheme::Default => DEFAULT_PALETTE,
            ColorTheme::Light => LIGHT_PALETTE,
            ColorTheme::Dark => DARK_PALETTE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}
