//! Day/night theme selection and the color palette behind each.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two visual themes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Day,
    Night,
}

/// Hex colors for every themed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub background: &'static str,
    pub clock_buttons: &'static str,
    pub theme_button: &'static str,
    pub header: &'static str,
    pub clock_face: &'static str,
    pub second_hand: &'static str,
    pub adjust_buttons: &'static str,
}

const DAY_PALETTE: ThemePalette = ThemePalette {
    background: "#f5ffcb",
    clock_buttons: "#516091",
    theme_button: "#eef3ad",
    header: "#74b3c1",
    clock_face: "#eef3ad",
    second_hand: "#75b79e",
    adjust_buttons: "#516091",
};

const NIGHT_PALETTE: ThemePalette = ThemePalette {
    background: "#516091",
    clock_buttons: "#abebbe",
    theme_button: "#516091",
    header: "#6a8caf",
    clock_face: "#6a8caf",
    second_hand: "#eef3ad",
    adjust_buttons: "#eef3ad",
};

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    pub fn palette(self) -> &'static ThemePalette {
        match self {
            Theme::Day => &DAY_PALETTE,
            Theme::Night => &NIGHT_PALETTE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Day
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Day => write!(f, "day"),
            Theme::Night => write!(f, "night"),
        }
    }
}
