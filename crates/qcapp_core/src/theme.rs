//! Theme system for the rating pages.
//!
//! Provides light and dark themes backed by bootswatch stylesheets. The
//! toggle button always advertises the theme it switches *to*.

use serde::{Deserialize, Serialize};

/// Theme choice - light or dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

/// Everything needed to apply one theme to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSpec {
    /// Bootswatch theme name
    pub name: &'static str,
    /// Stylesheet URL for the theme link element
    pub url: &'static str,
    /// Icon class shown on the toggle button
    pub icon: &'static str,
    /// Label shown on the toggle button
    pub text: &'static str,
}

const LIGHT: ThemeSpec = ThemeSpec {
    name: "flatly",
    url: "https://cdn.jsdelivr.net/npm/bootswatch@5.3.0/dist/flatly/bootstrap.min.css",
    icon: "fas fa-moon",
    text: "Dark Mode",
};

const DARK: ThemeSpec = ThemeSpec {
    name: "darkly",
    url: "https://cdn.jsdelivr.net/npm/bootswatch@5.3.0/dist/darkly/bootstrap.min.css",
    icon: "fas fa-sun",
    text: "Light Mode",
};

impl ThemeChoice {
    /// Storage value for this theme.
    pub fn key(&self) -> &'static str {
        match self {
            ThemeChoice::Light => "light",
            ThemeChoice::Dark => "dark",
        }
    }

    /// Parse a stored value. Unknown values fall back to light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ThemeChoice::Dark,
            Some("light") | None => ThemeChoice::Light,
            Some(other) => {
                log::debug!("Unknown stored theme '{}', using light", other);
                ThemeChoice::Light
            }
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeChoice::Light => ThemeChoice::Dark,
            ThemeChoice::Dark => ThemeChoice::Light,
        }
    }

    pub fn spec(&self) -> &'static ThemeSpec {
        match self {
            ThemeChoice::Light => &LIGHT,
            ThemeChoice::Dark => &DARK,
        }
    }

    /// Class list for the `<body>` element.
    pub fn body_class(&self) -> String {
        format!("qcapp-body theme-{}", self.key())
    }
}
