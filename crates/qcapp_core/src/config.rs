//! Page configuration.
//!
//! Templates may embed a `<script type="application/json" id="qcapp-config">`
//! block to override element ids, hotkeys or tunables. Every field has a
//! default, so an empty object (or no block at all) yields the standard
//! setup.

use serde::{Deserialize, Serialize};

use crate::constants::{ids, DEFAULT_MAX_CANVAS_WAIT_FRAMES};
use crate::error::ConfigError;
use crate::hotkeys::RatingHotkeys;

/// Log level setting for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    #[default]
    Warn,
    /// Show errors, warnings, and info messages
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration format version.
pub const CONFIG_VERSION: u32 = 1;

/// Identifiers of the server-rendered elements the bindings attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// Id of the annotation canvas
    pub canvas: String,
    /// Class of the element whose width the canvas follows
    pub canvas_wrapper_class: String,
    /// Id of the hidden input holding the base64 image data URI
    pub image_data: String,
    /// Id of the submit control
    pub submit: String,
    /// Id of the rating form
    pub form: String,
    /// `name` attribute of the rating radio inputs
    pub rating_name: String,
    /// Id of the theme stylesheet `<link>`
    pub theme_css: String,
    /// Id of the theme toggle button
    pub theme_toggle: String,
    /// Id of the theme icon element
    pub theme_icon: String,
    /// Id of the theme label element
    pub theme_text: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: ids::CANVAS.to_string(),
            canvas_wrapper_class: ids::CANVAS_WRAPPER_CLASS.to_string(),
            image_data: ids::IMAGE_DATA.to_string(),
            submit: ids::SUBMIT.to_string(),
            form: ids::FORM.to_string(),
            rating_name: ids::RATING_NAME.to_string(),
            theme_css: ids::THEME_CSS.to_string(),
            theme_toggle: ids::THEME_TOGGLE.to_string(),
            theme_icon: ids::THEME_ICON.to_string(),
            theme_text: ids::THEME_TEXT.to_string(),
        }
    }
}

impl ElementIds {
    /// CSS selector for the canvas wrapper.
    pub fn wrapper_selector(&self) -> String {
        format!(".{}", self.canvas_wrapper_class)
    }

    /// CSS selector for the rating radio inputs.
    pub fn rating_selector(&self) -> String {
        format!("input[type=\"radio\"][name=\"{}\"]", self.rating_name)
    }

    /// CSS selector for the label of the radio with the given id.
    pub fn label_selector(radio_id: &str) -> String {
        format!("label[for='{}']", radio_id)
    }
}

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub elements: ElementIds,

    #[serde(default)]
    pub hotkeys: RatingHotkeys,

    /// Animation frames to wait for the canvas before giving up
    #[serde(default = "default_max_canvas_wait_frames")]
    pub max_canvas_wait_frames: u32,

    /// Browser console log verbosity
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_max_canvas_wait_frames() -> u32 {
    DEFAULT_MAX_CANVAS_WAIT_FRAMES
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            elements: ElementIds::default(),
            hotkeys: RatingHotkeys::default(),
            max_canvas_wait_frames: default_max_canvas_wait_frames(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Parse an optional embedded config block, falling back to defaults.
    pub fn from_embedded(json: Option<&str>) -> Self {
        let Some(json) = json.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::new();
        };

        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring page configuration: {}", e);
                Self::new()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
