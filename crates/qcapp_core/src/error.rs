//! Error types for controller and configuration operations.

use thiserror::Error;

/// Errors that can occur while wiring or running an annotation controller.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// A required element is not present in the document
    #[error("Element not found: {selector}")]
    MissingElement {
        /// Id or selector used for the lookup
        selector: String,
    },

    /// An element exists but is not of the expected type
    #[error("Element '{selector}' is not a {expected}")]
    WrongElementType {
        /// Id or selector used for the lookup
        selector: String,
        /// The DOM interface that was expected
        expected: &'static str,
    },

    /// The canvas did not provide a 2D rendering context
    #[error("Canvas has no 2d rendering context")]
    NoRenderingContext,

    /// The loaded image reported a zero dimension
    #[error("Image has empty dimensions {width}x{height}")]
    EmptyImage {
        /// Natural width reported by the image
        width: u32,
        /// Natural height reported by the image
        height: u32,
    },

    /// The canvas never appeared within the configured number of frames
    #[error("Canvas did not appear after {frames} animation frames")]
    CanvasNeverAppeared {
        /// Number of frames waited before giving up
        frames: u32,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A browser API threw an exception
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl ControllerError {
    /// Build a `MissingElement` error for the given id or selector.
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },
}
