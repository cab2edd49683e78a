//! qcapp_core - platform-independent logic for the QC ratings front end.
//!
//! Everything in this crate is plain Rust with no DOM access, so the
//! annotation state machine, canvas geometry, keyboard shortcuts and theme
//! logic can be tested on the host. The `qcapp` crate wires these types to
//! browser elements on wasm32.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod hotkeys;
pub mod layout;
pub mod model;
pub mod payload;
pub mod render;
pub mod theme;

pub use config::{AppConfig, ElementIds, LogLevel};
pub use controller::{AnnotationController, CanvasProbe, Lifecycle};
pub use error::{ConfigError, ControllerError};
pub use hotkeys::{FocusContext, KeyAction, Rating, RatingGroup, RatingHotkeys};
pub use layout::{CanvasLayout, ClientRect, ImageSize};
pub use model::{ClickPoints, Point, Toggle};
pub use payload::SubmissionPayload;
pub use render::{DrawTarget, MarkerStyle};
pub use theme::{ThemeChoice, ThemeSpec};
