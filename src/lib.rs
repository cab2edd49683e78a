//! qcapp - browser interaction layer for the QC ratings app.
//!
//! Point annotation on the slice canvas, rating hotkeys and the theme switch,
//! compiled to WebAssembly and attached to server-rendered htmx fragments.
//! All decisions live in [`qcapp_core`]; the modules here only own DOM
//! elements and event closures.

pub use qcapp_core;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod config;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod ratings;
#[cfg(target_arch = "wasm32")]
mod theme;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasController;
#[cfg(target_arch = "wasm32")]
pub use host::PageHost;
#[cfg(target_arch = "wasm32")]
pub use theme::ThemeSwitcher;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
