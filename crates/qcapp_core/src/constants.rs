//! Global constants for the QC ratings front end

/// Hit-test and drawing radius of a click marker, in canvas pixels
pub const MARKER_RADIUS: f64 = 10.0;

/// Stroke width of a click marker outline, in canvas pixels
pub const MARKER_LINE_WIDTH: f64 = 2.0;

/// Stroke color of click markers
pub const MARKER_COLOR: &str = "gold";

/// Animation frames to wait for the canvas before giving up (~10s at 60 Hz)
pub const DEFAULT_MAX_CANVAS_WAIT_FRAMES: u32 = 600;

/// Form field that carries the serialized click points
pub const POINTS_FIELD: &str = "points";

/// htmx attribute holding extra values for the next request
pub const HX_VALS_ATTRIBUTE: &str = "hx-vals";

/// htmx event fired once a partial page update has settled
pub const AFTER_SETTLE_EVENT: &str = "htmx:afterSettle";

/// localStorage key for the remembered theme
pub const THEME_STORAGE_KEY: &str = "theme";

/// Id of the optional JSON configuration script element
pub const CONFIG_ELEMENT_ID: &str = "qcapp-config";

/// Default element identifiers used by the server-rendered templates
pub mod ids {
    pub const CANVAS: &str = "canvas";
    pub const CANVAS_WRAPPER_CLASS: &str = "canvas-wrapper";
    pub const IMAGE_DATA: &str = "image-data";
    pub const SUBMIT: &str = "submit";
    pub const FORM: &str = "form";
    pub const RATING_NAME: &str = "rating";
    pub const THEME_CSS: &str = "theme-css";
    pub const THEME_TOGGLE: &str = "theme-toggle";
    pub const THEME_ICON: &str = "theme-icon";
    pub const THEME_TEXT: &str = "theme-text";
}
