//! Marker render pass.
//!
//! The browser binding implements [`DrawTarget`] on top of a
//! `CanvasRenderingContext2d`; tests implement it with a recorder.

use crate::constants::{MARKER_COLOR, MARKER_LINE_WIDTH, MARKER_RADIUS};
use crate::layout::CanvasLayout;
use crate::model::{ClickPoints, Point};

/// Stroke style for click markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub line_width: f64,
    pub color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: MARKER_RADIUS,
            line_width: MARKER_LINE_WIDTH,
            color: MARKER_COLOR.to_string(),
        }
    }
}

/// Drawing operations needed to render the annotation canvas.
pub trait DrawTarget {
    /// Clear the full drawing surface.
    fn clear(&mut self, width: f64, height: f64);

    /// Draw the source image at the origin, scaled to `width` x `height`.
    fn draw_image(&mut self, width: f64, height: f64);

    /// Set the stroke color and line width used by [`DrawTarget::stroke_circle`].
    fn set_stroke(&mut self, color: &str, line_width: f64);

    /// Stroke an unfilled circle.
    fn stroke_circle(&mut self, center: Point, radius: f64);
}

/// Clear the surface, draw the image, then stroke one circle per marker.
pub fn render_scene(
    target: &mut impl DrawTarget,
    layout: &CanvasLayout,
    points: &ClickPoints,
    style: &MarkerStyle,
) {
    let width = f64::from(layout.surface_width);
    let height = f64::from(layout.surface_height);

    target.clear(width, height);
    target.draw_image(width, height);
    target.set_stroke(&style.color, style.line_width);

    for point in points.iter() {
        target.stroke_circle(*point, style.radius);
    }
}
