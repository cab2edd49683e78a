//! Canvas sizing and coordinate mathematics.
//!
//! The canvas has two sizes: its CSS display size, which follows the width of
//! the wrapper element, and its drawing-surface size, which always equals the
//! natural size of the image. Clicks arrive in client (CSS) coordinates and
//! are scaled into drawing-surface pixels before they touch the model.

use crate::error::ControllerError;
use crate::model::Point;

/// Natural pixel size of the loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Create an image size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, ControllerError> {
        if width == 0 || height == 0 {
            return Err(ControllerError::EmptyImage { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// On-screen rectangle of the canvas, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect with no area cannot be mapped back to canvas pixels.
    pub fn is_degenerate(&self) -> bool {
        !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Display and drawing-surface sizes of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// CSS width in pixels
    pub display_width: f64,
    /// CSS height in pixels
    pub display_height: f64,
    /// Drawing-surface width (image natural width)
    pub surface_width: u32,
    /// Drawing-surface height (image natural height)
    pub surface_height: u32,
}

impl CanvasLayout {
    /// Fit the canvas to the wrapper width, keeping the image aspect ratio.
    ///
    /// Returns `None` for a wrapper with no usable width.
    pub fn fit_to_width(wrapper_width: f64, image: ImageSize) -> Option<Self> {
        if !wrapper_width.is_finite() || wrapper_width <= 0.0 {
            return None;
        }

        Some(Self {
            display_width: wrapper_width,
            display_height: wrapper_width * f64::from(image.height) / f64::from(image.width),
            surface_width: image.width,
            surface_height: image.height,
        })
    }

    /// Scale factors from client pixels to surface pixels for `rect`.
    pub fn scale(&self, rect: &ClientRect) -> Option<(f64, f64)> {
        if rect.is_degenerate() {
            return None;
        }
        Some((
            f64::from(self.surface_width) / rect.width,
            f64::from(self.surface_height) / rect.height,
        ))
    }

    /// Convert client coordinates to canvas pixel coordinates.
    pub fn screen_to_canvas(
        &self,
        rect: &ClientRect,
        client_x: f64,
        client_y: f64,
    ) -> Option<Point> {
        let (sx, sy) = self.scale(rect)?;
        Some(Point::new(
            (client_x - rect.left) * sx,
            (client_y - rect.top) * sy,
        ))
    }

    /// Convert canvas pixel coordinates back to client coordinates.
    pub fn canvas_to_screen(&self, rect: &ClientRect, point: Point) -> Option<(f64, f64)> {
        let (sx, sy) = self.scale(rect)?;
        Some((point.x / sx + rect.left, point.y / sy + rect.top))
    }

    /// The client rect this layout produces when placed at (`left`, `top`).
    pub fn client_rect_at(&self, left: f64, top: f64) -> ClientRect {
        ClientRect::new(left, top, self.display_width, self.display_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_image_size_rejects_zero() {
        assert!(ImageSize::new(0, 10).is_err());
        assert!(ImageSize::new(10, 0).is_err());
        assert!(ImageSize::new(1, 1).is_ok());
    }

    #[test]
    fn test_fit_to_width_800x600() {
        let image = ImageSize::new(800, 600).unwrap();
        let layout = CanvasLayout::fit_to_width(400.0, image).unwrap();

        assert_eq!(layout.display_width, 400.0);
        assert_eq!(layout.display_height, 300.0);
        assert_eq!(layout.surface_width, 800);
        assert_eq!(layout.surface_height, 600);
    }

    #[test]
    fn test_fit_to_width_height_formula() {
        let image = ImageSize::new(1920, 1037).unwrap();
        for width in [1.0, 37.5, 333.3, 640.0, 1023.7, 4096.0] {
            let layout = CanvasLayout::fit_to_width(width, image).unwrap();
            assert_eq!(layout.display_height, width * 1037.0 / 1920.0);
        }
    }

    #[test]
    fn test_fit_to_width_rejects_unusable_width() {
        let image = ImageSize::new(10, 10).unwrap();
        assert!(CanvasLayout::fit_to_width(0.0, image).is_none());
        assert!(CanvasLayout::fit_to_width(-5.0, image).is_none());
        assert!(CanvasLayout::fit_to_width(f64::NAN, image).is_none());
        assert!(CanvasLayout::fit_to_width(f64::INFINITY, image).is_none());
    }

    #[test]
    fn test_screen_to_canvas_scales_by_surface_ratio() {
        let image = ImageSize::new(800, 600).unwrap();
        let layout = CanvasLayout::fit_to_width(400.0, image).unwrap();
        let rect = layout.client_rect_at(0.0, 0.0);

        let p = layout.screen_to_canvas(&rect, 100.0, 75.0).unwrap();
        assert!(approx_eq(p.x, 200.0));
        assert!(approx_eq(p.y, 150.0));
    }

    #[test]
    fn test_screen_to_canvas_subtracts_rect_origin() {
        let image = ImageSize::new(800, 600).unwrap();
        let layout = CanvasLayout::fit_to_width(400.0, image).unwrap();
        let rect = layout.client_rect_at(30.0, 120.0);

        let p = layout.screen_to_canvas(&rect, 130.0, 195.0).unwrap();
        assert!(approx_eq(p.x, 200.0));
        assert!(approx_eq(p.y, 150.0));
    }

    #[test]
    fn test_conversion_round_trip() {
        let image = ImageSize::new(1023, 517).unwrap();
        let layout = CanvasLayout::fit_to_width(731.0, image).unwrap();
        let rect = layout.client_rect_at(12.25, -40.5);

        for (x, y) in [(12.25, -40.5), (100.0, 20.0), (743.0, 300.125), (400.7, 1.3)] {
            let canvas = layout.screen_to_canvas(&rect, x, y).unwrap();
            let (bx, by) = layout.canvas_to_screen(&rect, canvas).unwrap();
            assert!(approx_eq(bx, x), "x: {} vs {}", bx, x);
            assert!(approx_eq(by, y), "y: {} vs {}", by, y);
        }
    }

    #[test]
    fn test_degenerate_rect_has_no_scale() {
        let image = ImageSize::new(800, 600).unwrap();
        let layout = CanvasLayout::fit_to_width(400.0, image).unwrap();
        let hidden = ClientRect::new(0.0, 0.0, 0.0, 0.0);

        assert!(layout.screen_to_canvas(&hidden, 10.0, 10.0).is_none());
    }
}
