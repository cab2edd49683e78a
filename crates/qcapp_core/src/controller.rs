//! Annotation controller state machine.
//!
//! [`AnnotationController`] holds everything the canvas binding needs to
//! decide: the click markers, the loaded image size, the current canvas
//! layout and the lifecycle state. The binding forwards DOM events here and
//! performs whatever DOM work the returned values call for.
//!
//! Lifecycle:
//!
//! ```text
//! Uninitialized -> WaitingForCanvas -> Ready -> Disposed
//!                         \______________________^
//! ```
//!
//! Once disposed, every event is ignored and nothing changes, so a late
//! callback that slipped past listener removal cannot touch a replaced
//! instance.

use crate::config::AppConfig;
use crate::constants::DEFAULT_MAX_CANVAS_WAIT_FRAMES;
use crate::error::ControllerError;
use crate::layout::{CanvasLayout, ClientRect, ImageSize};
use crate::model::{ClickPoints, Toggle};
use crate::payload::SubmissionPayload;
use crate::render::{self, DrawTarget, MarkerStyle};

/// Lifecycle state of a controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, canvas not looked up yet
    Uninitialized,
    /// Canvas missing, retrying once per animation frame
    WaitingForCanvas {
        /// Missing-canvas probes so far
        frames: u32,
    },
    /// Canvas found, listeners may be attached
    Ready,
    /// Torn down, all events are ignored
    Disposed,
}

/// Result of looking for the canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasProbe {
    /// Canvas present, the controller is ready
    Attached,
    /// Canvas missing, try again next animation frame
    Retry,
    /// The controller was disposed while waiting
    Abandoned,
}

/// Platform-independent state of one canvas annotation controller.
#[derive(Debug, Clone)]
pub struct AnnotationController {
    lifecycle: Lifecycle,
    points: ClickPoints,
    image: Option<ImageSize>,
    layout: Option<CanvasLayout>,
    style: MarkerStyle,
    max_wait_frames: u32,
}

impl AnnotationController {
    /// Create a controller that waits at most `max_wait_frames` for the canvas.
    pub fn new(max_wait_frames: u32) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            points: ClickPoints::new(),
            image: None,
            layout: None,
            style: MarkerStyle::default(),
            max_wait_frames,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.max_canvas_wait_frames)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    pub fn points(&self) -> &ClickPoints {
        &self.points
    }

    pub fn image(&self) -> Option<ImageSize> {
        self.image
    }

    pub fn layout(&self) -> Option<CanvasLayout> {
        self.layout
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Record whether the canvas element exists.
    ///
    /// Gives up with [`ControllerError::CanvasNeverAppeared`] once more than
    /// `max_wait_frames` probes have come back empty; the controller is then
    /// disposed.
    pub fn probe_canvas(&mut self, present: bool) -> Result<CanvasProbe, ControllerError> {
        match self.lifecycle {
            Lifecycle::Disposed => Ok(CanvasProbe::Abandoned),
            Lifecycle::Ready => Ok(CanvasProbe::Attached),
            Lifecycle::Uninitialized | Lifecycle::WaitingForCanvas { .. } if present => {
                self.lifecycle = Lifecycle::Ready;
                log::debug!("Canvas found, controller ready");
                Ok(CanvasProbe::Attached)
            }
            Lifecycle::Uninitialized => {
                self.lifecycle = Lifecycle::WaitingForCanvas { frames: 1 };
                Ok(CanvasProbe::Retry)
            }
            Lifecycle::WaitingForCanvas { frames } => {
                if frames >= self.max_wait_frames {
                    self.lifecycle = Lifecycle::Disposed;
                    return Err(ControllerError::CanvasNeverAppeared { frames });
                }
                self.lifecycle = Lifecycle::WaitingForCanvas { frames: frames + 1 };
                Ok(CanvasProbe::Retry)
            }
        }
    }

    /// Record the natural size of the image once it has loaded.
    pub fn image_loaded(&mut self, width: u32, height: u32) -> Result<(), ControllerError> {
        if self.is_disposed() {
            return Ok(());
        }
        let size = ImageSize::new(width, height)?;
        log::debug!("Image loaded: {}x{}", size.width, size.height);
        self.image = Some(size);
        Ok(())
    }

    /// Fit the canvas to the wrapper width.
    ///
    /// Returns the new layout for the binding to apply, or `None` when the
    /// resize is skipped (not ready, no image yet, or unusable width).
    pub fn resize(&mut self, wrapper_width: f64) -> Option<CanvasLayout> {
        if !self.is_ready() {
            return None;
        }
        let layout = CanvasLayout::fit_to_width(wrapper_width, self.image?)?;
        self.layout = Some(layout);
        Some(layout)
    }

    /// Toggle the marker under a click given in client coordinates.
    ///
    /// `rect` is the canvas's current client rect. Returns `None` when the
    /// click is ignored.
    pub fn click(&mut self, rect: &ClientRect, client_x: f64, client_y: f64) -> Option<Toggle> {
        if !self.is_ready() {
            return None;
        }
        let at = self.layout?.screen_to_canvas(rect, client_x, client_y)?;
        let toggle = self.points.toggle(at, self.style.radius);
        log::debug!("{:?} ({} markers)", toggle, self.points.len());
        Some(toggle)
    }

    /// Draw the image and markers. Returns `false` if there is nothing to draw yet.
    pub fn render(&self, target: &mut impl DrawTarget) -> bool {
        if self.is_disposed() {
            return false;
        }
        match &self.layout {
            Some(layout) => {
                render::render_scene(target, layout, &self.points, &self.style);
                true
            }
            None => false,
        }
    }

    /// Payload for the next form submission.
    pub fn payload(&self) -> Result<SubmissionPayload, ControllerError> {
        Ok(SubmissionPayload::from_points(&self.points)?)
    }

    /// Tear the controller down. Later events leave the state untouched.
    pub fn dispose(&mut self) {
        if !self.is_disposed() {
            log::debug!("Controller disposed with {} markers", self.points.len());
        }
        self.lifecycle = Lifecycle::Disposed;
    }
}

impl Default for AnnotationController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANVAS_WAIT_FRAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::render::tests::{Op, Recorder};

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// A ready controller showing an 800x600 image in a 400px wrapper.
    fn ready_controller() -> (AnnotationController, ClientRect) {
        let mut controller = AnnotationController::default();
        assert_eq!(controller.probe_canvas(true).unwrap(), CanvasProbe::Attached);
        controller.image_loaded(800, 600).unwrap();
        let layout = controller.resize(400.0).unwrap();
        (controller, layout.client_rect_at(0.0, 0.0))
    }

    #[test]
    fn test_starts_uninitialized_and_empty() {
        let controller = AnnotationController::default();
        assert_eq!(controller.lifecycle(), Lifecycle::Uninitialized);
        assert!(controller.points().is_empty());
        assert!(controller.layout().is_none());
    }

    #[test]
    fn test_waits_for_canvas_then_attaches() {
        let mut controller = AnnotationController::new(10);

        assert_eq!(controller.probe_canvas(false).unwrap(), CanvasProbe::Retry);
        assert_eq!(controller.lifecycle(), Lifecycle::WaitingForCanvas { frames: 1 });
        assert_eq!(controller.probe_canvas(false).unwrap(), CanvasProbe::Retry);
        assert_eq!(controller.lifecycle(), Lifecycle::WaitingForCanvas { frames: 2 });

        assert_eq!(controller.probe_canvas(true).unwrap(), CanvasProbe::Attached);
        assert_eq!(controller.lifecycle(), Lifecycle::Ready);

        // Probing again once ready changes nothing
        assert_eq!(controller.probe_canvas(false).unwrap(), CanvasProbe::Attached);
        assert!(controller.is_ready());
    }

    #[test]
    fn test_gives_up_after_max_frames() {
        let mut controller = AnnotationController::new(3);

        for _ in 0..3 {
            assert_eq!(controller.probe_canvas(false).unwrap(), CanvasProbe::Retry);
        }
        let err = controller.probe_canvas(false).unwrap_err();
        assert!(matches!(err, ControllerError::CanvasNeverAppeared { frames: 3 }));
        assert!(controller.is_disposed());

        // The canvas showing up later does not revive a dead controller
        assert_eq!(controller.probe_canvas(true).unwrap(), CanvasProbe::Abandoned);
    }

    #[test]
    fn test_dispose_while_waiting_abandons() {
        let mut controller = AnnotationController::default();
        controller.probe_canvas(false).unwrap();
        controller.dispose();
        assert_eq!(controller.probe_canvas(true).unwrap(), CanvasProbe::Abandoned);
    }

    #[test]
    fn test_resize_waits_for_image() {
        let mut controller = AnnotationController::default();
        controller.probe_canvas(true).unwrap();

        assert!(controller.resize(400.0).is_none());
        controller.image_loaded(800, 600).unwrap();
        assert!(controller.resize(400.0).is_some());
    }

    #[test]
    fn test_resize_requires_ready() {
        let mut controller = AnnotationController::default();
        controller.image_loaded(800, 600).unwrap();
        assert!(controller.resize(400.0).is_none());
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let mut controller = AnnotationController::default();
        controller.probe_canvas(true).unwrap();
        assert!(matches!(
            controller.image_loaded(0, 600),
            Err(ControllerError::EmptyImage { width: 0, height: 600 })
        ));
        assert!(controller.image().is_none());
    }

    #[test]
    fn test_click_before_layout_is_ignored() {
        let mut controller = AnnotationController::default();
        controller.probe_canvas(true).unwrap();
        let rect = ClientRect::new(0.0, 0.0, 400.0, 300.0);

        assert!(controller.click(&rect, 10.0, 10.0).is_none());
        assert!(controller.points().is_empty());
    }

    #[test]
    fn test_click_on_hidden_canvas_is_ignored() {
        let (mut controller, _) = ready_controller();
        let hidden = ClientRect::new(0.0, 0.0, 0.0, 0.0);

        assert!(controller.click(&hidden, 10.0, 10.0).is_none());
        assert!(controller.points().is_empty());
    }

    #[test]
    fn test_end_to_end_800x600() {
        let (mut controller, rect) = ready_controller();

        let layout = controller.layout().unwrap();
        assert_eq!(layout.display_width, 400.0);
        assert_eq!(layout.display_height, 300.0);
        assert_eq!((layout.surface_width, layout.surface_height), (800, 600));

        match controller.click(&rect, 100.0, 75.0) {
            Some(Toggle::Added(p)) => {
                assert!(approx_eq(p.x, 200.0));
                assert!(approx_eq(p.y, 150.0));
            }
            other => panic!("expected an added marker, got {:?}", other),
        }
        assert_eq!(controller.points().len(), 1);

        assert!(matches!(
            controller.click(&rect, 100.0, 75.0),
            Some(Toggle::Removed { index: 0, .. })
        ));
        assert!(controller.points().is_empty());

        let json = controller.payload().unwrap().to_json().unwrap();
        assert_eq!(json, r#"{"points":"[]"}"#);
    }

    #[test]
    fn test_click_tie_break_is_by_insertion_order() {
        let (mut controller, rect) = ready_controller();

        // Display (50, 50) -> canvas (100, 100); display (57.5, 50) -> canvas (115, 100)
        controller.click(&rect, 50.0, 50.0);
        controller.click(&rect, 57.5, 50.0);
        assert_eq!(controller.points().len(), 2);

        // Canvas (108, 100) hits both and is closer to the second marker
        controller.click(&rect, 54.0, 50.0);
        assert_eq!(controller.points().as_slice(), &[Point::new(115.0, 100.0)]);
    }

    #[test]
    fn test_markers_survive_resize() {
        let (mut controller, rect) = ready_controller();
        controller.click(&rect, 100.0, 75.0);

        // Wrapper shrinks, the marker keeps its canvas position
        let layout = controller.resize(200.0).unwrap();
        assert_eq!(layout.display_height, 150.0);
        let small = layout.client_rect_at(0.0, 0.0);

        // The same canvas point is now at display (50, 37.5)
        assert!(matches!(
            controller.click(&small, 50.0, 37.5),
            Some(Toggle::Removed { index: 0, .. })
        ));
    }

    #[test]
    fn test_render_draws_markers() {
        let (mut controller, rect) = ready_controller();
        controller.click(&rect, 100.0, 75.0);

        let mut recorder = Recorder::default();
        assert!(controller.render(&mut recorder));
        assert_eq!(recorder.ops.last(), Some(&Op::Circle(Point::new(200.0, 150.0), 10.0)));
    }

    #[test]
    fn test_render_without_layout_draws_nothing() {
        let controller = AnnotationController::default();
        let mut recorder = Recorder::default();
        assert!(!controller.render(&mut recorder));
        assert!(recorder.ops.is_empty());
    }

    #[test]
    fn test_disposed_controller_ignores_events() {
        let (mut controller, rect) = ready_controller();
        controller.click(&rect, 100.0, 75.0);
        controller.dispose();

        let points_before = controller.points().clone();
        let layout_before = controller.layout();

        assert!(controller.click(&rect, 300.0, 200.0).is_none());
        assert!(controller.click(&rect, 100.0, 75.0).is_none());
        assert!(controller.resize(1000.0).is_none());
        controller.image_loaded(10, 10).unwrap();

        assert_eq!(controller.points(), &points_before);
        assert_eq!(controller.layout(), layout_before);
        assert_eq!(controller.image(), ImageSize::new(800, 600).ok());
        assert!(!controller.render(&mut Recorder::default()));
    }

    #[test]
    fn test_payload_lists_markers_in_insertion_order() {
        let (mut controller, rect) = ready_controller();
        controller.click(&rect, 10.0, 10.0);
        controller.click(&rect, 200.0, 100.0);

        let payload = controller.payload().unwrap();
        assert_eq!(
            payload.click_points().unwrap().as_slice(),
            &[Point::new(20.0, 20.0), Point::new(400.0, 200.0)]
        );
    }
}
