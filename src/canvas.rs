//! DOM side of the canvas annotation controller.
//!
//! [`CanvasController`] finds the canvas (retrying once per animation frame
//! while the fragment is not in the document yet), loads the slice image
//! from the hidden data input, and forwards click, resize and submit events
//! to [`AnnotationController`]. Every listener it registers is removed again
//! by [`CanvasController::cleanup`].

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use qcapp_core::constants::HX_VALS_ATTRIBUTE;
use qcapp_core::{
    AnnotationController, AppConfig, CanvasProbe, ClientRect, ControllerError, DrawTarget,
    ElementIds, Lifecycle, Point,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, HtmlInputElement, MouseEvent, Window,
};

use crate::dom;

/// A 2D context paired with the image it draws.
struct Surface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    image: &'a HtmlImageElement,
}

impl DrawTarget for Surface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_image(&mut self, width: f64, height: f64) {
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(self.image, 0.0, 0.0, width, height)
        {
            log::warn!("Failed to draw image: {:?}", e);
        }
    }

    fn set_stroke(&mut self, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            log::warn!("Failed to trace marker at {:?}: {:?}", center, e);
            return;
        }
        self.ctx.stroke();
    }
}

/// Elements and state shared by the event closures of one controller.
struct Scene {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
    wrapper_selector: String,
    form_id: String,
    state: Rc<RefCell<AnnotationController>>,
}

impl Scene {
    fn redraw(&self) {
        let mut surface = Surface {
            ctx: &self.ctx,
            image: &self.image,
        };
        self.state.borrow().render(&mut surface);
    }

    fn resize(&self) {
        let wrapper = match dom::query::<Element>(&self.document, &self.wrapper_selector, "Element")
        {
            Ok(Some(wrapper)) => wrapper,
            Ok(None) => return,
            Err(e) => {
                log::warn!("Skipping resize: {}", e);
                return;
            }
        };

        let width = f64::from(wrapper.client_width());
        let Some(layout) = self.state.borrow_mut().resize(width) else {
            return;
        };

        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", layout.display_width))
            .ok();
        style
            .set_property("height", &format!("{}px", layout.display_height))
            .ok();
        self.canvas.set_width(layout.surface_width);
        self.canvas.set_height(layout.surface_height);

        self.redraw();
    }

    fn click(&self, event: &MouseEvent) {
        let bounds = self.canvas.get_bounding_client_rect();
        let rect = ClientRect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height());

        let toggled = self
            .state
            .borrow_mut()
            .click(&rect, f64::from(event.client_x()), f64::from(event.client_y()));

        if toggled.is_some() {
            self.redraw();
        }
    }

    fn image_loaded(&self) {
        let (width, height) = (self.image.natural_width(), self.image.natural_height());
        if let Err(e) = self.state.borrow_mut().image_loaded(width, height) {
            log::warn!("Not drawing image: {}", e);
            return;
        }
        self.resize();
    }
}

/// Serialize the markers into the form's `hx-vals` attribute.
///
/// Returns `false` when the controller has no canvas to report on.
fn write_payload(
    document: &Document,
    form_id: &str,
    state: &RefCell<AnnotationController>,
) -> Result<bool, ControllerError> {
    let json = {
        let state = state.borrow();
        if !state.is_ready() {
            return Ok(false);
        }
        state.payload()?.to_json()?
    };

    let form: Element = dom::by_id(document, form_id, "Element")?;
    form.set_attribute(HX_VALS_ATTRIBUTE, &json)
        .map_err(dom::js_error)?;
    log::debug!("Attached {} to #{}", json, form_id);
    Ok(true)
}

/// Listeners registered once the canvas is found.
struct Bindings {
    window: Window,
    scene: Rc<Scene>,
    submit: Option<HtmlElement>,
    on_click: Closure<dyn FnMut(MouseEvent)>,
    on_resize: Closure<dyn FnMut()>,
    on_submit: Closure<dyn FnMut(Event)>,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl Bindings {
    fn detach(self) {
        let scene = &self.scene;
        scene
            .canvas
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())
            .ok();
        self.window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .ok();
        if let Some(submit) = &self.submit {
            submit
                .remove_event_listener_with_callback(
                    "click",
                    self.on_submit.as_ref().unchecked_ref(),
                )
                .ok();
        }
        scene.image.set_onload(None);
        scene.image.set_onerror(None);
    }
}

struct Inner {
    ids: ElementIds,
    state: Rc<RefCell<AnnotationController>>,
    bindings: RefCell<Option<Bindings>>,
    retry: RefCell<Option<Closure<dyn FnMut()>>>,
    pending_frame: Cell<Option<i32>>,
}

impl Inner {
    fn attach_or_retry(self: &Rc<Self>) {
        self.pending_frame.set(None);
        if self.bindings.borrow().is_some() {
            return;
        }

        let found = dom::document().and_then(|document| {
            let canvas = dom::optional_by_id::<HtmlCanvasElement>(
                &document,
                &self.ids.canvas,
                "HtmlCanvasElement",
            )?;
            Ok((document, canvas))
        });
        let (document, canvas) = match found {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Canvas controller not started: {}", e);
                self.state.borrow_mut().dispose();
                return;
            }
        };

        let probe = self.state.borrow_mut().probe_canvas(canvas.is_some());
        match (probe, canvas) {
            (Ok(CanvasProbe::Attached), Some(canvas)) => {
                if let Err(e) = self.bind(document, canvas) {
                    log::warn!("Canvas controller not started: {}", e);
                    self.state.borrow_mut().dispose();
                }
            }
            (Ok(CanvasProbe::Retry), _) => self.schedule_retry(),
            (Ok(_), _) => {}
            (Err(e), _) => log::warn!("{}", e),
        }
    }

    fn schedule_retry(self: &Rc<Self>) {
        let window = match dom::window() {
            Ok(window) => window,
            Err(e) => {
                log::warn!("Cannot wait for canvas: {}", e);
                return;
            }
        };

        let mut slot = self.retry.borrow_mut();
        let callback = slot.get_or_insert_with(|| {
            let weak: Weak<Inner> = Rc::downgrade(self);
            Closure::wrap(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.attach_or_retry();
                }
            }) as Box<dyn FnMut()>)
        });

        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => self.pending_frame.set(Some(handle)),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn bind(&self, document: Document, canvas: HtmlCanvasElement) -> Result<(), ControllerError> {
        let window = dom::window()?;
        let ctx = canvas
            .get_context("2d")
            .map_err(dom::js_error)?
            .ok_or(ControllerError::NoRenderingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ControllerError::NoRenderingContext)?;
        let image = HtmlImageElement::new().map_err(dom::js_error)?;

        let scene = Rc::new(Scene {
            document: document.clone(),
            canvas,
            ctx,
            image,
            wrapper_selector: self.ids.wrapper_selector(),
            form_id: self.ids.form.clone(),
            state: Rc::clone(&self.state),
        });

        let on_load = {
            let scene = Rc::clone(&scene);
            Closure::wrap(Box::new(move || scene.image_loaded()) as Box<dyn FnMut()>)
        };
        let on_error = Closure::wrap(Box::new(|| {
            log::warn!("Image data failed to load, canvas left empty");
        }) as Box<dyn FnMut()>);
        scene.image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        scene.image.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let on_click = {
            let scene = Rc::clone(&scene);
            Closure::wrap(Box::new(move |event: MouseEvent| scene.click(&event))
                as Box<dyn FnMut(MouseEvent)>)
        };
        scene
            .canvas
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(dom::js_error)?;

        let on_resize = {
            let scene = Rc::clone(&scene);
            Closure::wrap(Box::new(move || scene.resize()) as Box<dyn FnMut()>)
        };
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(dom::js_error)?;

        let on_submit = {
            let scene = Rc::clone(&scene);
            Closure::wrap(Box::new(move |_event: Event| {
                if let Err(e) = write_payload(&scene.document, &scene.form_id, &scene.state) {
                    log::warn!("Submitting without points: {}", e);
                }
            }) as Box<dyn FnMut(Event)>)
        };
        let submit =
            dom::optional_by_id::<HtmlElement>(&document, &self.ids.submit, "HtmlElement")?;
        match &submit {
            Some(submit) => submit
                .add_event_listener_with_callback("click", on_submit.as_ref().unchecked_ref())
                .map_err(dom::js_error)?,
            None => log::warn!("No #{} control, points only sent via Enter", self.ids.submit),
        }

        // Handlers are in place before the source is set
        let data = dom::optional_by_id::<HtmlInputElement>(
            &document,
            &self.ids.image_data,
            "HtmlInputElement",
        )?
        .map(|input| input.value())
        .unwrap_or_default();
        if data.is_empty() {
            log::warn!("No image data in #{}", self.ids.image_data);
        } else {
            scene.image.set_src(&data);
        }

        *self.bindings.borrow_mut() = Some(Bindings {
            window,
            scene,
            submit,
            on_click,
            on_resize,
            on_submit,
            _on_load: on_load,
            _on_error: on_error,
        });
        log::debug!("Canvas controller attached to #{}", self.ids.canvas);
        Ok(())
    }
}

/// One canvas annotation controller, owned by the page host.
pub struct CanvasController {
    inner: Rc<Inner>,
}

impl CanvasController {
    /// Create a controller. Nothing touches the document until [`start`](Self::start).
    pub fn new(config: &AppConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                ids: config.elements.clone(),
                state: Rc::new(RefCell::new(AnnotationController::from_config(config))),
                bindings: RefCell::new(None),
                retry: RefCell::new(None),
                pending_frame: Cell::new(None),
            }),
        }
    }

    /// Attach to the canvas now, or keep retrying each animation frame until
    /// it appears.
    pub fn start(&self) {
        self.inner.attach_or_retry();
    }

    /// Attach to a canvas the caller knows is in the document.
    pub fn attach(&self, canvas: HtmlCanvasElement) -> Result<(), ControllerError> {
        let document = dom::document()?;
        if let Some(handle) = self.inner.pending_frame.take() {
            dom::window()?.cancel_animation_frame(handle).ok();
        }

        let probe = self.inner.state.borrow_mut().probe_canvas(true)?;
        if probe != CanvasProbe::Attached || self.inner.bindings.borrow().is_some() {
            return Ok(());
        }
        self.inner.bind(document, canvas)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.state.borrow().lifecycle()
    }

    pub fn marker_count(&self) -> usize {
        self.inner.state.borrow().points().len()
    }

    /// Write the current markers to the form's `hx-vals`.
    pub fn write_payload(&self) -> Result<bool, ControllerError> {
        let document = dom::document()?;
        write_payload(&document, &self.inner.ids.form, &self.inner.state)
    }

    /// Cancel a pending canvas wait, remove every listener and dispose the state.
    pub fn cleanup(&self) {
        if let Some(handle) = self.inner.pending_frame.take() {
            if let Ok(window) = dom::window() {
                window.cancel_animation_frame(handle).ok();
            }
        }
        if let Some(bindings) = self.inner.bindings.borrow_mut().take() {
            bindings.detach();
        }
        self.inner.state.borrow_mut().dispose();
        log::debug!("Canvas controller cleaned up");
    }
}
