//! Page host: owner of the live canvas controller.
//!
//! htmx swaps the rating fragment after every submission. The host disposes
//! the old [`CanvasController`] before building its replacement, so at most
//! one controller ever listens on the canvas and the window. It also owns the
//! single document-level keyboard listener.

use std::cell::RefCell;
use std::rc::Rc;

use qcapp_core::constants::AFTER_SETTLE_EVENT;
use qcapp_core::{AppConfig, ControllerError, FocusContext, KeyAction};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, HtmlCanvasElement, HtmlFormElement, HtmlInputElement, KeyboardEvent,
};

use crate::canvas::CanvasController;
use crate::{dom, ratings};

pub struct PageHost {
    config: AppConfig,
    controller: RefCell<Option<CanvasController>>,
}

impl PageHost {
    /// Build the first controller and register the page-lifetime listeners.
    pub fn install(config: AppConfig) -> Result<Rc<Self>, ControllerError> {
        let document = dom::document()?;
        let body = document
            .body()
            .ok_or_else(|| ControllerError::missing("body"))?;

        let host = Rc::new(Self {
            config,
            controller: RefCell::new(None),
        });
        host.replace();

        let on_settle = {
            let host = Rc::clone(&host);
            Closure::wrap(Box::new(move |_event: Event| host.replace()) as Box<dyn FnMut(Event)>)
        };
        body.add_event_listener_with_callback(
            AFTER_SETTLE_EVENT,
            on_settle.as_ref().unchecked_ref(),
        )
        .map_err(dom::js_error)?;
        on_settle.forget();

        let on_key = {
            let host = Rc::clone(&host);
            Closure::wrap(Box::new(move |event: KeyboardEvent| host.on_key(&event))
                as Box<dyn FnMut(KeyboardEvent)>)
        };
        document
            .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
            .map_err(dom::js_error)?;
        on_key.forget();

        ratings::install_reset_listener(&document, &host.config.elements)?;

        log::info!("Page host installed");
        Ok(host)
    }

    /// Dispose the live controller, then start a fresh one.
    pub fn replace(&self) {
        let old = self.controller.borrow_mut().take();
        if let Some(old) = old {
            log::debug!("Replacing controller ({:?})", old.lifecycle());
            old.cleanup();
        }

        let controller = CanvasController::new(&self.config);
        let canvas = dom::document().ok().and_then(|document| {
            dom::optional_by_id::<HtmlCanvasElement>(
                &document,
                &self.config.elements.canvas,
                "HtmlCanvasElement",
            )
            .ok()
            .flatten()
        });
        match canvas {
            Some(canvas) => {
                if let Err(e) = controller.attach(canvas) {
                    log::warn!("Canvas controller not started: {}", e);
                }
            }
            None => controller.start(),
        }

        *self.controller.borrow_mut() = Some(controller);
    }

    /// Number of markers on the live controller.
    pub fn marker_count(&self) -> usize {
        self.controller
            .borrow()
            .as_ref()
            .map_or(0, CanvasController::marker_count)
    }

    fn on_key(&self, event: &KeyboardEvent) {
        let Ok(document) = dom::document() else {
            return;
        };
        let ids = &self.config.elements;

        let active = document.active_element();
        let tag = active.as_ref().map(|element| element.tag_name());
        let input_type = active
            .as_ref()
            .and_then(|element| element.dyn_ref::<HtmlInputElement>())
            .map(|input| input.type_());
        let focus = FocusContext::new(
            tag.as_deref(),
            input_type.as_deref(),
            ratings::group_state(&document, ids),
        );

        match self.config.hotkeys.resolve(&event.key(), focus) {
            KeyAction::SelectRating(rating) => {
                ratings::select(&document, ids, rating);
                event.prevent_default();
            }
            KeyAction::Submit => {
                event.prevent_default();
                if let Err(e) = self.submit(&document) {
                    log::warn!("Enter did not submit: {}", e);
                }
            }
            KeyAction::Ignore => {}
        }
    }

    /// Attach the markers, then submit the form the way the submit control would.
    fn submit(&self, document: &Document) -> Result<(), ControllerError> {
        if let Some(controller) = self.controller.borrow().as_ref() {
            if let Err(e) = controller.write_payload() {
                log::warn!("Submitting without points: {}", e);
            }
        }

        let form: HtmlFormElement =
            dom::by_id(document, &self.config.elements.form, "HtmlFormElement")?;
        let has_request_submit =
            js_sys::Reflect::has(&form, &JsValue::from_str("requestSubmit")).unwrap_or(false);
        if has_request_submit {
            form.request_submit().map_err(dom::js_error)
        } else {
            form.submit().map_err(dom::js_error)
        }
    }
}
