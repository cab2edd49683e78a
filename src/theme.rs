//! Light/dark theme switcher.
//!
//! Swaps the bootswatch stylesheet, updates the toggle button and body
//! class, and remembers the choice in localStorage.

use std::cell::Cell;
use std::rc::Rc;

use qcapp_core::constants::THEME_STORAGE_KEY;
use qcapp_core::{ControllerError, ElementIds, ThemeChoice};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlLinkElement, Storage};

use crate::dom;

/// The theme elements of the page layout and the current choice.
pub struct ThemeSwitcher {
    document: Document,
    link: HtmlLinkElement,
    toggle: HtmlElement,
    icon: Element,
    text: Element,
    storage: Option<Storage>,
    current: Cell<ThemeChoice>,
}

impl ThemeSwitcher {
    /// Find the theme elements, apply the remembered theme and wire the toggle.
    pub fn install(document: &Document, ids: &ElementIds) -> Result<Rc<Self>, ControllerError> {
        let storage = match dom::window()?.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("localStorage unavailable, theme will not be remembered: {:?}", e);
                None
            }
        };
        let stored = storage
            .as_ref()
            .and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());

        let switcher = Rc::new(Self {
            document: document.clone(),
            link: dom::by_id(document, &ids.theme_css, "HtmlLinkElement")?,
            toggle: dom::by_id(document, &ids.theme_toggle, "HtmlElement")?,
            icon: dom::by_id(document, &ids.theme_icon, "Element")?,
            text: dom::by_id(document, &ids.theme_text, "Element")?,
            storage,
            current: Cell::new(ThemeChoice::from_stored(stored.as_deref())),
        });
        switcher.apply(switcher.current.get());

        let on_toggle = {
            let switcher = Rc::clone(&switcher);
            Closure::wrap(Box::new(move |_event: Event| switcher.toggle())
                as Box<dyn FnMut(Event)>)
        };
        switcher
            .toggle
            .add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())
            .map_err(dom::js_error)?;
        // The toggle sits in the page layout, outside any swapped fragment
        on_toggle.forget();

        Ok(switcher)
    }

    pub fn current(&self) -> ThemeChoice {
        self.current.get()
    }

    pub fn toggle(&self) {
        self.apply(self.current.get().toggled());
    }

    pub fn apply(&self, theme: ThemeChoice) {
        let spec = theme.spec();

        self.link.set_href(spec.url);
        self.icon.set_class_name(spec.icon);
        self.text.set_text_content(Some(spec.text));
        if let Some(body) = self.document.body() {
            body.set_class_name(&theme.body_class());
        }

        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(THEME_STORAGE_KEY, theme.key()) {
                log::warn!("Failed to remember theme: {:?}", e);
            }
        }

        self.current.set(theme);
        log::debug!("Applied {} theme ({})", theme.key(), spec.name);
    }
}
