use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::{config, dom, PageHost, ThemeSwitcher};

thread_local! {
    static HOST: RefCell<Option<Rc<PageHost>>> = const { RefCell::new(None) };
    static THEME: RefCell<Option<Rc<ThemeSwitcher>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            web_sys::console::error_1(&format!("qcapp not started: {}", e).into());
            return;
        }
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(boot);
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            web_sys::console::error_1(&format!("qcapp not started: {:?}", e).into());
        }
    } else {
        boot();
    }
}

fn boot() {
    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            web_sys::console::error_1(&format!("qcapp not started: {}", e).into());
            return;
        }
    };

    let config = config::load(&document);
    if console_log::init_with_level(config.log_level.to_level()).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    match ThemeSwitcher::install(&document, &config.elements) {
        Ok(switcher) => THEME.with(|theme| *theme.borrow_mut() = Some(switcher)),
        Err(e) => log::warn!("Theme switcher not installed: {}", e),
    }

    match PageHost::install(config) {
        Ok(host) => HOST.with(|slot| *slot.borrow_mut() = Some(host)),
        Err(e) => log::error!("Page host not installed: {}", e),
    }
}

/// Number of markers on the current canvas.
#[wasm_bindgen(js_name = markerCount)]
pub fn marker_count() -> usize {
    HOST.with(|host| host.borrow().as_ref().map_or(0, |host| host.marker_count()))
}

/// Toggle between the light and dark theme.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() {
    THEME.with(|theme| {
        if let Some(switcher) = theme.borrow().as_ref() {
            switcher.toggle();
        }
    });
}
