//! Typed element lookups.

use qcapp_core::ControllerError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

pub fn window() -> Result<Window, ControllerError> {
    web_sys::window().ok_or_else(|| ControllerError::missing("window"))
}

pub fn document() -> Result<Document, ControllerError> {
    window()?
        .document()
        .ok_or_else(|| ControllerError::missing("document"))
}

/// Stringify a thrown JS value.
pub fn js_error(value: JsValue) -> ControllerError {
    ControllerError::Js(format!("{:?}", value))
}

/// Look up an element by id. A missing element is `Ok(None)`; an element of
/// the wrong type is an error.
pub fn optional_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<Option<T>, ControllerError> {
    match document.get_element_by_id(id) {
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|_| ControllerError::WrongElementType {
                selector: id.to_string(),
                expected,
            }),
        None => Ok(None),
    }
}

/// Look up a required element by id.
pub fn by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, ControllerError> {
    optional_by_id(document, id, expected)?.ok_or_else(|| ControllerError::missing(id))
}

/// First element matching a CSS selector, if any.
pub fn query<T: JsCast>(
    document: &Document,
    selector: &str,
    expected: &'static str,
) -> Result<Option<T>, ControllerError> {
    match document.query_selector(selector).map_err(js_error)? {
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|_| ControllerError::WrongElementType {
                selector: selector.to_string(),
                expected,
            }),
        None => Ok(None),
    }
}
