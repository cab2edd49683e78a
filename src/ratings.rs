//! Rating radio group glue.

use qcapp_core::{ControllerError, ElementIds, Rating, RatingGroup};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

use crate::dom;

/// Rating radios inside the form, in document order.
fn radios(document: &Document, ids: &ElementIds) -> Vec<HtmlInputElement> {
    let Some(form) = document.get_element_by_id(&ids.form) else {
        return Vec::new();
    };
    let Ok(nodes) = form.query_selector_all(&ids.rating_selector()) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
        .collect()
}

/// Whether the page has a rating group and whether anything is checked.
pub fn group_state(document: &Document, ids: &ElementIds) -> RatingGroup {
    let radios = radios(document, ids);
    if radios.is_empty() {
        RatingGroup::Absent
    } else if radios.iter().any(|r| r.checked()) {
        RatingGroup::Checked
    } else {
        RatingGroup::Unchecked
    }
}

/// Check the radio for `rating`, click its label and focus it.
pub fn select(document: &Document, ids: &ElementIds, rating: Rating) {
    let Some(radio) = radios(document, ids)
        .into_iter()
        .find(|r| r.value() == rating.value())
    else {
        log::debug!("No radio for {}", rating.name());
        return;
    };

    radio.set_checked(true);

    // The label click drives the button-group styling
    let label = document
        .get_element_by_id(&ids.form)
        .and_then(|form| {
            form.query_selector(&ElementIds::label_selector(&radio.id()))
                .ok()
                .flatten()
        })
        .and_then(|label| label.dyn_into::<HtmlElement>().ok());
    if let Some(label) = label {
        label.click();
    }

    radio.focus().ok();
    log::debug!("Selected rating {}", rating.name());
}

/// Blur a focused rating radio when its form is reset.
///
/// Registered on the document since the form itself is swapped by htmx.
pub fn install_reset_listener(
    document: &Document,
    ids: &ElementIds,
) -> Result<(), ControllerError> {
    let ids = ids.clone();
    let listener_document = document.clone();
    let on_reset = Closure::wrap(Box::new(move |event: Event| {
        let is_form = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|target| target.id() == ids.form);
        if !is_form {
            return;
        }

        let Some(active) = listener_document.active_element() else {
            return;
        };
        let focused_radio = radios(&listener_document, &ids)
            .iter()
            .any(|radio| radio.is_same_node(Some(active.as_ref())));
        if focused_radio {
            if let Ok(active) = active.dyn_into::<HtmlElement>() {
                active.blur().ok();
            }
        }
    }) as Box<dyn FnMut(Event)>);

    document
        .add_event_listener_with_callback("reset", on_reset.as_ref().unchecked_ref())
        .map_err(dom::js_error)?;
    // Lives as long as the page
    on_reset.forget();
    Ok(())
}
