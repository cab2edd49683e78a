//! Page configuration loading.
//!
//! Reads the optional `<script type="application/json" id="qcapp-config">`
//! block rendered by the server.

use qcapp_core::constants::CONFIG_ELEMENT_ID;
use qcapp_core::AppConfig;
use web_sys::Document;

/// Load the embedded configuration, falling back to defaults.
pub fn load(document: &Document) -> AppConfig {
    let json = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());

    if json.is_none() {
        log::debug!("No #{} block, using default configuration", CONFIG_ELEMENT_ID);
    }
    AppConfig::from_embedded(json.as_deref())
}
