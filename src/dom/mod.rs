//! Page Bindings
//!
//! Connects the pure dashboard logic to the server-rendered report markup.
//! Every binding tolerates missing elements: a page without a given widget
//! simply does not get that behavior.

mod comments;
mod pickers;
mod rows;
mod status;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::{DashboardConfig, CONFIG_ELEMENT_ID, PAGE_DATA_ELEMENT_ID};
use crate::models::PageData;

pub use comments::bind_comments;
pub use pickers::bind_filters;
pub use status::bind_status;

pub(crate) fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

pub(crate) fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// All elements matching `selector`, in document order
pub(crate) fn query_all(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn json_script(id: &str) -> Option<String> {
    by_id::<Element>(id).and_then(|el| el.text_content())
}

/// Config override embedded in the page, or defaults
pub fn read_config() -> DashboardConfig {
    match json_script(CONFIG_ELEMENT_ID) {
        Some(raw) => DashboardConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("[CONFIG] {}; using defaults", e);
            DashboardConfig::default()
        }),
        None => DashboardConfig::default(),
    }
}

/// Picker options embedded in the page, or none
pub fn read_page_data() -> PageData {
    json_script(PAGE_DATA_ELEMENT_ID)
        .and_then(|raw| match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("[CONFIG] Ignoring malformed page data: {}", e);
                None
            }
        })
        .unwrap_or_default()
}
