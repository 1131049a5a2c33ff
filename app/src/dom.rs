//! Thin helpers over the browser surface
//!
//! Everything that touches `window`/`document` directly lives here, so the
//! rest of the frontend stays free of raw `web_sys` plumbing. All helpers
//! degrade to no-ops outside a browser context.

use studyspark_types::Theme;

/// Blocking user-facing alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Hostname of the page, used to pick the backend deployment.
pub fn hostname() -> Option<String> {
    web_sys::window()?.location().hostname().ok()
}

/// Apply a theme as the `data-theme` attribute on the document element.
pub fn set_document_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

/// Read a value from `localStorage`.
pub fn storage_get(key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()
        .flatten()?
        .get_item(key)
        .ok()
        .flatten()
}

/// Write a value to `localStorage`. Storage absence is silently ignored.
pub fn storage_set(key: &str, value: &str) {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    if let Some(storage) = storage {
        let _ = storage.set_item(key, value);
    }
}

/// Smooth-scroll the element with the given id into view.
pub fn scroll_into_view(id: &str) {
    let document = web_sys::window().and_then(|w| w.document());
    let Some(document) = document else { return };
    if let Some(element) = document.get_element_by_id(id) {
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
