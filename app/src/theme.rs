//! Theme preference handling
//!
//! Reads the persisted light/dark preference once at startup, applies it to
//! the document, and persists changes made through the toggle.

use studyspark_types::{THEME_STORAGE_KEY, Theme};

use crate::dom;

/// Read the stored preference (default light) and apply it to the document.
/// Returns the theme so the toggle control can mirror it.
pub fn initialize() -> Theme {
    let theme = dom::storage_get(THEME_STORAGE_KEY)
        .map(|value| Theme::from_str(&value))
        .unwrap_or_default();
    dom::set_document_theme(theme);
    theme
}

/// Apply and persist a newly chosen preference.
pub fn set(theme: Theme) {
    dom::set_document_theme(theme);
    dom::storage_set(THEME_STORAGE_KEY, theme.as_str());
}
