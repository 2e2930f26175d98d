//! Bootstrap display locale
//!
//! Seeds the UI locale before the canonical settings record has finished
//! loading. Once that record is in, its `language` field is authoritative
//! and the sidecar value only matters for the next startup.

use std::path::Path;

use traypad_core::models::{is_supported_locale, DEFAULT_LOCALE};

/// Read the locale tag remembered from the previous run.
///
/// Missing or unsupported values fall back to [`DEFAULT_LOCALE`] so startup
/// always has a catalog to render with.
#[must_use]
pub fn bootstrap_locale(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let tag = raw.trim();
            if is_supported_locale(tag) {
                tag.to_string()
            } else {
                tracing::warn!("Ignoring unsupported bootstrap locale '{}'", tag);
                DEFAULT_LOCALE.to_string()
            }
        }
        Err(error) => {
            tracing::debug!("No bootstrap locale ({}), using {}", error, DEFAULT_LOCALE);
            DEFAULT_LOCALE.to_string()
        }
    }
}

/// Remember the display locale for the next startup.
///
/// Best-effort: a failed write only delays the correct locale until the
/// canonical record loads.
pub fn remember_locale(path: &Path, tag: &str) {
    if let Some(parent) = path.parent() {
        if let Err(error) = std::fs::create_dir_all(parent) {
            tracing::warn!("Failed to prepare bootstrap locale dir: {}", error);
            return;
        }
    }
    if let Err(error) = std::fs::write(path, tag) {
        tracing::warn!("Failed to remember locale: {}", error);
    }
}
