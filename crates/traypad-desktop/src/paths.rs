//! Default on-disk locations for desktop state

use std::path::PathBuf;

const APP_DIR: &str = "traypad";

/// Default settings store document (`<config>/traypad/store.json`)
#[must_use]
pub fn default_store_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR).join("store.json"))
}

/// Sidecar file remembering the last display locale
#[must_use]
pub fn bootstrap_locale_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR).join("language"))
}
