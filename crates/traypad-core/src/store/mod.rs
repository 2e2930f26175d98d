//! Durable settings storage for Traypad

mod json_file;

pub use json_file::{JsonFileStore, SettingsStore, SETTINGS_STORE_KEY};
