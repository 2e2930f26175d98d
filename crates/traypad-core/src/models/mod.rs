//! Data models for Traypad

mod settings;

pub use settings::{
    is_supported_locale, LeftClickAction, Settings, ThemeMode, DEFAULT_LOCALE, SUPPORTED_LOCALES,
};
