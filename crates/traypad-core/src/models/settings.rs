//! Application settings model

use serde::{Deserialize, Serialize};

/// Locales with a bundled translation catalog.
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en-US"];

/// Locale used when nothing valid is stored.
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Check whether a locale tag has a bundled catalog.
#[must_use]
pub fn is_supported_locale(tag: &str) -> bool {
    SUPPORTED_LOCALES.contains(&tag)
}

/// Which entity a primary tray click creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeftClickAction {
    /// Create a todo
    #[default]
    Todo,
    /// Create a note
    Note,
}

/// Theme mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow system preference
    #[default]
    System,
}

/// Application settings
///
/// One logical record shared by every open window. Partial records are never
/// persisted; a load that cannot produce a complete record falls back to
/// [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Which entity a primary click creates
    pub left_click_action: LeftClickAction,
    /// Theme preference
    pub theme: ThemeMode,
    /// Display locale tag (must match a supported catalog entry)
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            left_click_action: LeftClickAction::Todo,
            theme: ThemeMode::System,
            language: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Settings {
    /// Replace an unsupported or blank `language` with [`DEFAULT_LOCALE`].
    ///
    /// Applied to externally sourced records so every cached record points at
    /// a catalog that actually exists.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !is_supported_locale(&self.language) {
            tracing::warn!(
                "Unsupported locale '{}', falling back to {}",
                self.language,
                DEFAULT_LOCALE
            );
            self.language = DEFAULT_LOCALE.to_string();
        }
        self
    }
}
