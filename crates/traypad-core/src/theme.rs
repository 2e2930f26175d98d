//! Theme resolution
//!
//! Maps the persisted three-valued preference plus the live OS appearance
//! signal to the binary rendering mode windows actually draw with.

use crate::models::ThemeMode;

/// Resolved theme (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Check if the theme is dark
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// CSS class / marker name for content styling
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Resolve a theme preference to an actual light/dark theme.
///
/// `Light` and `Dark` pass through untouched; `System` follows the OS
/// appearance signal.
#[must_use]
pub const fn resolve_theme(mode: ThemeMode, system_dark: bool) -> ResolvedTheme {
    match mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::System => {
            if system_dark {
                ResolvedTheme::Dark
            } else {
                ResolvedTheme::Light
            }
        }
    }
}
