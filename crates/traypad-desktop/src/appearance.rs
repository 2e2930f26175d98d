//! Appearance application for one window

use traypad_core::{Result, ResolvedTheme};

/// Content styling marker on the window's root rendering surface.
///
/// Synchronous and infallible; this is the system of record for in-content
/// styling regardless of what happens to the window chrome.
#[derive(Debug, Default)]
pub struct ContentStyle {
    theme: ResolvedTheme,
}

impl ContentStyle {
    pub fn set(&mut self, theme: ResolvedTheme) {
        self.theme = theme;
    }

    #[must_use]
    pub const fn theme(&self) -> ResolvedTheme {
        self.theme
    }

    /// Marker class for the root surface ("light" or "dark")
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.theme.css_class()
    }
}

/// Host windowing-layer hook for native theme and vibrancy material.
#[allow(async_fn_in_trait)]
pub trait WindowChrome {
    /// Apply window-level appearance matching `theme`.
    ///
    /// Transient failures are expected (for example, the window is not yet
    /// realized) and the caller treats them as non-fatal.
    async fn apply_vibrancy(&self, theme: ResolvedTheme) -> Result<()>;
}

/// Applies a resolved theme to the two rendering surfaces of one window.
pub struct AppearanceApplier<C> {
    content: ContentStyle,
    chrome: C,
}

impl<C: WindowChrome> AppearanceApplier<C> {
    pub fn new(chrome: C) -> Self {
        Self {
            content: ContentStyle::default(),
            chrome,
        }
    }

    #[must_use]
    pub const fn content(&self) -> &ContentStyle {
        &self.content
    }

    /// Apply `theme` to content styling, then to the window chrome.
    ///
    /// The content marker is updated unconditionally and first; a chrome
    /// failure is logged and swallowed and never reverts it.
    pub async fn apply(&mut self, theme: ResolvedTheme) {
        self.content.set(theme);
        if let Err(error) = self.chrome.apply_vibrancy(theme).await {
            tracing::warn!("Failed to apply window chrome appearance: {}", error);
        }
    }
}
