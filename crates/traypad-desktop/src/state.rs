//! Per-window settings cache

use std::sync::Arc;

use traypad_core::models::is_supported_locale;
use traypad_core::store::SettingsStore;
use traypad_core::{Error, Result, Settings};

use crate::broadcast::{SettingsBus, WindowId};

/// Per-window settings cache; the single source of truth for that window.
///
/// Saves go through the store first and only replace the cache once the
/// write succeeded, so the UI and the persisted truth never diverge. The
/// `&mut self` receivers serialize saves within a window to last-write-wins.
pub struct SettingsController<S> {
    window: WindowId,
    store: Arc<S>,
    bus: Arc<SettingsBus>,
    current: Settings,
}

impl<S: SettingsStore> SettingsController<S> {
    pub fn new(window: WindowId, store: Arc<S>, bus: Arc<SettingsBus>) -> Self {
        Self {
            window,
            store,
            bus,
            current: Settings::default(),
        }
    }

    /// The cached record
    #[must_use]
    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Load the stored record into the cache.
    ///
    /// Load failure is non-fatal: the cache keeps the canonical default and
    /// the window proceeds as if it were first run.
    pub async fn load(&mut self) -> &Settings {
        match self.store.load().await {
            Ok(Some(settings)) => self.current = settings.sanitized(),
            Ok(None) => {
                tracing::info!("No stored settings, using defaults");
                self.current = Settings::default();
            }
            Err(error) => {
                tracing::warn!("Failed to load settings, using defaults: {}", error);
                self.current = Settings::default();
            }
        }
        &self.current
    }

    /// Persist `settings`, replace the cache, and notify sibling windows.
    pub async fn save(&mut self, settings: Settings) -> Result<()> {
        if !is_supported_locale(&settings.language) {
            return Err(Error::InvalidInput(format!(
                "unsupported locale: {}",
                settings.language
            )));
        }
        self.store.persist(&settings).await?;
        self.current = settings;
        self.bus.broadcast(self.window, &self.current);
        Ok(())
    }

    /// Adopt a record another window persisted.
    ///
    /// No re-persist and no re-broadcast; otherwise a save in one window
    /// would ripple back and forth between windows forever.
    pub fn receive_broadcast(&mut self, settings: Settings) {
        self.current = settings;
    }
}
