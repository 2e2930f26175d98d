//! Per-window composition root

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::watch;
use traypad_core::store::SettingsStore;
use traypad_core::{resolve_theme, Result, ResolvedTheme, Settings, ThemeMode};

use crate::appearance::{AppearanceApplier, WindowChrome};
use crate::bootstrap_locale::remember_locale;
use crate::broadcast::SettingsBus;
use crate::state::SettingsController;
use crate::theme::ThemeResolver;

/// Everything one window owns: settings cache, theme resolver, appearance.
///
/// Each window runs its session inside its own single-threaded context;
/// sessions share nothing and coordinate only through the [`SettingsBus`].
/// Dropping the session releases the OS-signal subscription with it.
pub struct WindowSession<S, C> {
    controller: SettingsController<S>,
    resolver: ThemeResolver,
    applier: AppearanceApplier<C>,
    broadcasts: UnboundedReceiver<Settings>,
    signal_events: UnboundedReceiver<bool>,
    bootstrap_locale_path: Option<PathBuf>,
}

impl<S: SettingsStore, C: WindowChrome> WindowSession<S, C> {
    /// Open a session for a newly created window.
    ///
    /// `signal` is the live OS appearance feed shared by all windows of the
    /// process; `chrome` is this window's handle into the windowing layer.
    pub fn open(
        store: Arc<S>,
        bus: &Arc<SettingsBus>,
        signal: watch::Receiver<bool>,
        chrome: C,
    ) -> Self {
        let (window, broadcasts) = bus.register();
        let (events_tx, signal_events) = mpsc::unbounded_channel();
        Self {
            controller: SettingsController::new(window, store, Arc::clone(bus)),
            resolver: ThemeResolver::new(signal, events_tx),
            applier: AppearanceApplier::new(chrome),
            broadcasts,
            signal_events,
            bootstrap_locale_path: None,
        }
    }

    /// Remember the display locale at `path` after every successful save.
    #[must_use]
    pub fn with_bootstrap_locale(mut self, path: impl Into<PathBuf>) -> Self {
        self.bootstrap_locale_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.controller.current()
    }

    #[must_use]
    pub fn effective_theme(&self) -> ResolvedTheme {
        self.applier.content().theme()
    }

    /// Marker class currently on the root rendering surface
    #[must_use]
    pub fn content_class(&self) -> &'static str {
        self.applier.content().css_class()
    }

    /// Whether this window currently holds an OS-signal subscription
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.resolver.is_subscribed()
    }

    /// Load stored settings and render the initial appearance.
    pub async fn init(&mut self) {
        self.controller.load().await;
        self.refresh().await;
    }

    /// Persist a settings edit made in this window.
    ///
    /// On persist failure the cache, subscription, and appearance are left
    /// exactly as they were and the error surfaces to the caller.
    pub async fn save(&mut self, settings: Settings) -> Result<()> {
        self.controller.save(settings).await?;
        if let Some(path) = &self.bootstrap_locale_path {
            remember_locale(path, &self.controller.current().language);
        }
        self.refresh().await;
        Ok(())
    }

    /// Adopt a record saved by a sibling window.
    pub async fn handle_broadcast(&mut self, settings: Settings) {
        self.controller.receive_broadcast(settings);
        self.refresh().await;
    }

    /// React to an OS appearance flip.
    ///
    /// A flip queued before the preference moved away from `system` is
    /// dropped; explicit preferences never track the signal.
    pub async fn handle_os_signal(&mut self, dark: bool) {
        if self.controller.current().theme != ThemeMode::System {
            return;
        }
        let theme = resolve_theme(ThemeMode::System, dark);
        self.applier.apply(theme).await;
    }

    /// Wait for and process the next inbound event.
    ///
    /// Returns `false` once every inbound channel has closed, which is the
    /// window's teardown point.
    pub async fn pump(&mut self) -> bool {
        tokio::select! {
            Some(settings) = self.broadcasts.recv() => {
                self.handle_broadcast(settings).await;
                true
            }
            Some(dark) = self.signal_events.recv() => {
                self.handle_os_signal(dark).await;
                true
            }
            else => false,
        }
    }

    /// Drive inbound events until teardown.
    pub async fn run(&mut self) {
        while self.pump().await {}
    }

    async fn refresh(&mut self) {
        let mode = self.controller.current().theme;
        self.resolver.sync_subscription(mode);
        let theme = self.resolver.resolve(mode);
        self.applier.apply(theme).await;
    }
}
