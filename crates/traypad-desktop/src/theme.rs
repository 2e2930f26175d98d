//! Theme resolution and OS-signal subscription for one window

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use traypad_core::{resolve_theme, ResolvedTheme, ThemeMode};

/// Live handle on the OS appearance signal.
///
/// Exists only while the window's preference is `system`. Dropping it stops
/// the forwarding task, so a released subscription can never fire against a
/// torn-down window.
pub struct Subscription {
    forwarder: JoinHandle<()>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

/// Per-window theme resolver owning the OS-signal subscription lifecycle.
pub struct ThemeResolver {
    signal: watch::Receiver<bool>,
    events: UnboundedSender<bool>,
    subscription: Option<Subscription>,
}

impl ThemeResolver {
    /// `signal` is the live OS appearance feed; `events` is where signal
    /// flips are delivered while subscribed (the window's event channel).
    pub fn new(signal: watch::Receiver<bool>, events: UnboundedSender<bool>) -> Self {
        Self {
            signal,
            events,
            subscription: None,
        }
    }

    /// Resolve a preference against the current OS signal value.
    #[must_use]
    pub fn resolve(&self, mode: ThemeMode) -> ResolvedTheme {
        resolve_theme(mode, *self.signal.borrow())
    }

    /// Whether a live OS-signal subscription is active
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Align the subscription with the preference: subscribed iff `system`.
    ///
    /// Subscribing is idempotent; at most one subscription is live per
    /// window. Moving away from `system` releases the handle immediately.
    pub fn sync_subscription(&mut self, mode: ThemeMode) {
        match mode {
            ThemeMode::System => {
                if self.subscription.is_none() {
                    self.subscription = Some(self.subscribe());
                }
            }
            ThemeMode::Light | ThemeMode::Dark => {
                self.subscription = None;
            }
        }
    }

    fn subscribe(&self) -> Subscription {
        let mut signal = self.signal.clone();
        let events = self.events.clone();
        let forwarder = tokio::spawn(async move {
            while signal.changed().await.is_ok() {
                let dark = *signal.borrow_and_update();
                if events.send(dark).is_err() {
                    break;
                }
            }
        });
        Subscription { forwarder }
    }
}
