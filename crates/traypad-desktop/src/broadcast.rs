//! Cross-window settings fan-out

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use traypad_core::Settings;

/// Identifier of one open window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

struct Outbox {
    window: WindowId,
    sender: UnboundedSender<Settings>,
}

/// Fan-out hub relaying a saved settings record to every other open window.
///
/// Delivery is fire-and-forget: a window that already closed is pruned, and a
/// window that misses a message self-corrects on its next load. Messages from
/// one sender arrive in send order; there is no ordering guarantee across
/// senders, so receivers treat every delivery as an idempotent replacement.
#[derive(Default)]
pub struct SettingsBus {
    next_id: AtomicU64,
    outboxes: Mutex<Vec<Outbox>>,
}

impl SettingsBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn outboxes(&self) -> MutexGuard<'_, Vec<Outbox>> {
        self.outboxes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a newly opened window, returning its id and inbox.
    pub fn register(&self) -> (WindowId, UnboundedReceiver<Settings>) {
        let window = WindowId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::unbounded_channel();
        self.outboxes().push(Outbox { window, sender });
        (window, receiver)
    }

    /// Fan the full record out to every open window except the originator.
    ///
    /// The originator already updated its own cache synchronously in `save`;
    /// echoing the record back would restart the save cycle.
    pub fn broadcast(&self, origin: WindowId, settings: &Settings) {
        let mut outboxes = self.outboxes();
        outboxes.retain(|outbox| !outbox.sender.is_closed());
        let mut delivered = 0_usize;
        for outbox in outboxes.iter() {
            if outbox.window == origin {
                continue;
            }
            if outbox.sender.send(settings.clone()).is_ok() {
                delivered += 1;
            }
        }
        tracing::debug!("Settings broadcast delivered to {} window(s)", delivered);
    }

    /// Number of currently open windows
    pub fn window_count(&self) -> usize {
        let mut outboxes = self.outboxes();
        outboxes.retain(|outbox| !outbox.sender.is_closed());
        outboxes.len()
    }
}
