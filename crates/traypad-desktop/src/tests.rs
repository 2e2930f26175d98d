//! End-to-end window scenarios
//!
//! Each test wires real sessions to an in-memory store and a recording
//! chrome, then drives saves, broadcasts, and OS signal flips the way the
//! windowing shell would.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tokio::sync::watch;

use traypad_core::store::SettingsStore;
use traypad_core::{Error, LeftClickAction, ResolvedTheme, Result, Settings, ThemeMode};

use crate::broadcast::SettingsBus;
use crate::session::WindowSession;
use crate::WindowChrome;

fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct MemoryStore {
    stored: Mutex<Option<Settings>>,
    fail_persist: Mutex<bool>,
    load_calls: Mutex<usize>,
    persist_calls: Mutex<usize>,
}

impl MemoryStore {
    fn seeded(settings: Settings) -> Self {
        Self {
            stored: Mutex::new(Some(settings)),
            ..Self::default()
        }
    }

    fn load_calls(&self) -> usize {
        *self.load_calls.lock().unwrap()
    }

    fn persist_calls(&self) -> usize {
        *self.persist_calls.lock().unwrap()
    }

    fn set_fail_persist(&self, fail: bool) {
        *self.fail_persist.lock().unwrap() = fail;
    }
}

impl SettingsStore for MemoryStore {
    async fn load(&self) -> Result<Option<Settings>> {
        *self.load_calls.lock().unwrap() += 1;
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn persist(&self, settings: &Settings) -> Result<()> {
        *self.persist_calls.lock().unwrap() += 1;
        if *self.fail_persist.lock().unwrap() {
            return Err(Error::Io(std::io::Error::other("write failed")));
        }
        *self.stored.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingChrome {
    calls: Arc<Mutex<Vec<ResolvedTheme>>>,
    fail: bool,
}

impl RecordingChrome {
    fn calls(&self) -> Vec<ResolvedTheme> {
        self.calls.lock().unwrap().clone()
    }
}

impl WindowChrome for RecordingChrome {
    async fn apply_vibrancy(&self, theme: ResolvedTheme) -> Result<()> {
        self.calls.lock().unwrap().push(theme);
        if self.fail {
            return Err(Error::Appearance("window not realized".to_string()));
        }
        Ok(())
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    bus: Arc<SettingsBus>,
    signal_tx: watch::Sender<bool>,
    signal_rx: watch::Receiver<bool>,
}

impl Harness {
    fn new(store: MemoryStore, system_dark: bool) -> Self {
        init_test_logging();
        let (signal_tx, signal_rx) = watch::channel(system_dark);
        Self {
            store: Arc::new(store),
            bus: Arc::new(SettingsBus::new()),
            signal_tx,
            signal_rx,
        }
    }

    fn open_window(&self, chrome: RecordingChrome) -> WindowSession<MemoryStore, RecordingChrome> {
        WindowSession::open(
            Arc::clone(&self.store),
            &self.bus,
            self.signal_rx.clone(),
            chrome,
        )
    }
}

fn dark_settings() -> Settings {
    Settings {
        theme: ThemeMode::Dark,
        ..Settings::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_empty_store_yields_builtin_defaults() {
    let harness = Harness::new(MemoryStore::default(), false);
    let mut window = harness.open_window(RecordingChrome::default());

    window.init().await;

    assert_eq!(
        window.settings(),
        &Settings {
            left_click_action: LeftClickAction::Todo,
            theme: ThemeMode::System,
            language: "zh-CN".to_string(),
        }
    );
    // Defaults follow the system preference, which reports light here.
    assert_eq!(window.effective_theme(), ResolvedTheme::Light);
    assert!(window.is_subscribed());
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_save_fans_out_to_sibling_window() {
    let light = Settings {
        theme: ThemeMode::Light,
        ..Settings::default()
    };
    let harness = Harness::new(MemoryStore::seeded(light), false);
    let mut saver = harness.open_window(RecordingChrome::default());
    let mut sibling = harness.open_window(RecordingChrome::default());
    saver.init().await;
    sibling.init().await;
    assert_eq!(sibling.content_class(), "light");

    saver.save(dark_settings()).await.unwrap();
    assert!(sibling.pump().await);

    // The sibling adopted the record and flipped without saving anything.
    assert_eq!(sibling.settings(), &dark_settings());
    assert_eq!(sibling.content_class(), "dark");
    assert_eq!(harness.store.persist_calls(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_os_signal_flip_recomputes_without_store_access() {
    let harness = Harness::new(MemoryStore::default(), false);
    let chrome = RecordingChrome::default();
    let mut window = harness.open_window(chrome.clone());
    window.init().await;
    assert_eq!(window.effective_theme(), ResolvedTheme::Light);
    let loads_after_init = harness.store.load_calls();
    let chrome_calls_after_init = chrome.calls().len();

    harness.signal_tx.send(true).unwrap();
    assert!(window.pump().await);

    assert_eq!(window.effective_theme(), ResolvedTheme::Dark);
    assert_eq!(chrome.calls().len(), chrome_calls_after_init + 1);
    assert_eq!(harness.store.load_calls(), loads_after_init);
    assert_eq!(harness.store.persist_calls(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_failed_save_surfaces_error_and_changes_nothing() {
    let harness = Harness::new(MemoryStore::default(), false);
    let mut window = harness.open_window(RecordingChrome::default());
    window.init().await;
    let before = window.settings().clone();
    let (_observer, mut observer_rx) = harness.bus.register();
    harness.store.set_fail_persist(true);

    let result = window.save(dark_settings()).await;

    assert!(result.is_err());
    assert_eq!(window.settings(), &before);
    assert!(observer_rx.try_recv().is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn cycling_preference_is_deterministic_and_isolated() {
    let harness = Harness::new(MemoryStore::default(), false);
    let mut window = harness.open_window(RecordingChrome::default());
    window.init().await;
    let action = window.settings().left_click_action;
    let language = window.settings().language.clone();

    for (mode, expected, subscribed) in [
        (ThemeMode::Light, ResolvedTheme::Light, false),
        (ThemeMode::Dark, ResolvedTheme::Dark, false),
        (ThemeMode::System, ResolvedTheme::Light, true),
        (ThemeMode::Light, ResolvedTheme::Light, false),
    ] {
        let settings = Settings {
            theme: mode,
            left_click_action: action,
            language: language.clone(),
        };
        window.save(settings).await.unwrap();
        assert_eq!(window.effective_theme(), expected);
        assert_eq!(window.is_subscribed(), subscribed);
    }

    assert_eq!(window.settings().left_click_action, action);
    assert_eq!(window.settings().language, language);
}

#[tokio::test(flavor = "multi_thread")]
async fn leaving_system_stops_tracking_signal_flips() {
    let harness = Harness::new(MemoryStore::default(), false);
    let chrome = RecordingChrome::default();
    let mut window = harness.open_window(chrome.clone());
    window.init().await;
    assert!(window.is_subscribed());

    window
        .save(Settings {
            theme: ThemeMode::Light,
            ..Settings::default()
        })
        .await
        .unwrap();
    assert!(!window.is_subscribed());
    let chrome_calls = chrome.calls().len();

    harness.signal_tx.send(true).unwrap();
    // Even if a stale flip were still queued, the session must drop it.
    window.handle_os_signal(true).await;

    assert_eq!(window.effective_theme(), ResolvedTheme::Light);
    assert_eq!(chrome.calls().len(), chrome_calls);
}

#[tokio::test(flavor = "multi_thread")]
async fn teardown_releases_signal_subscription() {
    let harness = Harness::new(MemoryStore::default(), false);
    let mut window = harness.open_window(RecordingChrome::default());
    window.init().await;
    assert!(window.is_subscribed());
    // Harness holds one receiver; session and subscription hold the rest.
    assert!(harness.signal_tx.receiver_count() >= 2);

    drop(window);
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    assert_eq!(harness.signal_tx.receiver_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn chrome_failure_never_blocks_content_styling() {
    let harness = Harness::new(MemoryStore::seeded(dark_settings()), false);
    let chrome = RecordingChrome {
        fail: true,
        ..RecordingChrome::default()
    };
    let mut window = harness.open_window(chrome.clone());

    window.init().await;

    assert_eq!(window.content_class(), "dark");
    assert_eq!(chrome.calls(), vec![ResolvedTheme::Dark]);
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_save_remembers_display_locale() {
    let dir = tempfile::tempdir().unwrap();
    let locale_path = dir.path().join("language");
    let harness = Harness::new(MemoryStore::default(), false);
    let mut window = harness
        .open_window(RecordingChrome::default())
        .with_bootstrap_locale(&locale_path);
    window.init().await;

    window
        .save(Settings {
            language: "en-US".to_string(),
            ..Settings::default()
        })
        .await
        .unwrap();

    assert_eq!(crate::bootstrap_locale(&locale_path), "en-US");
}

#[tokio::test(flavor = "multi_thread")]
async fn broadcast_updates_subscription_state() {
    let harness = Harness::new(MemoryStore::seeded(dark_settings()), true);
    let mut saver = harness.open_window(RecordingChrome::default());
    let mut sibling = harness.open_window(RecordingChrome::default());
    saver.init().await;
    sibling.init().await;
    assert!(!sibling.is_subscribed());

    saver
        .save(Settings {
            theme: ThemeMode::System,
            ..Settings::default()
        })
        .await
        .unwrap();
    assert!(sibling.pump().await);

    // The sibling now follows the system preference it was told about.
    assert!(sibling.is_subscribed());
    assert_eq!(sibling.effective_theme(), ResolvedTheme::Dark);
}
