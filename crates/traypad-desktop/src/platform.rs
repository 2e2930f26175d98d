//! OS appearance signal
//!
//! Detects whether the host environment currently prefers dark rendering and
//! republishes it as a live signal windows can subscribe to.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle keeping the appearance probe task alive.
pub struct AppearanceProbe {
    task: JoinHandle<()>,
}

impl Drop for AppearanceProbe {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a polling probe of the OS appearance.
///
/// The returned receiver carries the current dark-preferred flag; it only
/// observes a change when the OS value actually flips, not on every poll.
pub fn spawn_appearance_probe(period: Duration) -> (AppearanceProbe, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(detect_system_dark_mode());
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            // Detection spawns a subprocess on most platforms; keep it off
            // the async workers.
            let Ok(dark) = tokio::task::spawn_blocking(detect_system_dark_mode).await else {
                continue;
            };
            tx.send_if_modified(|current| {
                if *current == dark {
                    false
                } else {
                    *current = dark;
                    true
                }
            });
        }
    });
    (AppearanceProbe { task }, rx)
}

/// Detect the current system dark mode preference
#[must_use]
pub fn detect_system_dark_mode() -> bool {
    detect_system_dark_mode_impl()
}

#[cfg(target_os = "windows")]
fn detect_system_dark_mode_impl() -> bool {
    use std::process::Command;
    // Check Windows AppsUseLightTheme registry value
    // 0 = dark mode, 1 = light mode
    let output = Command::new("reg")
        .args([
            "query",
            r"HKCU\SOFTWARE\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output();

    match output {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let is_dark = stdout.contains("0x0");
            tracing::debug!(
                "System theme detected: {}",
                if is_dark { "dark" } else { "light" }
            );
            is_dark
        }
        Err(e) => {
            tracing::warn!(
                "Failed to detect system theme: {}. Defaulting to light mode.",
                e
            );
            false
        }
    }
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode_impl() -> bool {
    use std::process::Command;
    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output();

    match output {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let is_dark = stdout.trim().eq_ignore_ascii_case("dark");
            tracing::debug!(
                "System theme detected: {}",
                if is_dark { "dark" } else { "light" }
            );
            is_dark
        }
        Err(e) => {
            tracing::warn!(
                "Failed to detect system theme: {}. Defaulting to light mode.",
                e
            );
            false
        }
    }
}

#[cfg(target_os = "linux")]
fn detect_system_dark_mode_impl() -> bool {
    // Check GTK theme or use environment variable
    if let Ok(theme) = std::env::var("GTK_THEME") {
        let is_dark = theme.to_lowercase().contains("dark");
        tracing::debug!(
            "System theme detected from GTK_THEME: {}",
            if is_dark { "dark" } else { "light" }
        );
        is_dark
    } else {
        tracing::debug!("GTK_THEME not set, defaulting to light mode");
        false
    }
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn detect_system_dark_mode_impl() -> bool {
    tracing::debug!("Unsupported platform for system theme detection, defaulting to light mode");
    false
}
