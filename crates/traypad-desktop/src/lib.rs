//! traypad-desktop - Per-window runtime for Traypad
//!
//! Every open window owns one [`WindowSession`]: a settings cache backed by
//! the shared store, a theme resolver that holds a live OS-signal
//! subscription while the preference is `system`, and an appearance applier
//! driving content styling and window chrome. Windows share no memory; the
//! only inter-window mechanism is the [`SettingsBus`].

pub mod appearance;
pub mod bootstrap_locale;
pub mod broadcast;
pub mod paths;
pub mod platform;
pub mod session;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;

pub use appearance::{AppearanceApplier, ContentStyle, WindowChrome};
pub use bootstrap_locale::{bootstrap_locale, remember_locale};
pub use broadcast::{SettingsBus, WindowId};
pub use platform::{spawn_appearance_probe, AppearanceProbe};
pub use session::WindowSession;
pub use state::SettingsController;
pub use theme::{Subscription, ThemeResolver};
