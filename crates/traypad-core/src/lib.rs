//! traypad-core - Core library for Traypad
//!
//! This crate contains the settings model, the durable settings store, and
//! the theme resolution rule shared by every Traypad window.

pub mod error;
pub mod models;
pub mod store;
pub mod theme;

pub use error::{Error, Result};
pub use models::{LeftClickAction, Settings, ThemeMode};
pub use theme::{resolve_theme, ResolvedTheme};
