//! Preferences dialog and persisted host settings

mod prefs;

pub use prefs::{AppSettings, render_settings_window};
