//! SUNSLIDER - Sunlight time picker library
//!
//! Re-exports all modules for use by the binary target.

// Core model (sunlight time, sun animation)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod constants;
pub mod dialogs;
pub mod paths;
pub mod widgets;

// Re-export commonly used types from core
pub use crate::core::animation::SunAnimation;
pub use crate::core::sunlight_time::{DateWindow, DayBounds, SunlightTime};

// Re-export the widget
pub use crate::widgets::sunlight::{SunlightSlider, render_sunlight_panel, show_sunlight_overlay};
