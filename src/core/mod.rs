//! Core modules - sunlight time model and sun animation
//!
//! Independent of egui; the widget drives these from its frame loop.

pub mod animation;
pub mod sunlight_time;

// Re-exports for convenience
pub use animation::{AnimationTimer, SunAnimation, Sweep};
pub use sunlight_time::{DateWindow, DayBounds, SunlightTime};
