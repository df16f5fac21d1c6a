//! Sunlight widget - date/time sliders and the sun sweep controls

mod sunlight;
mod sunlight_ui;

pub use sunlight::SunlightSlider;
pub use sunlight_ui::{render_sunlight_panel, show_sunlight_overlay};
