//! Application module - SunsliderApp, the host of the sunlight widget.
//!
//! The app is the "parent" of the widget contract: it owns the sunlight
//! time, hands it to the widget by value each frame and applies whatever
//! the widget proposes through its change callback.
//!
//! - `run` - eframe::App implementation (frame loop, persistence)

mod run;

use log::info;

use crate::cli::Args;
use crate::core::SunlightTime;
use crate::dialogs::prefs::AppSettings;
use crate::widgets::sunlight::SunlightSlider;

/// Main application state.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SunsliderApp {
    /// Single source of truth for the scene's sunlight time (persistent)
    pub sunlight_time: SunlightTime,
    pub settings: AppSettings,
    #[serde(skip)]
    pub slider: SunlightSlider,
    #[serde(skip)]
    pub show_settings: bool,
    /// Number of change requests applied this session
    #[serde(skip)]
    pub changes_applied: u64,
}

impl Default for SunsliderApp {
    fn default() -> Self {
        Self {
            sunlight_time: SunlightTime::default(),
            settings: AppSettings::default(),
            slider: SunlightSlider::new(),
            show_settings: false,
            changes_applied: 0,
        }
    }
}

impl SunsliderApp {
    /// Restore persisted state (JSON under `eframe::APP_KEY`) or start fresh.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| storage.get_string(eframe::APP_KEY))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_else(|| {
                info!("No persisted state found, creating default app");
                SunsliderApp::default()
            })
    }

    /// Apply command-line overrides on top of persisted state.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(time) = args.time {
            self.sunlight_time = time;
        }
        self.slider.expanded = args.expanded || self.settings.start_expanded;
        if args.animate {
            self.slider
                .start_animation(self.sunlight_time.millis(), std::time::Instant::now());
        }
        info!(
            "Sunlight time {} (expanded: {}, animating: {})",
            self.sunlight_time,
            self.slider.expanded,
            self.slider.is_animating()
        );
    }

    /// Change callback target: accept the widget's proposed instant.
    pub fn apply_sunlight_change(&mut self, ms: i64) {
        self.sunlight_time = SunlightTime::from_millis(ms);
        self.changes_applied += 1;
    }
}
