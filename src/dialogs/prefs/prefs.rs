use eframe::egui;

use crate::constants::{
    ANIMATION_STEPS, ANIMATION_TICK_MS, DATE_WINDOW_MONTHS, DEFAULT_SUNLIGHT_TIME, SUNLIGHT_TZ,
};
use crate::core::SunlightTime;

/// Settings categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsCategory {
    UI,
    Sunlight,
}

impl SettingsCategory {
    const ALL: [SettingsCategory; 2] = [SettingsCategory::UI, SettingsCategory::Sunlight];

    fn as_str(&self) -> &'static str {
        match self {
            SettingsCategory::UI => "UI",
            SettingsCategory::Sunlight => "Sunlight",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Application settings
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppSettings {
    // UI
    pub dark_mode: bool,
    pub font_size: f32,
    pub show_tooltips: bool, // Hover text on the sunlight panel

    // Sunlight panel
    pub start_expanded: bool, // Open the panel on launch

    // Internal
    pub selected_settings_category: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: 13.0,
            show_tooltips: true,
            start_expanded: false,
            selected_settings_category: Some("UI".to_string()),
        }
    }
}

/// Render UI settings category
fn render_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Appearance");
    ui.add_space(8.0);

    ui.label("Font Size:");
    ui.add(
        egui::Slider::new(&mut settings.font_size, 10.0..=18.0)
            .suffix(" px")
            .step_by(0.5),
    );
    ui.add_space(16.0);

    ui.checkbox(&mut settings.dark_mode, "Dark Mode");
    ui.checkbox(&mut settings.show_tooltips, "Show Tooltips");
}

/// Render Sunlight settings category
fn render_sunlight_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Panel");
    ui.add_space(8.0);
    ui.checkbox(&mut settings.start_expanded, "Open sunlight panel on launch");

    ui.add_space(16.0);
    ui.heading("Fixed");
    ui.add_space(8.0);

    let center = SunlightTime::from_millis(DEFAULT_SUNLIGHT_TIME);
    egui::Grid::new("sunlight_fixed_grid")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label("Timezone:");
            ui.monospace(SUNLIGHT_TZ.name());
            ui.end_row();

            ui.label("Date range:");
            ui.monospace(format!("{} ± {} months", center.date_label(), DATE_WINDOW_MONTHS));
            ui.end_row();

            ui.label("Animation:");
            ui.monospace(format!(
                "{} steps × {} ms",
                ANIMATION_STEPS, ANIMATION_TICK_MS
            ));
            ui.end_row();
        });
}

/// Render settings window
pub fn render_settings_window(
    ctx: &egui::Context,
    show_settings: &mut bool,
    settings: &mut AppSettings,
) {
    // Get selected category from settings or use default
    let mut selected = settings
        .selected_settings_category
        .as_ref()
        .and_then(|s| SettingsCategory::from_str(s))
        .unwrap_or(SettingsCategory::UI);

    egui::Window::new("Settings")
        .id(egui::Id::new("settings_window"))
        .open(show_settings)
        .default_size([480.0, 320.0])
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Left panel: category list (120px fixed width)
                ui.vertical(|ui| {
                    ui.set_width(120.0);
                    ui.add_space(4.0);
                    for category in SettingsCategory::ALL {
                        ui.selectable_value(&mut selected, category, category.as_str());
                    }
                });

                ui.separator();

                // Right panel: content for selected category
                ui.vertical(|ui| {
                    ui.add_space(8.0);

                    match selected {
                        SettingsCategory::UI => render_ui_settings(ui, settings),
                        SettingsCategory::Sunlight => render_sunlight_settings(ui, settings),
                    }
                });
            });
        });

    // Save selected category
    settings.selected_settings_category = Some(selected.as_str().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_names() {
        for category in SettingsCategory::ALL {
            assert_eq!(SettingsCategory::from_str(category.as_str()), Some(category));
        }
        assert_eq!(SettingsCategory::from_str("Web Server"), None);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{ "dark_mode": false }"#).unwrap();
        assert!(!settings.dark_mode);
        assert_eq!(settings.font_size, AppSettings::default().font_size);
        assert!(settings.show_tooltips);
    }

    #[test]
    fn test_settings_window_renders() {
        let ctx = egui::Context::default();
        let mut show = true;
        let mut settings = AppSettings {
            selected_settings_category: Some("Sunlight".to_string()),
            ..Default::default()
        };
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            render_settings_window(ctx, &mut show, &mut settings);
        });
        assert_eq!(settings.selected_settings_category.as_deref(), Some("Sunlight"));
    }
}
