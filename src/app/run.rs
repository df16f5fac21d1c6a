//! Main application loop - eframe::App implementation.
//!
//! Each frame:
//! - Apply theme and font settings
//! - Toolbar and scene panel (shows the current sunlight time)
//! - Sunlight overlay; its change requests are applied after rendering
//! - Settings window
//! - Keyboard shortcuts

use eframe::egui;
use log::{debug, trace};

use crate::app::SunsliderApp;
use crate::dialogs::prefs::render_settings_window;
use crate::widgets::sunlight::show_sunlight_overlay;

impl eframe::App for SunsliderApp {
    /// Main frame update - called every frame by eframe.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme based on settings
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Apply font size from settings
        let mut style = (*ctx.style()).clone();
        for (_, font_id) in style.text_styles.iter_mut() {
            font_id.size = self.settings.font_size;
        }
        ctx.set_style(style);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⚙ Settings").clicked() {
                    self.show_settings = !self.show_settings;
                }
                ui.separator();
                ui.checkbox(&mut self.slider.expanded, "Sunlight Panel (S)");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Scene");
            ui.add_space(8.0);
            egui::Grid::new("scene_grid")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Sunlight time:");
                    ui.monospace(self.sunlight_time.to_string());
                    ui.end_row();

                    ui.label("Epoch ms:");
                    ui.monospace(self.sunlight_time.millis().to_string());
                    ui.end_row();

                    ui.label("Animating:");
                    ui.label(if self.slider.is_animating() { "yes" } else { "no" });
                    ui.end_row();
                });
        });

        // Widget reads the value by value; changes land after it returns
        let mut proposed = Vec::new();
        show_sunlight_overlay(
            ctx,
            &mut self.slider,
            self.sunlight_time.millis(),
            self.settings.show_tooltips,
            |ms| proposed.push(ms),
        );
        for ms in proposed {
            self.apply_sunlight_change(ms);
            debug!("Applied sunlight time {}", self.sunlight_time);
        }

        render_settings_window(ctx, &mut self.show_settings, &mut self.settings);

        self.handle_keyboard_input(ctx);
    }

    /// Save app state to persistent storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            trace!(
                "App state saved: sunlight time {}, {} changes this session",
                self.sunlight_time,
                self.changes_applied
            );
        }
    }
}

impl SunsliderApp {
    /// Global shortcuts: S toggles the sunlight panel, Ctrl+, opens settings.
    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // Leave typing in slider text fields alone
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::S) && !i.modifiers.any() {
                self.slider.toggle_expanded();
            }
            if i.key_pressed(egui::Key::Comma) && i.modifiers.command {
                self.show_settings = !self.show_settings;
            }
        });
    }
}
