//! Sunlight slider - UI rendering
//!
//! Layout (300px, anchored bottom-right over the scene):
//! - **Header**: sun glyph + title, expand/collapse button
//! - **Date slider**: one step per day, medium date label
//! - **Time slider**: one step per hour, `HH:MM` label
//! - **Buttons**: Animate Sun / Stop Animation / Now
//!
//! Animation ticks are polled here every frame, collapsed or not, and a
//! repaint is requested for the next due tick so the sweep keeps running
//! without input.

use std::time::Instant;

use eframe::egui::{
    self, Align, Align2, Button, Frame, Layout, Order, Response, RichText,
    SliderClamping, Ui,
};

use super::SunlightSlider;
use crate::constants::{DAY_MS, HOUR_MS};
use crate::core::sunlight_time::{
    DATE_LABEL_FORMAT, SunlightTime, format_time_of_day, parse_time_label,
};

const PANEL_WIDTH: f32 = 300.0;
const PANEL_OFFSET: f32 = 20.0;
const HEADER_MARGIN: f32 = 8.0;
const BODY_MARGIN: f32 = 16.0;

/// Show the panel as a floating overlay in the bottom-right corner.
pub fn show_sunlight_overlay(
    ctx: &egui::Context,
    slider: &mut SunlightSlider,
    sunlight_time: i64,
    show_tooltips: bool,
    on_change: impl FnMut(i64),
) {
    egui::Area::new(egui::Id::new("sunlight_slider"))
        .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-PANEL_OFFSET, -PANEL_OFFSET))
        .order(Order::Foreground)
        .show(ctx, |ui| {
            render_sunlight_panel(ui, slider, sunlight_time, show_tooltips, on_change)
        });
}

/// Render header and (if expanded) the sliders and buttons into `ui`.
pub fn render_sunlight_panel(
    ui: &mut Ui,
    slider: &mut SunlightSlider,
    sunlight_time: i64,
    show_tooltips: bool,
    mut on_change: impl FnMut(i64),
) {
    // Latest value this frame, including anything emitted below
    let mut current = sunlight_time;
    slider.poll_animation(Instant::now(), &mut forward(&mut current, &mut on_change));

    render_header(ui, slider, show_tooltips);

    if slider.expanded {
        ui.add_space(8.0);
        Frame::popup(ui.style())
            .inner_margin(BODY_MARGIN)
            .show(ui, |ui| {
                ui.set_width(PANEL_WIDTH - 2.0 * BODY_MARGIN);
                ui.spacing_mut().slider_width = PANEL_WIDTH - 2.0 * BODY_MARGIN - 90.0;
                render_date_slider(ui, slider, &mut current, show_tooltips, &mut on_change);
                render_time_slider(ui, slider, &mut current, show_tooltips, &mut on_change);
                ui.add_space(4.0);
                render_controls(ui, slider, &mut current, &mut on_change);
            });
    }

    if let Some(delay) = slider.next_tick_in(Instant::now()) {
        ui.ctx().request_repaint_after(delay);
    }
}

fn render_header(ui: &mut Ui, slider: &mut SunlightSlider, show_tooltips: bool) {
    Frame::popup(ui.style())
        .inner_margin(HEADER_MARGIN)
        .show(ui, |ui| {
            ui.set_width(PANEL_WIDTH - 2.0 * HEADER_MARGIN);
            ui.horizontal(|ui| {
                let title = ui.label(RichText::new("☀  Sunlight Settings").strong());
                tooltip(title, show_tooltips, "Sunlight settings");

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let icon = if slider.expanded { "▲" } else { "▼" };
                    let toggle = tooltip(ui.button(icon), show_tooltips, "Adjust sunlight time");
                    if toggle.clicked() {
                        slider.toggle_expanded();
                    }
                });
            });
        });
}

fn render_date_slider(
    ui: &mut Ui,
    slider: &mut SunlightSlider,
    current: &mut i64,
    show_tooltips: bool,
    on_change: &mut impl FnMut(i64),
) {
    let Some(window) = slider.window() else {
        ui.label("Date range unavailable");
        return;
    };
    let Some(date) = SunlightTime::from_millis(*current).date() else {
        return;
    };

    let original = window.day_index(date);
    let mut day = original;
    let response = ui.add(
        egui::Slider::new(&mut day, 0..=window.len_days())
            .step_by(1.0)
            .clamping(SliderClamping::Edits)
            .custom_formatter(move |v, _| {
                window
                    .date_at(v.round() as i64)
                    .map(|d| d.format(DATE_LABEL_FORMAT).to_string())
                    .unwrap_or_default()
            })
            .custom_parser(move |s| window.parse_day_index(s).map(|i| i as f64)),
    );
    let response = tooltip(response, show_tooltips, "Select Date");

    if response.changed() && day != original {
        let time = *current;
        slider.select_day_index(time, day, &mut forward(current, on_change));
    }
}

fn render_time_slider(
    ui: &mut Ui,
    slider: &mut SunlightSlider,
    current: &mut i64,
    show_tooltips: bool,
    on_change: &mut impl FnMut(i64),
) {
    let Some(original) = SunlightTime::from_millis(*current).time_of_day_ms() else {
        return;
    };

    let mut ms_of_day = original;
    let response = ui.add(
        egui::Slider::new(&mut ms_of_day, 0..=DAY_MS - HOUR_MS)
            .step_by(HOUR_MS as f64)
            .clamping(SliderClamping::Edits)
            .custom_formatter(|v, _| format_time_of_day(v as i64))
            .custom_parser(|s| parse_time_label(s).map(|v| v as f64)),
    );
    let response = tooltip(response, show_tooltips, "Select Time");

    if response.changed() && ms_of_day != original {
        let time = *current;
        slider.select_time_of_day(time, ms_of_day, &mut forward(current, on_change));
    }
}

fn render_controls(
    ui: &mut Ui,
    slider: &mut SunlightSlider,
    current: &mut i64,
    on_change: &mut impl FnMut(i64),
) {
    ui.horizontal_wrapped(|ui| {
        let animating = slider.is_animating();

        if ui.add_enabled(!animating, Button::new("☀ Animate Sun")).clicked() {
            slider.start_animation(*current, Instant::now());
        }
        if ui.add_enabled(animating, Button::new("■ Stop Animation")).clicked() {
            slider.stop_animation();
        }
        if ui.button("🕒 Now").clicked() {
            slider.set_to_now(&mut forward(current, on_change));
        }
    });
}

/// Attach hover text unless tooltips are disabled in settings
fn tooltip(response: Response, enabled: bool, text: &str) -> Response {
    if enabled { response.on_hover_text(text) } else { response }
}

/// Pass a change to the parent and remember it for the rest of the frame
fn forward<'a, F: FnMut(i64)>(current: &'a mut i64, on_change: &'a mut F) -> impl FnMut(i64) + 'a {
    move |ms| {
        *current = ms;
        on_change(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-15 10:30 Europe/Stockholm
    const T: i64 = 1_718_440_200_000;

    fn run_frame(ctx: &egui::Context, slider: &mut SunlightSlider, got: &mut Vec<i64>) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            show_sunlight_overlay(ctx, slider, T, true, |ms| got.push(ms));
        });
    }

    #[test]
    fn test_render_collapsed_and_expanded() {
        let ctx = egui::Context::default();
        let mut slider = SunlightSlider::new();
        let mut got = Vec::new();

        run_frame(&ctx, &mut slider, &mut got);
        slider.expanded = true;
        run_frame(&ctx, &mut slider, &mut got);
        run_frame(&ctx, &mut slider, &mut got);

        // Rendering alone never proposes a new time
        assert!(got.is_empty());
    }

    #[test]
    fn test_render_keeps_animation_running() {
        let ctx = egui::Context::default();
        let mut slider = SunlightSlider::new();
        slider.start_animation(T, Instant::now());
        let mut got = Vec::new();

        run_frame(&ctx, &mut slider, &mut got);
        assert!(slider.is_animating());
        assert!(got.len() <= 1);
    }

    #[test]
    fn test_forward_tracks_latest() {
        let mut current = 0;
        let mut got = Vec::new();
        {
            let mut push = |ms: i64| got.push(ms);
            let mut f = forward(&mut current, &mut push);
            f(5);
            f(7);
        }
        assert_eq!(current, 7);
        assert_eq!(got, vec![5, 7]);
    }
}
