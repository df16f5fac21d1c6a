//! Sunlight slider state and user operations
//!
//! The widget does not own the sunlight time. Every operation receives the
//! parent's current value and reports the replacement through `on_change`;
//! the parent decides whether to apply it.
//!
//! Operations are plain methods so the UI layer (`sunlight_ui.rs`) and
//! tests drive exactly the same code.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::constants::DEFAULT_SUNLIGHT_TIME;
use crate::core::animation::SunAnimation;
use crate::core::sunlight_time::{DateWindow, SunlightTime};

/// Collapsible sunlight panel: date/time sliders, animate/stop/now buttons.
///
/// Dropping a running slider cancels its animation timer.
#[derive(Debug)]
pub struct SunlightSlider {
    /// Panel open
    pub expanded: bool,
    animation: SunAnimation,
    /// Date slider domain, centered on DEFAULT_SUNLIGHT_TIME
    window: Option<DateWindow>,
}

impl Default for SunlightSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl SunlightSlider {
    pub fn new() -> Self {
        let window = DateWindow::around(SunlightTime::from_millis(DEFAULT_SUNLIGHT_TIME));
        if window.is_none() {
            warn!("Date window unavailable for default {} ms", DEFAULT_SUNLIGHT_TIME);
        }
        Self {
            expanded: false,
            animation: SunAnimation::Idle,
            window,
        }
    }

    pub fn window(&self) -> Option<DateWindow> {
        self.window
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Date slider moved to `date`: keep the current time of day.
    pub fn select_date(
        &mut self,
        sunlight_time: i64,
        date: NaiveDate,
        on_change: &mut impl FnMut(i64),
    ) {
        match SunlightTime::from_millis(sunlight_time).with_date(date) {
            Some(t) => emit(on_change, t, "date slider"),
            None => warn!("Cannot move {} ms to {}", sunlight_time, date),
        }
    }

    /// Date slider moved to day `index` of the window.
    pub fn select_day_index(
        &mut self,
        sunlight_time: i64,
        index: i64,
        on_change: &mut impl FnMut(i64),
    ) {
        let Some(date) = self.window.and_then(|w| w.date_at(index)) else {
            return;
        };
        self.select_date(sunlight_time, date, on_change);
    }

    /// Time slider moved to `ms_of_day`: keep the date, zero seconds.
    pub fn select_time_of_day(
        &mut self,
        sunlight_time: i64,
        ms_of_day: i64,
        on_change: &mut impl FnMut(i64),
    ) {
        match SunlightTime::from_millis(sunlight_time).with_time_of_day(ms_of_day) {
            Some(t) => emit(on_change, t, "time slider"),
            None => warn!("Cannot set time of day {} on {} ms", ms_of_day, sunlight_time),
        }
    }

    /// Animate button. No-op while an animation runs.
    pub fn start_animation(&mut self, sunlight_time: i64, now: Instant) -> bool {
        self.animation.start(SunlightTime::from_millis(sunlight_time), now)
    }

    /// Stop button. The sunlight time stays where the sweep left it.
    pub fn stop_animation(&mut self) -> bool {
        self.animation.stop()
    }

    /// Now button. Leaves a running animation alone.
    pub fn set_to_now(&mut self, on_change: &mut impl FnMut(i64)) {
        emit(on_change, SunlightTime::now(), "now");
    }

    /// Fire a due animation tick. Call once per frame.
    pub fn poll_animation(&mut self, now: Instant, on_change: &mut impl FnMut(i64)) {
        if let Some(t) = self.animation.poll(now) {
            on_change(t.millis());
        }
    }

    /// Delay until the next tick while animating
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.animation.time_until_next_tick(now)
    }
}

impl Drop for SunlightSlider {
    fn drop(&mut self) {
        if self.animation.stop() {
            info!("SunlightSlider dropped while animating, timer cancelled");
        }
    }
}

fn emit(on_change: &mut impl FnMut(i64), t: SunlightTime, source: &str) {
    debug!("Sunlight time from {}: {}", source, t);
    on_change(t.millis());
}
