//! Sun sweep animation: one day swept in fixed 100 ms ticks.
//!
//! # State machine
//!
//! `Idle → Running → Idle`. Running owns the only [`AnimationTimer`], so
//! "animating" and "timer active" cannot disagree: stopping, finishing
//! and dropping all go through releasing the timer.
//!
//! # Timing model
//!
//! The timer is polled from the UI frame loop (no threads). A poll fires at
//! most one tick; after a stall the schedule restarts from the poll time
//! instead of bursting the missed ticks.
//!
//! # Sweep
//!
//! Tick `n` emits `start + span * n / 240` (integer ms, no drift). Tick 240
//! reaches the end of the day, which stops the sweep and emits `start`:
//! the sun wraps back to midnight instead of holding at 23:59:59.999.

use std::time::{Duration, Instant};

use log::{info, trace, warn};

use super::sunlight_time::{DayBounds, SunlightTime};
use crate::constants::{ANIMATION_STEPS, ANIMATION_TICK_MS};

/// Repeating tick schedule. Released (with a trace) on drop.
#[derive(Debug)]
pub struct AnimationTimer {
    interval: Duration,
    next_due: Instant,
}

impl AnimationTimer {
    fn start(now: Instant, interval: Duration) -> Self {
        trace!("AnimationTimer: armed every {}ms", interval.as_millis());
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Returns true (and reschedules) if a tick is due at `now`.
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

impl Drop for AnimationTimer {
    fn drop(&mut self) {
        trace!("AnimationTimer: released");
    }
}

/// Active sweep over one day
#[derive(Debug)]
pub struct Sweep {
    bounds: DayBounds,
    ticks: i64,
    timer: AnimationTimer,
}

impl Sweep {
    pub fn bounds(&self) -> DayBounds {
        self.bounds
    }

    /// Ticks fired so far
    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    fn cursor(&self) -> i64 {
        self.bounds.start.millis() + self.bounds.span_ms() * self.ticks / ANIMATION_STEPS
    }
}

#[derive(Debug, Default)]
pub enum SunAnimation {
    #[default]
    Idle,
    Running(Sweep),
}

impl SunAnimation {
    pub fn is_running(&self) -> bool {
        matches!(self, SunAnimation::Running(_))
    }

    pub fn sweep(&self) -> Option<&Sweep> {
        match self {
            SunAnimation::Running(sweep) => Some(sweep),
            SunAnimation::Idle => None,
        }
    }

    /// Start sweeping the Stockholm day containing `current`.
    ///
    /// Returns false (and changes nothing) if already running.
    pub fn start(&mut self, current: SunlightTime, now: Instant) -> bool {
        if self.is_running() {
            trace!("SunAnimation: start ignored, already running");
            return false;
        }
        let Some(bounds) = current.day_bounds() else {
            warn!("SunAnimation: no day bounds for {}, not starting", current);
            return false;
        };
        info!(
            "Sun animation started: {} .. {} ({} steps)",
            bounds.start, bounds.end, ANIMATION_STEPS
        );
        *self = SunAnimation::Running(Sweep {
            bounds,
            ticks: 0,
            timer: AnimationTimer::start(now, Duration::from_millis(ANIMATION_TICK_MS)),
        });
        true
    }

    /// Cancel the sweep. The current sunlight time is left as is.
    ///
    /// Returns false if nothing was running.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(self) {
            SunAnimation::Running(sweep) => {
                info!("Sun animation stopped after {} ticks", sweep.ticks);
                true
            }
            SunAnimation::Idle => false,
        }
    }

    /// Fire a tick if the timer is due. Returns the instant to emit.
    pub fn poll(&mut self, now: Instant) -> Option<SunlightTime> {
        let due = match self {
            SunAnimation::Running(sweep) => sweep.timer.poll(now),
            SunAnimation::Idle => false,
        };
        if due { self.tick() } else { None }
    }

    /// Advance one step regardless of the timer.
    ///
    /// On reaching the end of the day the sweep finishes and the start of
    /// the day is returned.
    pub fn tick(&mut self) -> Option<SunlightTime> {
        let SunAnimation::Running(sweep) = self else {
            return None;
        };
        sweep.ticks += 1;
        let cursor = sweep.cursor();
        if cursor >= sweep.bounds.end.millis() {
            let start = sweep.bounds.start;
            info!("Sun animation finished, wrapping to {}", start);
            *self = SunAnimation::Idle;
            return Some(start);
        }
        trace!("Sun animation tick {}: {}", sweep.ticks, cursor);
        Some(SunlightTime::from_millis(cursor))
    }

    /// Time until the next tick, for repaint scheduling
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.sweep().map(|sweep| sweep.timer.remaining(now))
    }
}
