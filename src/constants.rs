//! Fixed configuration shared by the widget and the host app.

use chrono_tz::Tz;

/// Center of the date slider window: 2024-06-21 12:00 Europe/Stockholm
/// (midsummer noon), in epoch milliseconds.
pub const DEFAULT_SUNLIGHT_TIME: i64 = 1_718_964_000_000;

/// Civil timezone used for every date/time decomposition.
/// Not configurable.
pub const SUNLIGHT_TZ: Tz = chrono_tz::Europe::Stockholm;

/// Half-width of the date slider window, in calendar months.
pub const DATE_WINDOW_MONTHS: u32 = 6;

pub const HOUR_MS: i64 = 3_600_000;
pub const MINUTE_MS: i64 = 60_000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Number of ticks one animation sweep is split into.
pub const ANIMATION_STEPS: i64 = 240;

/// Wall-clock interval between animation ticks.
pub const ANIMATION_TICK_MS: u64 = 100;
