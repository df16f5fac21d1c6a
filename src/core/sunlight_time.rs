//! Sunlight time: an instant interpreted in the fixed Stockholm timezone.
//!
//! **Ownership**: the value belongs to whoever hosts the widget. The widget
//! only reads it and proposes replacements through its change callback.
//!
//! All calendar math (date/time recombination, day bounds, month window)
//! runs in [`SUNLIGHT_TZ`], whatever the machine's local zone is.
//!
//! # Local time resolution
//!
//! Recombining a date with a wall-clock time can land on a DST edge:
//! - **Gap** (spring forward, 02:00-03:00 does not exist): shifted forward
//!   by one hour, so 02:30 becomes 03:30.
//! - **Fold** (fall back, 02:00-03:00 happens twice): earliest instant wins.

use std::fmt;

use anyhow::{Context, Result, bail};
use chrono::{
    DateTime, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DATE_WINDOW_MONTHS, DAY_MS, HOUR_MS, MINUTE_MS, SUNLIGHT_TZ};

/// Medium date label, e.g. `Jun 15, 2024`
pub const DATE_LABEL_FORMAT: &str = "%b %-d, %Y";
/// Parser counterpart of [`DATE_LABEL_FORMAT`] (chrono parsing rejects `%-d`)
const DATE_PARSE_FORMAT: &str = "%b %d, %Y";
/// Short 24-hour time label, e.g. `14:00`
pub const TIME_LABEL_FORMAT: &str = "%H:%M";

/// Instant in epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SunlightTime(i64);

impl Default for SunlightTime {
    fn default() -> Self {
        Self(crate::constants::DEFAULT_SUNLIGHT_TIME)
    }
}

impl SunlightTime {
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Current wall-clock instant
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    fn from_zoned(dt: DateTime<Tz>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// Instant in Stockholm time. None only outside chrono's range.
    pub fn local(self) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp_millis(self.0).map(|utc| utc.with_timezone(&SUNLIGHT_TZ))
    }

    /// Calendar date in Stockholm
    pub fn date(self) -> Option<NaiveDate> {
        self.local().map(|dt| dt.date_naive())
    }

    /// Same wall-clock time of day (h/m/s/ms) on another date.
    pub fn with_date(self, date: NaiveDate) -> Option<Self> {
        let time = self.local()?.time();
        resolve_local(date.and_time(time)).map(Self::from_zoned)
    }

    /// Same date, hour and minute taken from `ms_of_day`, seconds and ms zeroed.
    ///
    /// `ms_of_day` is clamped to `[0, 24h)`.
    pub fn with_time_of_day(self, ms_of_day: i64) -> Option<Self> {
        let ms = ms_of_day.clamp(0, DAY_MS - 1);
        let hour = (ms / HOUR_MS) as u32;
        let minute = ((ms % HOUR_MS) / MINUTE_MS) as u32;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        let date = self.date()?;
        resolve_local(date.and_time(time)).map(Self::from_zoned)
    }

    /// Slider position of the time of day: hour and minute only, in ms.
    pub fn time_of_day_ms(self) -> Option<i64> {
        let dt = self.local()?;
        Some(dt.hour() as i64 * HOUR_MS + dt.minute() as i64 * MINUTE_MS)
    }

    /// 00:00:00.000 and 23:59:59.999 of this instant's Stockholm day.
    pub fn day_bounds(self) -> Option<DayBounds> {
        let date = self.date()?;
        let start = resolve_local(date.and_time(NaiveTime::MIN))?;
        let end = resolve_local(date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?))?;
        Some(DayBounds {
            start: Self::from_zoned(start),
            end: Self::from_zoned(end),
        })
    }

    /// Medium date label, e.g. `Jun 15, 2024`
    pub fn date_label(self) -> String {
        self.local()
            .map(|dt| dt.format(DATE_LABEL_FORMAT).to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    /// Short time label, e.g. `10:30`
    pub fn time_label(self) -> String {
        self.local()
            .map(|dt| dt.format(TIME_LABEL_FORMAT).to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }

    /// Parse a command-line time.
    ///
    /// Accepts epoch milliseconds, RFC 3339 (`2024-06-15T10:30:00+02:00`)
    /// or a zone-less local time read in Stockholm (`2024-06-15T10:30`,
    /// `2024-06-15 10:30:00`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if let Ok(ms) = input.parse::<i64>() {
            return Ok(Self(ms));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self(dt.timestamp_millis()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
                let dt = resolve_local(naive)
                    .with_context(|| format!("No Stockholm instant for local time '{}'", input))?;
                return Ok(Self::from_zoned(dt));
            }
        }
        bail!("Unrecognized time '{}': expected epoch ms, RFC 3339 or YYYY-MM-DDTHH:MM", input)
    }
}

impl fmt::Display for SunlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.local() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.3f %Z")),
            None => write!(f, "<invalid {} ms>", self.0),
        }
    }
}

/// First and last millisecond of a Stockholm day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayBounds {
    pub start: SunlightTime,
    pub end: SunlightTime,
}

impl DayBounds {
    /// Day length minus one ms (23h/25h on DST days)
    pub fn span_ms(&self) -> i64 {
        self.end.millis() - self.start.millis()
    }
}

/// Dates reachable by the date slider: center ± [`DATE_WINDOW_MONTHS`].
///
/// Positions are whole-day indices from `first`, so every slider step is
/// exactly one calendar day regardless of DST.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateWindow {
    pub fn around(center: SunlightTime) -> Option<Self> {
        let date = center.date()?;
        let months = Months::new(DATE_WINDOW_MONTHS);
        Some(Self {
            first: date.checked_sub_months(months)?,
            last: date.checked_add_months(months)?,
        })
    }

    /// Index of the last day
    pub fn len_days(&self) -> i64 {
        self.last.signed_duration_since(self.first).num_days()
    }

    /// Day index of `date`, clamped into the window
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.first)
            .num_days()
            .clamp(0, self.len_days())
    }

    /// Date at `index`, clamped into the window
    pub fn date_at(&self, index: i64) -> Option<NaiveDate> {
        let index = index.clamp(0, self.len_days());
        self.first.checked_add_days(Days::new(index as u64))
    }

    /// Inverse of the date label, for typed slider input
    pub fn parse_day_index(&self, label: &str) -> Option<i64> {
        let date = NaiveDate::parse_from_str(label.trim(), DATE_PARSE_FORMAT).ok()?;
        Some(self.day_index(date))
    }
}

/// Map a Stockholm wall-clock time to an instant (see module docs for DST).
fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(dt) = naive.and_local_timezone(SUNLIGHT_TZ).earliest() {
        return Some(dt);
    }
    naive
        .checked_add_signed(TimeDelta::hours(1))?
        .and_local_timezone(SUNLIGHT_TZ)
        .earliest()
}

/// Parse a `HH:MM` label back into ms of day
pub fn parse_time_label(label: &str) -> Option<i64> {
    let time = NaiveTime::parse_from_str(label.trim(), TIME_LABEL_FORMAT).ok()?;
    Some(time.hour() as i64 * HOUR_MS + time.minute() as i64 * MINUTE_MS)
}

/// `HH:MM` label for a ms-of-day slider value
pub fn format_time_of_day(ms_of_day: i64) -> String {
    let ms = ms_of_day.clamp(0, DAY_MS - 1);
    format!("{:02}:{:02}", ms / HOUR_MS, (ms % HOUR_MS) / MINUTE_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn stockholm(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> SunlightTime {
        let naive = NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap();
        SunlightTime::from_zoned(SUNLIGHT_TZ.from_local_datetime(&naive).unwrap())
    }

    #[test]
    fn test_date_change_keeps_time_of_day() {
        let t = stockholm(2024, 6, 15, 10, 30, 0, 0);
        let target = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let moved = t.with_date(target).unwrap();
        assert_eq!(moved, stockholm(2024, 7, 1, 10, 30, 0, 0));
    }

    #[test]
    fn test_date_change_keeps_seconds_and_millis() {
        let t = stockholm(2024, 2, 10, 7, 5, 42, 123);
        let target = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let moved = t.with_date(target).unwrap().local().unwrap();
        assert_eq!(moved.date_naive(), target);
        assert_eq!(
            (moved.hour(), moved.minute(), moved.second(), moved.timestamp_subsec_millis()),
            (7, 5, 42, 123)
        );
    }

    #[test]
    fn test_date_change_across_dst_keeps_wall_clock() {
        // Winter (CET) to summer (CEST): UTC offset differs, local time must not
        let t = stockholm(2024, 1, 15, 12, 0, 0, 0);
        let moved = t.with_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()).unwrap();
        assert_eq!(moved.time_label(), "12:00");
        assert_eq!(moved.millis() - t.millis(), 182 * DAY_MS - HOUR_MS);
    }

    #[test]
    fn test_time_change_sets_hour_minute_zeroes_rest() {
        let t = stockholm(2024, 6, 15, 10, 30, 17, 250);
        let moved = t.with_time_of_day(50_400_000).unwrap();
        assert_eq!(moved, stockholm(2024, 6, 15, 14, 0, 0, 0));

        let moved = t.with_time_of_day(9 * HOUR_MS + 45 * MINUTE_MS + 59_999).unwrap();
        assert_eq!(moved, stockholm(2024, 6, 15, 9, 45, 0, 0));
    }

    #[test]
    fn test_time_change_clamps_to_day() {
        let t = stockholm(2024, 6, 15, 10, 30, 0, 0);
        assert_eq!(t.with_time_of_day(DAY_MS).unwrap(), stockholm(2024, 6, 15, 23, 59, 0, 0));
        assert_eq!(t.with_time_of_day(-5).unwrap(), stockholm(2024, 6, 15, 0, 0, 0, 0));
    }

    #[test]
    fn test_time_change_in_spring_gap_moves_forward() {
        // 2024-03-31 02:30 does not exist in Stockholm
        let t = stockholm(2024, 3, 31, 12, 0, 0, 0);
        let moved = t.with_time_of_day(2 * HOUR_MS + 30 * MINUTE_MS).unwrap();
        assert_eq!(moved.time_label(), "03:30");
        assert_eq!(moved.date().unwrap().day(), 31);
    }

    #[test]
    fn test_time_of_day_ms_ignores_seconds() {
        let t = stockholm(2024, 6, 15, 10, 30, 59, 999);
        assert_eq!(t.time_of_day_ms(), Some(10 * HOUR_MS + 30 * MINUTE_MS));
    }

    #[test]
    fn test_day_bounds() {
        let t = stockholm(2024, 6, 15, 10, 30, 0, 0);
        let bounds = t.day_bounds().unwrap();
        assert_eq!(bounds.start, stockholm(2024, 6, 15, 0, 0, 0, 0));
        assert_eq!(bounds.end, stockholm(2024, 6, 15, 23, 59, 59, 999));
        assert_eq!(bounds.span_ms(), DAY_MS - 1);
    }

    #[test]
    fn test_day_bounds_on_dst_days() {
        let spring = stockholm(2024, 3, 31, 12, 0, 0, 0).day_bounds().unwrap();
        assert_eq!(spring.span_ms(), 23 * HOUR_MS - 1);

        let autumn = stockholm(2024, 10, 27, 12, 0, 0, 0).day_bounds().unwrap();
        assert_eq!(autumn.span_ms(), 25 * HOUR_MS - 1);
    }

    #[test]
    fn test_date_window_is_six_months_each_way() {
        let window = DateWindow::around(stockholm(2024, 6, 21, 12, 0, 0, 0)).unwrap();
        assert_eq!(window.first, NaiveDate::from_ymd_opt(2023, 12, 21).unwrap());
        assert_eq!(window.last, NaiveDate::from_ymd_opt(2024, 12, 21).unwrap());
        assert_eq!(window.len_days(), 366);
    }

    #[test]
    fn test_date_window_clamps_end_of_month() {
        let window = DateWindow::around(stockholm(2024, 8, 31, 12, 0, 0, 0)).unwrap();
        assert_eq!(window.first, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(window.last, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_date_window_indices() {
        let window = DateWindow::around(stockholm(2024, 6, 21, 12, 0, 0, 0)).unwrap();
        let july_first = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let idx = window.day_index(july_first);
        assert_eq!(window.date_at(idx), Some(july_first));

        let far_past = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(window.day_index(far_past), 0);
        assert_eq!(window.date_at(10_000), Some(window.last));
        assert_eq!(window.parse_day_index("Jul 1, 2024"), Some(idx));
    }

    #[test]
    fn test_labels() {
        let t = stockholm(2024, 6, 5, 9, 7, 0, 0);
        assert_eq!(t.date_label(), "Jun 5, 2024");
        assert_eq!(t.time_label(), "09:07");
        assert_eq!(format_time_of_day(50_400_000), "14:00");
        assert_eq!(parse_time_label("14:00"), Some(50_400_000));
    }

    #[test]
    fn test_parse_formats() {
        let expected = stockholm(2024, 6, 15, 10, 30, 0, 0);
        assert_eq!(SunlightTime::parse("2024-06-15T10:30").unwrap(), expected);
        assert_eq!(SunlightTime::parse("2024-06-15 10:30:00").unwrap(), expected);
        assert_eq!(SunlightTime::parse("2024-06-15T08:30:00Z").unwrap(), expected);
        assert_eq!(
            SunlightTime::parse(&expected.millis().to_string()).unwrap(),
            expected
        );
        assert!(SunlightTime::parse("yesterday").is_err());
    }

    #[test]
    fn test_default_is_midsummer_noon() {
        let t = SunlightTime::default();
        assert_eq!(t, stockholm(2024, 6, 21, 12, 0, 0, 0));
    }

    #[test]
    fn test_out_of_range_is_none() {
        let t = SunlightTime::from_millis(i64::MAX);
        assert!(t.local().is_none());
        assert!(t.day_bounds().is_none());
        assert_eq!(t.date_label(), "--");
    }
}
