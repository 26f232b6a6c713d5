//! Daily update schedule
//!
//! Signals are recomputed once per trading day after the close.

use crate::config::ScheduleConfig;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};

/// Time of day (UTC) at which updates run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSchedule {
    time: NaiveTime,
    weekdays_only: bool,
}

impl UpdateSchedule {
    /// Create a schedule; `None` if hour or minute is out of range
    pub fn new(hour_utc: u32, minute: u32, weekdays_only: bool) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour_utc, minute, 0)?;
        Some(Self {
            time,
            weekdays_only,
        })
    }

    pub fn from_config(config: &ScheduleConfig) -> anyhow::Result<Self> {
        Self::new(config.hour_utc, config.minute, config.weekdays_only).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid schedule time {:02}:{:02}",
                config.hour_utc,
                config.minute
            )
        })
    }

    /// Next run strictly after `now`
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut date = now.date_naive();
        loop {
            let candidate = date.and_time(self.time).and_utc();
            if candidate > now && self.runs_on(candidate.weekday()) {
                return candidate;
            }
            date += Duration::days(1);
        }
    }

    fn runs_on(&self, day: Weekday) -> bool {
        !(self.weekdays_only && matches!(day, Weekday::Sat | Weekday::Sun))
    }
}
