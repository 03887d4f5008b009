//! Resolve the transaction instant from relative-date and time-of-day cues.
//!
//! Order matters:
//!   1. first relative-date keyword shifts the date of `now`
//!   2. first time-of-day keyword sets the clock (and skips step 3)
//!   3. otherwise an explicit "15:30" / "3点" / "8点30分" sets the clock,
//!      promoted to the afternoon when "下午"/"晚上" is present
//!   4. otherwise the clock of `now` is kept
//!
//! All arithmetic happens on the wall clock of `now`'s timezone. The system clock is
//! never consulted.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use regex::Regex;
use tally_core::{ClockTime, DayOffset, RelativeDateTable, TimeOfDayTable, Vocabulary};
use tracing::debug;

/// Group 1 is the left boundary (start or a non-digit), so "648点" never reads as 48点.
/// Groups 2 and 3 are hour and minute.
pub(crate) const CLOCK_PATTERN: &str = r"(^|[^0-9])([0-9]{1,2})\s*[:：点时]\s*([0-9]{0,2})\s*分?";

const AFTERNOON_MARKERS: [&str; 2] = ["下午", "晚上"];

/// Where the clock part of the result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource<'v> {
    Keyword(&'v ClockTime),
    Explicit { hour: u32, minute: u32 },
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Resolved<'v, Tz: TimeZone> {
    pub at: DateTime<Tz>,
    pub day: Option<&'v DayOffset>,
    pub clock: ClockSource<'v>,
}

impl<Tz: TimeZone> Resolved<'_, Tz> {
    /// Human-readable cue such as "昨天中午" or "下午 15:30"
    pub fn label(&self) -> Option<String> {
        let day = self.day.map(|d| d.keyword.as_str()).unwrap_or("");
        let clock = match self.clock {
            ClockSource::Keyword(c) => c.keyword.clone(),
            ClockSource::Explicit { hour, minute } => {
                format!("{} {hour:02}:{minute:02}", tally_core::period_name(hour))
            }
            ClockSource::Unchanged => String::new(),
        };
        let label = format!("{day}{clock}");
        (!label.is_empty()).then_some(label)
    }
}

#[derive(Debug, Clone)]
pub struct DateTimeResolver<'v> {
    dates: &'v RelativeDateTable,
    times: &'v TimeOfDayTable,
    clock: Regex,
}

impl<'v> DateTimeResolver<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Result<Self> {
        Ok(Self {
            dates: &vocab.relative_dates,
            times: &vocab.times_of_day,
            clock: Regex::new(CLOCK_PATTERN)?,
        })
    }

    pub fn resolve<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> Resolved<'v, Tz> {
        let local = now.naive_local();
        let dates: &'v RelativeDateTable = self.dates;
        let times: &'v TimeOfDayTable = self.times;

        let day = dates.find(text);
        let date = day
            .and_then(|d| local.date().checked_add_signed(Duration::days(d.offset)))
            .unwrap_or(local.date());

        let clock = match times.find(text) {
            Some(c) => ClockSource::Keyword(c),
            None => match self.explicit_clock(text) {
                Some((hour, minute)) => ClockSource::Explicit { hour, minute },
                None => ClockSource::Unchanged,
            },
        };

        let time = match clock {
            ClockSource::Keyword(c) => c.time(),
            ClockSource::Explicit { hour, minute } => NaiveTime::from_hms_opt(hour, minute, 0),
            ClockSource::Unchanged => None,
        }
        .unwrap_or(local.time());

        debug!(
            day = day.map(|d| d.keyword.as_str()),
            ?clock,
            %date,
            %time,
            "resolved date/time cues"
        );

        let at = if date == local.date() && time == local.time() {
            now.clone()
        } else {
            tally_core::localize(now, date.and_time(time))
        };

        Resolved { at, day, clock }
    }

    fn explicit_clock(&self, text: &str) -> Option<(u32, u32)> {
        let caps = self.clock.captures(text)?;
        let hour: u32 = caps.get(2)?.as_str().parse().ok()?;
        let minute: u32 = match caps.get(3).map(|m| m.as_str()) {
            None | Some("") => 0,
            Some(m) => m.parse().ok()?,
        };
        let hour = if hour < 12 && AFTERNOON_MARKERS.iter().any(|m| text.contains(m)) {
            hour + 12
        } else {
            hour
        };
        (hour <= 23 && minute <= 59).then_some((hour, minute))
    }
}
