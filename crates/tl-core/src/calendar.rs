//! Calendar periods and date arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar offset applied by [`shift`].
///
/// Weeks and days move the date by an exact duration; months and years move
/// the calendar fields and keep the day of month and time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shift {
    pub years: i32,
    pub months: i32,
    pub weeks: i64,
    pub days: i64,
}

impl Shift {
    pub const fn days(days: i64) -> Self {
        Self {
            years: 0,
            months: 0,
            weeks: 0,
            days,
        }
    }

    pub const fn weeks(weeks: i64) -> Self {
        Self {
            years: 0,
            months: 0,
            weeks,
            days: 0,
        }
    }

    pub const fn months(months: i32) -> Self {
        Self {
            years: 0,
            months,
            weeks: 0,
            days: 0,
        }
    }

    pub const fn years(years: i32) -> Self {
        Self {
            years,
            months: 0,
            weeks: 0,
            days: 0,
        }
    }
}

/// Calendar arithmetic produced a date that does not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("date out of range: {base} shifted by {shift:?}")]
pub struct DateOutOfRange {
    pub base: NaiveDateTime,
    pub shift: Shift,
}

/// Applies `by` to `base`.
///
/// Month overflow carries into the year (`month - 1 + months` is split with
/// floor division by 12). The day of month is never clamped: shifting
/// January 31 by one month fails instead of landing on February 28.
pub fn shift(base: NaiveDateTime, by: Shift) -> Result<NaiveDateTime, DateOutOfRange> {
    let out_of_range = || DateOutOfRange { base, shift: by };

    let delta = TimeDelta::try_weeks(by.weeks)
        .zip(TimeDelta::try_days(by.days))
        .and_then(|(weeks, days)| weeks.checked_add(&days))
        .ok_or_else(out_of_range)?;
    let moved = base.checked_add_signed(delta).ok_or_else(out_of_range)?;

    let months = i64::from(moved.month0()) + i64::from(by.months);
    let year = i64::from(moved.year()) + i64::from(by.years) + months.div_euclid(12);
    let year = i32::try_from(year).map_err(|_| out_of_range())?;
    let month = u32::try_from(months.rem_euclid(12) + 1).map_err(|_| out_of_range())?;

    let date = NaiveDate::from_ymd_opt(year, month, moved.day()).ok_or_else(out_of_range)?;
    Ok(date.and_time(moved.time()))
}

/// A calendar-aligned query period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    /// Monday through Sunday.
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    /// Start of the period containing `today`.
    pub fn start(self, today: NaiveDate) -> Result<NaiveDateTime, DateOutOfRange> {
        let midnight = NaiveDateTime::from(today);
        match self {
            Self::Day => Ok(midnight),
            Self::Week => shift(
                midnight,
                Shift::days(-i64::from(today.weekday().num_days_from_monday())),
            ),
            Self::Month => shift(midnight, Shift::days(-i64::from(today.day0()))),
            Self::Year => shift(midnight, Shift::days(-i64::from(today.ordinal0()))),
        }
    }

    /// Half-open bounds `[start, end)` of the period `offset` units away from
    /// the one containing `today`.
    pub fn bounds(
        self,
        today: NaiveDate,
        offset: i32,
    ) -> Result<(NaiveDateTime, NaiveDateTime), DateOutOfRange> {
        let start = self.start(today)?;
        let end = shift(start, self.unit(offset.saturating_add(1)))?;
        Ok((shift(start, self.unit(offset))?, end))
    }

    /// A shift of `n` whole periods.
    pub fn unit(self, n: i32) -> Shift {
        match self {
            Self::Day => Shift::days(i64::from(n)),
            Self::Week => Shift::weeks(i64::from(n)),
            Self::Month => Shift::months(n),
            Self::Year => Shift::years(n),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for unknown period strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown period: {0}")]
pub struct UnknownPeriod(String);

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(UnknownPeriod(s.to_string())),
        }
    }
}
