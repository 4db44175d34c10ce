//! Per-day worked time.

use std::fmt;

use chrono::{NaiveDate, TimeDelta};

use crate::duration::whole_hours;
use crate::entry::{Entry, Line};

/// Worked time on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub worked: TimeDelta,
}

impl DailyTotal {
    /// Worked hours, truncated.
    pub fn hours(&self) -> i64 {
        whole_hours(self.worked)
    }
}

/// Renders as a CSV row: `"YYYY-MM-DD","H"`.
impl fmt::Display for DailyTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\",\"{}\"", self.date.format("%Y-%m-%d"), self.hours())
    }
}

/// Splits worked time into calendar days.
///
/// A gap is credited to the day of the entry that closes it, so time
/// spanning midnight counts toward the later day. Marked gaps are skipped
/// and blank lines ignored. Every day seen is emitted, including the last.
pub fn daily_totals<'a, I, E>(lines: I) -> Result<Vec<DailyTotal>, E>
where
    I: IntoIterator<Item = Result<&'a Line, E>>,
{
    let mut days = Vec::new();
    let mut worked = TimeDelta::zero();
    let mut last: Option<&Entry> = None;

    for line in lines {
        let Line::Entry(entry) = line? else {
            continue;
        };

        if let Some(prev) = last {
            if prev.timestamp.date() != entry.timestamp.date() {
                days.push(DailyTotal {
                    date: prev.timestamp.date(),
                    worked,
                });
                worked = TimeDelta::zero();
            }
            if !entry.is_marked() {
                worked += entry.timestamp - prev.timestamp;
            }
        }
        last = Some(entry);
    }

    if let Some(prev) = last {
        days.push(DailyTotal {
            date: prev.timestamp.date(),
            worked,
        });
    }

    tracing::debug!(days = days.len(), "computed daily totals");
    Ok(days)
}
