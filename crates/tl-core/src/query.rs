//! Range queries over a chronologically ordered timelog.
//!
//! A [`Query`] holds a contiguous window of indices into a [`Timelog`] and
//! narrows it with bisection, so only `O(log n)` lines are parsed per cut.
//! The log is assumed to be sorted by timestamp; this is not verified.
//!
//! Calendar helpers compose two cuts. They narrow the current window rather
//! than resetting it, so `month(0)` followed by `month(-1)` is empty.

use std::ops::Range;

use chrono::{Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::calendar::{DateOutOfRange, Period};
use crate::entry::{Entry, Line, ParseError};
use crate::lazy::Timelog;

/// Errors raised while narrowing a query window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A line inspected by the search failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The search landed on an empty line, which has no timestamp.
    #[error("line {line} is blank and has no timestamp")]
    BlankEntry { line: usize },

    /// A period boundary could not be computed.
    #[error(transparent)]
    DateOutOfRange(#[from] DateOutOfRange),
}

/// Which side of a cutoff to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Entries strictly before the cutoff.
    Before,
    /// Entries at or after the cutoff.
    After,
}

/// A narrowing window over a [`Timelog`].
#[derive(Debug, Clone)]
pub struct Query<'a> {
    timelog: &'a Timelog,
    window: Range<usize>,
}

impl<'a> Query<'a> {
    /// Creates a query spanning the whole log.
    pub fn new(timelog: &'a Timelog) -> Self {
        Self {
            timelog,
            window: 0..timelog.len(),
        }
    }

    /// The currently selected index range.
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    fn timestamp_at(&self, index: usize) -> Result<NaiveDateTime, QueryError> {
        match self.timelog.get(index)? {
            Line::Entry(entry) => Ok(entry.timestamp),
            Line::Blank => Err(QueryError::BlankEntry { line: index }),
        }
    }

    /// Index of the first entry in the window at or after `cutoff`.
    fn boundary(&self, cutoff: NaiveDateTime) -> Result<usize, QueryError> {
        let mut low = self.window.start;
        let mut high = self.window.end;

        while low != high {
            let mid = low.midpoint(high);
            if self.timestamp_at(mid)? < cutoff {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        Ok(low)
    }

    /// Keeps one side of `cutoff`.
    pub fn split(&mut self, cutoff: NaiveDateTime, side: Side) -> Result<&mut Self, QueryError> {
        let boundary = self.boundary(cutoff)?;
        match side {
            Side::Before => self.window.end = boundary,
            Side::After => self.window.start = boundary,
        }
        tracing::debug!(%cutoff, ?side, window = ?self.window, "narrowed query");
        Ok(self)
    }

    /// Keeps entries with a timestamp strictly before `cutoff`.
    pub fn before(&mut self, cutoff: NaiveDateTime) -> Result<&mut Self, QueryError> {
        self.split(cutoff, Side::Before)
    }

    /// Keeps entries with a timestamp at or after `cutoff`.
    pub fn after(&mut self, cutoff: NaiveDateTime) -> Result<&mut Self, QueryError> {
        self.split(cutoff, Side::After)
    }

    /// Narrows to the `period` that is `offset` periods away from the one
    /// containing `today`.
    pub fn period_from(
        &mut self,
        period: Period,
        today: NaiveDate,
        offset: i32,
    ) -> Result<&mut Self, QueryError> {
        let (start, end) = period.bounds(today, offset)?;
        tracing::debug!(%period, offset, %start, %end, "selecting period");
        self.after(start)?.before(end)
    }

    /// Like [`Query::period_from`], relative to the local date.
    pub fn period(&mut self, period: Period, offset: i32) -> Result<&mut Self, QueryError> {
        self.period_from(period, Local::now().date_naive(), offset)
    }

    pub fn day(&mut self, offset: i32) -> Result<&mut Self, QueryError> {
        self.period(Period::Day, offset)
    }

    /// Monday-based week.
    pub fn week(&mut self, offset: i32) -> Result<&mut Self, QueryError> {
        self.period(Period::Week, offset)
    }

    pub fn month(&mut self, offset: i32) -> Result<&mut Self, QueryError> {
        self.period(Period::Month, offset)
    }

    pub fn year(&mut self, offset: i32) -> Result<&mut Self, QueryError> {
        self.period(Period::Year, offset)
    }

    /// Lazily yields every line in the window, in order.
    pub fn all(&self) -> impl Iterator<Item = Result<&'a Line, ParseError>> + 'a {
        let timelog = self.timelog;
        self.window.clone().map(move |index| timelog.get(index))
    }

    /// Like [`Query::all`], skipping blank lines.
    pub fn entries(&self) -> impl Iterator<Item = Result<&'a Entry, ParseError>> + 'a {
        self.all()
            .filter_map(|line| line.map(Line::entry).transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn log(hours: &[(u32, u32)]) -> Timelog {
        Timelog::new(
            hours
                .iter()
                .map(|(day, hour)| format!("2024-01-{day:02} {hour:02}:00: e{day}-{hour}")),
        )
    }

    fn timestamps(query: &Query<'_>) -> Vec<NaiveDateTime> {
        query.entries().map(|e| e.unwrap().timestamp).collect()
    }

    const SAMPLE: &[(u32, u32)] = &[(1, 9), (1, 12), (2, 9), (2, 17), (3, 8), (3, 8), (4, 10)];

    #[test]
    fn starts_with_full_window() {
        let timelog = log(SAMPLE);
        let query = Query::new(&timelog);
        assert_eq!(query.window(), 0..7);
        assert_eq!(timelog.parsed_count(), 0);
    }

    #[test]
    fn after_keeps_entries_at_or_after_cutoff() {
        let timelog = log(SAMPLE);
        let mut query = Query::new(&timelog);
        query.after(at(2, 17)).unwrap();
        assert_eq!(timestamps(&query), vec![at(2, 17), at(3, 8), at(3, 8), at(4, 10)]);
    }

    #[test]
    fn before_keeps_entries_strictly_before_cutoff() {
        let timelog = log(SAMPLE);
        let mut query = Query::new(&timelog);
        query.before(at(3, 8)).unwrap();
        assert_eq!(timestamps(&query), vec![at(1, 9), at(1, 12), at(2, 9), at(2, 17)]);
    }

    #[test]
    fn before_and_after_partition_the_window() {
        let timelog = log(SAMPLE);
        let all: Vec<_> = timestamps(&Query::new(&timelog));

        for day in 1..=5 {
            for hour in [0, 8, 9, 12, 23] {
                let cutoff = at(day, hour);
                let mut before = Query::new(&timelog);
                before.before(cutoff).unwrap();
                let mut after = Query::new(&timelog);
                after.after(cutoff).unwrap();

                assert!(timestamps(&before).iter().all(|t| *t < cutoff));
                assert!(timestamps(&after).iter().all(|t| *t >= cutoff));

                let mut joined = timestamps(&before);
                joined.extend(timestamps(&after));
                assert_eq!(joined, all, "cutoff {cutoff}");
            }
        }
    }

    #[test]
    fn cutoffs_outside_the_log() {
        let timelog = log(SAMPLE);

        let mut query = Query::new(&timelog);
        query.after(at(1, 0)).unwrap();
        assert_eq!(query.len(), 7);
        query.before(at(1, 0)).unwrap();
        assert!(query.is_empty());

        let mut query = Query::new(&timelog);
        query.after(at(5, 0)).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn search_parses_logarithmically() {
        let entries: Vec<_> = (0..1024).map(|i| (1 + i / 24, i % 24)).take(744).collect();
        let timelog = log(&entries);
        let mut query = Query::new(&timelog);
        query.after(at(15, 0)).unwrap();
        assert!(timelog.parsed_count() <= 11);
    }

    #[test]
    fn empty_and_single_windows() {
        let timelog = Timelog::new(Vec::<String>::new());
        let mut query = Query::new(&timelog);
        query.after(at(1, 0)).unwrap().before(at(2, 0)).unwrap();
        assert!(query.is_empty());

        let timelog = log(&[(2, 9)]);
        let mut query = Query::new(&timelog);
        query.after(at(3, 0)).unwrap();
        assert!(query.is_empty());

        let mut query = Query::new(&timelog);
        query.after(at(2, 9)).unwrap();
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn disjoint_ranges_yield_empty_window() {
        let timelog = log(SAMPLE);
        let mut query = Query::new(&timelog);
        query.after(at(1, 0)).unwrap().before(at(2, 0)).unwrap();
        assert_eq!(query.len(), 2);
        query.after(at(3, 0)).unwrap().before(at(4, 0)).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn period_from_selects_month() {
        let timelog = Timelog::new([
            "2023-12-31 23:00: old year",
            "2024-01-01 00:00: new year",
            "2024-01-31 18:00: end of month",
            "2024-02-01 00:00: february",
        ]);
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let mut query = Query::new(&timelog);
        query.period_from(Period::Month, today, 0).unwrap();
        let comments: Vec<_> = query.entries().map(|e| e.unwrap().comment.as_str()).collect();
        assert_eq!(comments, ["new year", "end of month"]);

        let mut query = Query::new(&timelog);
        query.period_from(Period::Year, today, -1).unwrap();
        let comments: Vec<_> = query.entries().map(|e| e.unwrap().comment.as_str()).collect();
        assert_eq!(comments, ["old year"]);
    }

    #[test]
    fn periods_narrow_rather_than_reset() {
        let timelog = Timelog::new(["2024-01-10 09:00: a", "2024-02-10 09:00: b"]);
        let today = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();

        let mut query = Query::new(&timelog);
        query.period_from(Period::Month, today, 0).unwrap();
        assert_eq!(query.len(), 1);
        query.period_from(Period::Month, today, -1).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn live_period_selects_current_day() {
        let now = Local::now().naive_local();
        let line = format!("{}: now", now.format("%Y-%m-%d %H:%M"));
        let timelog = Timelog::new([line]);

        let mut query = Query::new(&timelog);
        query.day(-1).unwrap();
        assert!(query.is_empty());
        let mut query = Query::new(&timelog);
        query.year(0).unwrap();
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn parse_error_surfaces_from_search() {
        let timelog = Timelog::new([
            "2024-01-01 09:00: a",
            "not a line",
            "2024-01-03 09:00: c",
        ]);
        let mut query = Query::new(&timelog);
        let err = query.after(at(2, 0)).unwrap_err();
        assert_eq!(
            err,
            QueryError::Parse(ParseError {
                line: 1,
                message: "expected \"<timestamp>: <comment>\", got \"not a line\"".to_string(),
            })
        );
    }

    #[test]
    fn blank_line_in_search_path_is_an_error() {
        let timelog = Timelog::new(["2024-01-01 09:00: a", "", "2024-01-03 09:00: c"]);
        let mut query = Query::new(&timelog);
        let err = query.after(at(2, 0)).unwrap_err();
        assert_eq!(err, QueryError::BlankEntry { line: 1 });
    }

    #[test]
    fn all_is_restartable() {
        let timelog = Timelog::new(["2024-01-01 09:00: a", "", "2024-01-03 09:00: c"]);
        let query = Query::new(&timelog);
        assert_eq!(query.all().count(), 3);
        assert_eq!(query.all().count(), 3);
        assert_eq!(query.entries().count(), 2);
    }
}
