//! Core logic for plain-text timelogs.
//!
//! A timelog has one `YYYY-MM-DD HH:MM: comment` entry per line, in
//! chronological order. This crate provides:
//! - Parsing: lazily, one line at a time, memoized per index
//! - Range queries: bisection over the log, bounded by calendar periods
//! - Aggregation: worked time in total, by comment, or per day

pub mod aggregate;
pub mod calendar;
pub mod daily;
pub mod duration;
pub mod entry;
pub mod expected;
pub mod lazy;
pub mod query;

pub use aggregate::{Aggregator, CommentTotals};
pub use calendar::{DateOutOfRange, Period, Shift, UnknownPeriod, shift};
pub use daily::{DailyTotal, daily_totals};
pub use duration::{format_hms, whole_hours};
pub use entry::{Entry, Line, MARKER, ParseError, TIMESTAMP_FORMAT, parse_line};
pub use expected::ExpectedHours;
pub use lazy::{LazySequence, LineParser, Timelog, TimelogParser};
pub use query::{Query, QueryError, Side};
