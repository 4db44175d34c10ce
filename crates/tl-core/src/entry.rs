//! Timelog line parsing.
//!
//! A timelog line has the shape `YYYY-MM-DD HH:MM: <comment>`. The first
//! `": "` separates the timestamp from the comment, so comments may contain
//! further colons.

use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Timestamp format used by timelog lines (minute precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Separator between the timestamp and the comment.
const SEPARATOR: &str = ": ";

/// Comment substring marking the preceding gap as non-working time.
pub const MARKER: &str = "**";

/// A line that could not be decomposed into timestamp and comment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("parse error in line {line}: {message}")]
pub struct ParseError {
    /// Zero-based index of the offending line.
    pub line: usize,
    /// The underlying cause.
    pub message: String,
}

/// One parsed timelog record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub timestamp: NaiveDateTime,
    pub comment: String,
}

impl Entry {
    pub fn new(timestamp: NaiveDateTime, comment: impl Into<String>) -> Self {
        Self {
            timestamp,
            comment: comment.into(),
        }
    }

    /// Whether the gap ending at this entry is excluded from worked time.
    pub fn is_marked(&self) -> bool {
        self.comment.contains(MARKER)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.comment
        )
    }
}

/// A parsed source line: either an entry or an originally empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Entry(Entry),
    Blank,
}

impl Line {
    /// Returns the entry, or `None` for a blank line.
    pub const fn entry(&self) -> Option<&Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Blank => None,
        }
    }

    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// Parses one raw line.
///
/// `line` is only used to position a [`ParseError`].
pub fn parse_line(raw: &str, line: usize) -> Result<Line, ParseError> {
    if raw.is_empty() {
        return Ok(Line::Blank);
    }

    let Some((timestamp, comment)) = raw.split_once(SEPARATOR) else {
        return Err(ParseError {
            line,
            message: format!("expected \"<timestamp>{SEPARATOR}<comment>\", got {raw:?}"),
        });
    };

    let timestamp =
        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| ParseError {
            line,
            message: format!("invalid timestamp {timestamp:?}: {e}"),
        })?;

    Ok(Line::Entry(Entry::new(timestamp, comment)))
}
