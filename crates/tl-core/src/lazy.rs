//! Lazily parsed line sequences.
//!
//! A [`LazySequence`] owns a fixed list of raw lines and parses each one on
//! first access. Successful parses are memoized per index and never
//! recomputed; failures are returned to the caller and not cached, so asking
//! for the same index again re-raises the error.
//!
//! The cache uses [`OnceCell`], so a sequence is not `Sync`. Sharing one log
//! between threads would need a per-slot `OnceLock` instead.

use std::cell::OnceCell;
use std::fmt;

use crate::entry::{Line, ParseError, parse_line};

/// Converts one raw line into a value.
///
/// This trait lets [`LazySequence`] memoize any per-line parser; the timelog
/// uses [`TimelogParser`].
pub trait LineParser {
    type Output;
    type Error;

    /// Parses the raw line found at `index`.
    fn parse(&self, raw: &str, index: usize) -> Result<Self::Output, Self::Error>;
}

/// Parses `YYYY-MM-DD HH:MM: comment` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelogParser;

impl LineParser for TimelogParser {
    type Output = Line;
    type Error = ParseError;

    fn parse(&self, raw: &str, index: usize) -> Result<Line, ParseError> {
        parse_line(raw, index)
    }
}

/// A fixed-length sequence of raw lines, parsed on demand.
pub struct LazySequence<P: LineParser> {
    parser: P,
    source: Vec<String>,
    cache: Vec<OnceCell<P::Output>>,
}

/// A lazily parsed timelog.
pub type Timelog = LazySequence<TimelogParser>;

impl<P: LineParser> LazySequence<P> {
    /// Creates a sequence over `source` using `parser`.
    pub fn with_parser(parser: P, source: Vec<String>) -> Self {
        let cache = source.iter().map(|_| OnceCell::new()).collect();
        Self {
            parser,
            source,
            cache,
        }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the unparsed line at `index`.
    pub fn raw(&self, index: usize) -> Option<&str> {
        self.source.get(index).map(String::as_str)
    }

    /// Returns the parsed value at `index`, parsing it on first access.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`, like slice indexing.
    pub fn get(&self, index: usize) -> Result<&P::Output, P::Error> {
        let slot = &self.cache[index];
        if let Some(value) = slot.get() {
            return Ok(value);
        }

        let value = self.parser.parse(&self.source[index], index)?;
        Ok(slot.get_or_init(|| value))
    }

    /// Iterates over all values in order, parsing lazily as it goes.
    pub fn iter(&self) -> impl Iterator<Item = Result<&P::Output, P::Error>> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }

    /// Number of slots that already hold a parsed value.
    pub fn parsed_count(&self) -> usize {
        self.cache.iter().filter(|slot| slot.get().is_some()).count()
    }
}

impl<P: LineParser> fmt::Debug for LazySequence<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySequence")
            .field("len", &self.len())
            .field("parsed", &self.parsed_count())
            .finish_non_exhaustive()
    }
}

impl Timelog {
    /// Creates a timelog from raw lines, kept verbatim.
    ///
    /// Empty lines become [`Line::Blank`] slots.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_parser(TimelogParser, lines.into_iter().map(Into::into).collect())
    }

    /// Creates a timelog from file contents.
    ///
    /// Lines are trimmed and blank lines dropped, so line indices in errors
    /// refer to the remaining non-blank lines.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        tracing::debug!(lines = lines.len(), "loaded timelog");
        Self::with_parser(TimelogParser, lines)
    }
}
