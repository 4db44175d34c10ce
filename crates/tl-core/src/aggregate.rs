//! Worked-time aggregation.
//!
//! Time is accounted per gap between consecutive entries. A gap belongs to
//! the later entry: its comment labels the gap, and if that comment carries
//! the [`MARKER`](crate::entry::MARKER) the gap is not worked time and is
//! skipped entirely.

use std::collections::HashMap;

use chrono::TimeDelta;

use crate::entry::{Entry, Line};

/// Aggregates elapsed time over a time-ordered run of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregator {
    entries: Vec<Entry>,
}

impl Aggregator {
    /// Builds an aggregator from parsed lines, skipping blanks.
    pub fn new<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a Line>,
    {
        lines.into_iter().filter_map(Line::entry).cloned().collect()
    }

    /// Builds an aggregator from fallibly parsed lines.
    ///
    /// Stops at the first error, so no partial result is produced.
    pub fn try_collect<'a, I, E>(lines: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<&'a Line, E>>,
    {
        let mut entries = Vec::new();
        for line in lines {
            if let Line::Entry(entry) = line? {
                entries.push(entry.clone());
            }
        }
        tracing::debug!(entries = entries.len(), "collected entries for aggregation");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Worked gaps with the entry that closes them.
    fn gaps(&self) -> impl Iterator<Item = (&Entry, TimeDelta)> {
        self.entries
            .windows(2)
            .filter(|pair| !pair[1].is_marked())
            .map(|pair| (&pair[1], pair[1].timestamp - pair[0].timestamp))
    }

    /// Total worked time.
    pub fn sum(&self) -> TimeDelta {
        self.gaps()
            .fold(TimeDelta::zero(), |total, (_, gap)| total + gap)
    }

    /// Worked time keyed by the comment that closes each gap.
    pub fn by_comment(&self) -> CommentTotals {
        let mut totals = CommentTotals::default();
        for (entry, gap) in self.gaps() {
            totals.add(&entry.comment, gap);
        }
        totals
    }
}

impl FromIterator<Entry> for Aggregator {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Durations keyed by comment, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTotals {
    totals: Vec<(String, TimeDelta)>,
    index: HashMap<String, usize>,
}

impl CommentTotals {
    /// Adds `duration` to the total for `comment`.
    pub fn add(&mut self, comment: &str, duration: TimeDelta) {
        if let Some(&slot) = self.index.get(comment) {
            self.totals[slot].1 += duration;
        } else {
            self.index.insert(comment.to_string(), self.totals.len());
            self.totals.push((comment.to_string(), duration));
        }
    }

    pub fn get(&self, comment: &str) -> Option<TimeDelta> {
        self.index.get(comment).map(|&slot| self.totals[slot].1)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TimeDelta)> {
        self.totals
            .iter()
            .map(|(comment, duration)| (comment.as_str(), *duration))
    }

    /// Width of the longest comment, in characters.
    pub fn max_comment_width(&self) -> usize {
        self.totals
            .iter()
            .map(|(comment, _)| comment.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Sum of all totals.
    pub fn total(&self) -> TimeDelta {
        self.totals
            .iter()
            .fold(TimeDelta::zero(), |total, (_, duration)| total + *duration)
    }
}
