//! Report command for summarizing worked time.
//!
//! This module implements `tl report` with period options
//! (--day, --week, --month, --year, --offset) and output formats
//! (human-readable, JSON).

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;
use tl_core::{Aggregator, ExpectedHours, Period, Timelog, format_hms};

use super::util::select_period;
use crate::cli::PeriodArgs;

/// Labels shown below the per-comment rows.
const TOTAL_LABEL: &str = "TOTAL";
const EXPECTED_LABEL: &str = "EXPECTED";

/// Worked time for one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRow {
    pub comment: String,
    pub duration: String,
    pub seconds: i64,
}

/// Computed report data.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub period: Period,
    pub offset: i32,
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
    pub entries: usize,
    pub comments: Vec<CommentRow>,
    pub total: String,
    pub total_seconds: i64,
    pub expected: String,
    pub expected_hours: i64,
}

// ========== Report Generation ==========

/// Generates report data for the period selected by `args`.
pub fn generate_report_data(
    timelog: &Timelog,
    args: &PeriodArgs,
    today: NaiveDate,
    expected: &ExpectedHours,
) -> Result<ReportData> {
    let period = args.period();
    let (period_start, period_end) = period.bounds(today, args.offset)?;

    let query = select_period(timelog, args, today)?;
    let aggregator =
        Aggregator::try_collect(query.all()).context("failed to read entries for report")?;

    let comments = aggregator
        .by_comment()
        .iter()
        .map(|(comment, duration)| CommentRow {
            comment: comment.to_string(),
            duration: format_hms(duration),
            seconds: duration.num_seconds(),
        })
        .collect();
    let total = aggregator.sum();
    let expected_hours = expected.for_period(period);

    Ok(ReportData {
        period,
        offset: args.offset,
        period_start,
        period_end,
        entries: aggregator.len(),
        comments,
        total: format_hms(total),
        total_seconds: total.num_seconds(),
        expected: format_hms(TimeDelta::hours(expected_hours)),
        expected_hours,
    })
}

/// Formats the period description for the report header.
fn format_period_description(data: &ReportData) -> String {
    let start = data.period_start.date();
    match data.period {
        // "Wednesday, Jan 29, 2025"
        Period::Day => start.format("%A, %b %-d, %Y").to_string(),
        // "Week of Jan 27, 2025"
        Period::Week => format!("Week of {}", start.format("%b %-d, %Y")),
        // "January 2025"
        Period::Month => start.format("%B %Y").to_string(),
        Period::Year => start.format("%Y").to_string(),
    }
}

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    let period_desc = format_period_description(data);
    writeln!(output, "TIME REPORT: {period_desc}").unwrap();
    writeln!(output).unwrap();

    let width = data
        .comments
        .iter()
        .map(|row| row.comment.chars().count())
        .chain([TOTAL_LABEL.len(), EXPECTED_LABEL.len()])
        .max()
        .unwrap_or(0)
        + 2;

    if data.comments.is_empty() {
        writeln!(output, "No time recorded this {}.", data.period).unwrap();
    }
    for row in &data.comments {
        writeln!(output, "{:<width$}{}", row.comment, row.duration).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "{TOTAL_LABEL:<width$}{}", data.total).unwrap();
    writeln!(output, "{EXPECTED_LABEL:<width$}{}", data.expected).unwrap();

    output
}

/// Runs the report command for the local date.
pub fn run<W: Write>(
    writer: &mut W,
    timelog: &Timelog,
    args: &PeriodArgs,
    expected: &ExpectedHours,
    json: bool,
) -> Result<()> {
    let today = Local::now().date_naive();
    let data = generate_report_data(timelog, args, today, expected)?;
    tracing::debug!(entries = data.entries, total = %data.total, "generated report");

    if json {
        serde_json::to_writer_pretty(&mut *writer, &data).context("failed to serialize report")?;
        writeln!(writer)?;
    } else {
        write!(writer, "{}", format_report(&data))?;
    }
    Ok(())
}
