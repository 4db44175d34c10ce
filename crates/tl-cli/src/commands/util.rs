//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tl_core::{Query, Timelog};

use crate::cli::PeriodArgs;

/// Reads a timelog file, dropping blank lines.
pub fn load_timelog(path: &Path) -> Result<Timelog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read timelog: {}", path.display()))?;
    let timelog = Timelog::from_text(&text);
    tracing::info!(path = %path.display(), lines = timelog.len(), "opened timelog");
    Ok(timelog)
}

/// Narrows a query over `timelog` to the requested period.
pub fn select_period<'a>(
    timelog: &'a Timelog,
    args: &PeriodArgs,
    today: NaiveDate,
) -> Result<Query<'a>> {
    let mut query = Query::new(timelog);
    query
        .period_from(args.period(), today, args.offset)
        .with_context(|| format!("failed to select {} (offset {})", args.period(), args.offset))?;
    Ok(query)
}
