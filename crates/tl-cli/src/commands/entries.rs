//! Entries command: lists the raw entries of a period.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tl_core::Timelog;

use super::util::select_period;
use crate::cli::PeriodArgs;

pub fn run<W: Write>(writer: &mut W, timelog: &Timelog, args: &PeriodArgs) -> Result<()> {
    write_entries(writer, timelog, args, Local::now().date_naive())
}

fn write_entries<W: Write>(
    writer: &mut W,
    timelog: &Timelog,
    args: &PeriodArgs,
    today: NaiveDate,
) -> Result<()> {
    let query = select_period(timelog, args, today)?;
    for entry in query.entries() {
        let entry = entry.context("failed to read entry")?;
        writeln!(writer, "{entry}")?;
    }
    Ok(())
}
