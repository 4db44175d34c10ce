//! CSV command: worked hours per day.
//!
//! Emits one `"YYYY-MM-DD","H"` row per day in the log, hours truncated.

use std::io::Write;

use anyhow::{Context, Result};
use tl_core::{Timelog, daily_totals};

pub fn run<W: Write>(writer: &mut W, timelog: &Timelog) -> Result<()> {
    let days = daily_totals(timelog.iter()).context("failed to compute daily totals")?;
    for day in days {
        writeln!(writer, "{day}")?;
    }
    Ok(())
}
