//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tl_core::Period;

/// Reports over a plain-text timelog.
///
/// Reads `YYYY-MM-DD HH:MM: comment` lines and sums the time between them.
/// Gaps closed by a comment containing `**` are not counted as work.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the timelog (overrides `timelog_path` from the config).
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print worked hours per day as CSV.
    Csv,

    /// Summarize worked time by comment for a period.
    Report {
        #[command(flatten)]
        period: PeriodArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the entries of a period.
    Entries {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Show the expected working hours for a period.
    Expected {
        #[command(flatten)]
        period: PeriodFlags,
    },
}

/// Mutually exclusive period selection. Defaults to the month.
#[derive(Debug, Clone, Copy, Default, Args)]
#[group(multiple = false)]
pub struct PeriodFlags {
    /// Select a single day.
    #[arg(long)]
    pub day: bool,

    /// Select a week (Monday to Sunday).
    #[arg(long)]
    pub week: bool,

    /// Select a calendar month.
    #[arg(long)]
    pub month: bool,

    /// Select a calendar year.
    #[arg(long)]
    pub year: bool,
}

impl PeriodFlags {
    pub const fn period(&self) -> Period {
        if self.day {
            Period::Day
        } else if self.week {
            Period::Week
        } else if self.year {
            Period::Year
        } else {
            Period::Month
        }
    }
}

/// A period plus how many periods to move from the current one.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PeriodArgs {
    #[command(flatten)]
    pub flags: PeriodFlags,

    /// Periods relative to the current one (e.g. -1 for the previous).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i32,
}

impl PeriodArgs {
    pub const fn period(&self) -> Period {
        self.flags.period()
    }
}
