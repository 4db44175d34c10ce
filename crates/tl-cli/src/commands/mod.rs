//! CLI subcommand implementations.

pub mod csv;
pub mod entries;
pub mod expected;
pub mod report;
pub mod util;
