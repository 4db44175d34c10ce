//! Timelog CLI library.
//!
//! This crate provides the CLI interface over `tl-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, PeriodArgs, PeriodFlags};
pub use config::Config;
