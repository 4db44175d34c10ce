use std::io::{BufWriter, Write, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::{csv, entries, expected, report, util};
use tl_cli::{Cli, Commands, Config};

/// Load config and the timelog it points at.
fn open_timelog(
    config_path: Option<&Path>,
    file: Option<&Path>,
) -> Result<(tl_core::Timelog, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = file.unwrap_or(config.timelog_path.as_path());
    let timelog = util::load_timelog(path)?;
    Ok((timelog, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout only carries command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match &cli.command {
        Some(Commands::Csv) => {
            let (timelog, _config) = open_timelog(cli.config.as_deref(), cli.file.as_deref())?;
            csv::run(&mut writer, &timelog)?;
        }
        Some(Commands::Report { period, json }) => {
            let (timelog, config) = open_timelog(cli.config.as_deref(), cli.file.as_deref())?;
            report::run(&mut writer, &timelog, period, &config.expected, *json)?;
        }
        Some(Commands::Entries { period }) => {
            let (timelog, _config) = open_timelog(cli.config.as_deref(), cli.file.as_deref())?;
            entries::run(&mut writer, &timelog, period)?;
        }
        Some(Commands::Expected { period }) => {
            // Only needs config, not the timelog
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            expected::run(&mut writer, &config.expected, period.period())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    writer.flush()?;
    Ok(())
}
