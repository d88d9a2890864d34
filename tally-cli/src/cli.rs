//! # Command Line Interface
//!
//! Tally has no subcommands: everything a run needs comes from the
//! configuration file, so the flags only choose that file and the log level.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tally_core::{Config, ProcessEnv};
use tracing::info;

use crate::pipeline;

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Jira time report: actuals vs estimates")]
#[command(
  long_about = "Queries Jira Cloud for worklogs in the configured period, totals the hours per team member\n\
  and per ticket, and compares them against the tickets' original estimates.\n\n\
  Configuration is read from --config, $TALLY_CONFIG, ./tally.toml or the user config directory.\n\
  JIRA_HOST, JIRA_EMAIL and JIRA_API_TOKEN override the [jira] section."
)]
#[command(version)]
pub struct Cli {
  /// Path to the configuration file
  #[arg(short, long, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Sets the level of verbosity (-v, -vv, -vvv)
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,
}

/// Load the configuration and run one report
pub fn handle_cli(cli: &Cli) -> Result<()> {
  let config = Config::load(cli.config.as_deref(), &ProcessEnv).context("Failed to load configuration")?;
  info!(
    "Reporting {} to {}",
    config.report.window.start().to_rfc3339(),
    config.report.window.end().to_rfc3339()
  );

  pipeline::run(&config)?;
  Ok(())
}
