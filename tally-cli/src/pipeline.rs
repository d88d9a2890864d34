//! # Report Pipeline
//!
//! Fetch, aggregate and render run strictly one after another on a
//! current-thread runtime. The rendered report always reaches stdout before
//! the file is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use indicatif::{ProgressBar, ProgressStyle};
use tally_core::output::{format_path, print_info, print_success};
use tally_core::{Config, ReportContext, aggregate, render_report, report_filename, save_report};
use tally_jira::create_jira_client;
use tracing::info;

/// Fetch worklogs for `config` and render the report text
pub async fn generate_report(
  config: &Config,
  generated_at: DateTime<FixedOffset>,
  on_progress: impl FnMut(usize, usize),
) -> tally_core::Result<String> {
  let client = create_jira_client(&config.jira)?;
  let report = &config.report;

  let data = client
    .fetch_worklogs_in_window(&report.projects, &report.window, on_progress)
    .await?;
  info!(
    "Fetched {} issues and {} worklogs",
    data.issues.len(),
    data.worklogs.len()
  );

  let aggregation = aggregate(&data.issues, &data.worklogs, &report.window, &report.aggregate_options())?;

  let context = ReportContext {
    window: &report.window,
    projects: &report.projects,
    sort: report.sort,
    generated_at,
  };
  Ok(render_report(&aggregation, &context))
}

/// Produce the report, print it, and save it when configured.
///
/// Returns the saved path, if any.
pub fn run(config: &Config) -> Result<Option<PathBuf>> {
  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create tokio runtime")?;

  let progress = progress_bar();
  let result = runtime.block_on(generate_report(config, Local::now().fixed_offset(), |done, total| {
    progress.set_length(total as u64);
    progress.set_position(done as u64);
  }));
  progress.finish_and_clear();

  let report = result.context("Failed to generate report")?;
  println!("{report}");

  if !config.output.save_to_file {
    print_info("Report not saved (output.save_to_file = false)");
    return Ok(None);
  }

  let filename = report_filename(&config.report.projects, &config.report.window);
  let path = save_report(&report, &config.output.directory, &filename).context("Failed to save report")?;
  print_success(&format!("Report saved to {}", format_path(&path.display().to_string())));

  Ok(Some(path))
}

fn progress_bar() -> ProgressBar {
  let bar = ProgressBar::new(0);
  let style = ProgressStyle::with_template("{spinner} Fetching worklogs [{bar:30}] {pos}/{len} issues")
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
  bar.set_style(style);
  bar
}
