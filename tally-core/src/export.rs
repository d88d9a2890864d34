//! # Report File Export
//!
//! Writes the rendered report under the configured reports directory. The
//! text goes to a temporary file in the same directory which is then renamed
//! over the target, so an interrupted write never leaves a truncated report
//! in place of an older one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::window::ReportWindow;

/// File name for a report: project filter plus date range, e.g.
/// `Jira_Time_Report_PROJ_OPS_2025-05-15_to_2025-06-28.txt`
pub fn report_filename(projects: &[String], window: &ReportWindow) -> String {
  let project_part = if projects.is_empty() {
    "AllProjects".to_string()
  } else {
    projects.join("_")
  };
  format!(
    "Jira_Time_Report_{project_part}_{}_to_{}.txt",
    window.start_date(),
    window.end_date()
  )
}

/// Write `report` to `directory/filename`, creating the directory if needed.
/// Returns the final path.
pub fn save_report(report: &str, directory: &Path, filename: &str) -> Result<PathBuf> {
  fs::create_dir_all(directory).map_err(|e| Error::io(directory, e))?;

  let path = directory.join(filename);
  let mut file = NamedTempFile::new_in(directory).map_err(|e| Error::io(directory, e))?;
  file.write_all(report.as_bytes()).map_err(|e| Error::io(&path, e))?;
  file.flush().map_err(|e| Error::io(&path, e))?;
  file.persist(&path).map_err(|e| Error::io(&path, e.error))?;

  debug!("Wrote {} bytes to {}", report.len(), path.display());
  Ok(path)
}
