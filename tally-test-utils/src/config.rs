//! Temporary configuration files for tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard owning a temporary directory with a `tally.toml` inside.
///
/// The directory, and the reports a test writes into it, disappear when the
/// guard is dropped.
pub struct ConfigFileGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl ConfigFileGuard {
  /// Write `content` to a fresh `tally.toml`
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("tally.toml");
    fs::write(&path, content).expect("Failed to write test config");
    Self { temp_dir, path }
  }

  /// Build a complete configuration pointing at `jira_url`, saving reports
  /// into this guard's `reports` directory.
  pub fn for_server(jira_url: &str, extra_report_keys: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let reports = temp_dir.path().join("reports");
    let content = format!(
      r#"[jira]
url = "{jira_url}"
email = "test_user@example.com"
api_token = "test_token"
timeout_secs = 5

[report]
start = "2025-05-01T00:00:00+00:00"
end = "2025-05-31T23:59:59+00:00"
{extra_report_keys}

[output]
save_to_file = true
directory = "{}"
"#,
      reports.display().to_string().replace('\\', "\\\\")
    );

    let path = temp_dir.path().join("tally.toml");
    fs::write(&path, content).expect("Failed to write test config");
    Self { temp_dir, path }
  }

  /// Path to the configuration file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Directory reports are written to by [`ConfigFileGuard::for_server`]
  pub fn reports_dir(&self) -> PathBuf {
    self.temp_dir.path().join("reports")
  }
}
