//! Temporary `.netrc` files for credential tests

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// RAII guard for test .netrc files
///
/// Creates a temporary home directory containing a `.netrc` with the given
/// content. Nothing in the process environment is changed; pass
/// [`NetrcGuard::home_dir`] to the code under test instead.
pub struct NetrcGuard {
  temp_dir: TempDir,
}

impl NetrcGuard {
  /// Create a new NetrcGuard with the given content
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join(".netrc"), content).expect("Failed to write test .netrc");

    Self { temp_dir }
  }

  /// Get the path to the temporary home directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
