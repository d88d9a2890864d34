//! # Credential Lookup
//!
//! Fallback source for the Jira email/API token pair when the configuration
//! file and environment do not provide one: the user's `.netrc`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Machine name tried when the Jira host itself has no entry
pub const ATLASSIAN_FALLBACK_MACHINE: &str = "atlassian.net";

/// Represents credentials for a service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"***")
      .finish()
  }
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parse `.netrc` content and return credentials for the requested machine.
///
/// Supports both single-line (`machine host login user password pass`) and
/// multi-line layouts. An entry missing `login` or `password` is treated as
/// absent.
pub fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = content.split_whitespace();

  let mut current_machine: Option<&str> = None;
  let mut username: Option<&str> = None;
  let mut password: Option<&str> = None;

  while let Some(token) = tokens.next() {
    match token {
      "machine" | "default" => {
        if let Some(creds) = entry_for(target_machine, current_machine, username, password) {
          return Some(creds);
        }
        current_machine = if token == "machine" { tokens.next() } else { None };
        username = None;
        password = None;
      }
      "login" => username = tokens.next(),
      "password" => password = tokens.next(),
      _ => {}
    }
  }

  entry_for(target_machine, current_machine, username, password)
}

fn entry_for(
  target_machine: &str,
  machine: Option<&str>,
  username: Option<&str>,
  password: Option<&str>,
) -> Option<Credentials> {
  match (machine, username, password) {
    (Some(machine), Some(username), Some(password)) if machine == target_machine => Some(Credentials {
      username: username.to_string(),
      password: password.to_string(),
    }),
    _ => None,
  }
}

/// Look up credentials for `host` in `<home>/.netrc`, falling back to the
/// shared `atlassian.net` entry. A missing file yields `Ok(None)`.
pub fn netrc_credentials(home: &Path, host: &str) -> Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  let content = match fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      debug!("No .netrc at {}", path.display());
      return Ok(None);
    }
    Err(e) => {
      return Err(Error::configuration(format!("Failed to read {}: {e}", path.display())));
    }
  };

  let creds = parse_netrc(&content, host).or_else(|| parse_netrc(&content, ATLASSIAN_FALLBACK_MACHINE));
  if creds.is_some() {
    debug!("Using Jira credentials from {}", path.display());
  }
  Ok(creds)
}
