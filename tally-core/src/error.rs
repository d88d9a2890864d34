//! # Error Taxonomy
//!
//! Every failure a report run can hit, from configuration through the Jira
//! round trips to writing the report file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing a report
#[derive(Debug, Error)]
pub enum Error {
  /// Missing or invalid settings
  #[error("Configuration error: {0}")]
  Configuration(String),

  /// Jira rejected the email/API token pair
  #[error("Authentication failed for {endpoint} (HTTP {status}). Please check your Jira email and API token.")]
  Authentication { endpoint: String, status: u16 },

  /// Network unreachable, connection refused or request timed out
  #[error("Failed to reach Jira at {endpoint}: {message}")]
  Connectivity { endpoint: String, message: String },

  /// Non-success HTTP status from Jira
  #[error("Jira returned HTTP {status} for {endpoint}: {body}")]
  Api { endpoint: String, status: u16, body: String },

  /// Response did not have the expected shape
  #[error("Unexpected data from {context}: {message}")]
  DataFormat { context: String, message: String },

  /// Local file write failure
  #[error("Failed to write {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl Error {
  pub fn configuration(message: impl Into<String>) -> Self {
    Self::Configuration(message.into())
  }

  pub fn data_format(context: impl Into<String>, message: impl Into<String>) -> Self {
    Self::DataFormat {
      context: context.into(),
      message: message.into(),
    }
  }

  pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
