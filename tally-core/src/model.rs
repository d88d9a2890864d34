//! # Worklog Domain Model
//!
//! Validated records produced by the Jira client and consumed by the
//! aggregator. Durations are whole seconds, matching what Jira reports.

use chrono::{DateTime, FixedOffset};

/// Seconds in one hour
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Person who logged work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
  /// Stable Jira account id, used for grouping
  pub account_id: String,
  /// Human-readable name, used for rendering
  pub display_name: String,
}

/// A Jira issue relevant to the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
  pub key: String,
  pub summary: String,
  pub project_key: String,
  /// Original estimate in seconds, `None` when never set
  pub original_estimate_seconds: Option<i64>,
}

/// A single worklog entry on an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorklogEntry {
  pub issue_key: String,
  pub author: Author,
  pub time_spent_seconds: i64,
  pub started: DateTime<FixedOffset>,
}

/// Convert whole seconds to fractional hours
pub fn seconds_to_hours(seconds: i64) -> f64 {
  seconds as f64 / SECONDS_PER_HOUR as f64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_seconds_to_hours() {
    assert_eq!(seconds_to_hours(0), 0.0);
    assert_eq!(seconds_to_hours(5400), 1.5);
    assert_eq!(seconds_to_hours(-1800), -0.5);
  }
}
