//! # Report Window
//!
//! The inclusive `[start, end]` period a report covers, plus the timestamp
//! parsing shared by configuration values and Jira worklog payloads.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::error::{Error, Result};

/// Jira emits offsets without a colon, e.g. `2025-05-20T09:30:00.000+0000`
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive time range covered by a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
  start: DateTime<FixedOffset>,
  end: DateTime<FixedOffset>,
}

impl ReportWindow {
  /// Create a window, rejecting `start > end`
  pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<Self> {
    if start > end {
      return Err(Error::configuration(format!(
        "report.start ({}) is after report.end ({})",
        start.to_rfc3339(),
        end.to_rfc3339()
      )));
    }
    Ok(Self { start, end })
  }

  /// Parse the configured start/end values.
  ///
  /// Values without an offset are taken as UTC. An end value at exactly
  /// midnight is stretched to the last microsecond of that day so that the
  /// whole day is part of the report.
  pub fn parse(start: &str, end: &str) -> Result<Self> {
    let start = parse_timestamp(start)
      .map_err(|message| Error::configuration(format!("Invalid report.start '{start}': {message}")))?;
    let mut end =
      parse_timestamp(end).map_err(|message| Error::configuration(format!("Invalid report.end '{end}': {message}")))?;

    if end.time() == NaiveTime::MIN {
      end = end + TimeDelta::days(1) - TimeDelta::microseconds(1);
    }

    Self::new(start, end)
  }

  pub const fn start(&self) -> DateTime<FixedOffset> {
    self.start
  }

  pub const fn end(&self) -> DateTime<FixedOffset> {
    self.end
  }

  /// Calendar date of the start, in the start's own offset
  pub fn start_date(&self) -> NaiveDate {
    self.start.date_naive()
  }

  /// Calendar date of the end, in the end's own offset
  pub fn end_date(&self) -> NaiveDate {
    self.end.date_naive()
  }

  /// Whether a timestamp falls inside the window. Both bounds are inclusive.
  pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
    *timestamp >= self.start && *timestamp <= self.end
  }
}

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 (`+00:00` / `Z`), Jira's colon-less offsets (`+0000`),
/// offset-less timestamps (assumed UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(input: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
  let input = input.trim();
  if input.is_empty() {
    return Err("timestamp is empty".to_string());
  }

  if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
    return Ok(parsed);
  }
  if let Ok(parsed) = DateTime::parse_from_str(input, JIRA_TIMESTAMP_FORMAT) {
    return Ok(parsed);
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(input, NAIVE_TIMESTAMP_FORMAT) {
    return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
  }
  if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
    return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).fixed_offset());
  }

  Err("expected ISO 8601, e.g. 2025-05-15T00:00:00+00:00".to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ts(input: &str) -> DateTime<FixedOffset> {
    parse_timestamp(input).unwrap()
  }

  #[test]
  fn test_parse_rfc3339() {
    let parsed = ts("2025-05-15T08:30:00+02:00");
    assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
    assert_eq!(parsed.to_rfc3339(), "2025-05-15T08:30:00+02:00");
  }

  #[test]
  fn test_parse_jira_offset_without_colon() {
    let parsed = ts("2025-05-20T09:30:00.000+0000");
    assert_eq!(parsed, ts("2025-05-20T09:30:00Z"));

    let parsed = ts("2025-05-20T11:30:00.000+0200");
    assert_eq!(parsed, ts("2025-05-20T09:30:00Z"));
  }

  #[test]
  fn test_parse_without_offset_is_utc() {
    assert_eq!(ts("2025-05-20T09:30:00"), ts("2025-05-20T09:30:00+00:00"));
  }

  #[test]
  fn test_parse_date_only_is_midnight_utc() {
    assert_eq!(ts("2025-05-20"), ts("2025-05-20T00:00:00+00:00"));
  }

  #[test]
  fn test_parse_rejects_garbage() {
    assert!(parse_timestamp("").is_err());
    assert!(parse_timestamp("next tuesday").is_err());
    assert!(parse_timestamp("2025-13-45T00:00:00Z").is_err());
  }

  #[test]
  fn test_window_extends_midnight_end_to_end_of_day() {
    let window = ReportWindow::parse("2025-05-15T00:00:00+00:00", "2025-06-28T00:00:00+00:00").unwrap();
    assert_eq!(window.end(), ts("2025-06-28T23:59:59.999999+00:00"));
    assert!(window.contains(&ts("2025-06-28T18:00:00+00:00")));
    assert!(!window.contains(&ts("2025-06-29T00:00:00+00:00")));
  }

  #[test]
  fn test_window_keeps_explicit_end_time() {
    let window = ReportWindow::parse("2025-05-15T00:00:00+00:00", "2025-06-28T23:59:59+00:00").unwrap();
    assert_eq!(window.end(), ts("2025-06-28T23:59:59+00:00"));
    assert_eq!(window.start_date().to_string(), "2025-05-15");
    assert_eq!(window.end_date().to_string(), "2025-06-28");
  }

  #[test]
  fn test_window_bounds_are_inclusive() {
    let window = ReportWindow::parse("2025-05-15T00:00:00+00:00", "2025-05-31T12:00:00+00:00").unwrap();
    assert!(window.contains(&window.start()));
    assert!(window.contains(&window.end()));
    assert!(!window.contains(&ts("2025-05-14T23:59:59+00:00")));
    assert!(!window.contains(&ts("2025-05-31T12:00:01+00:00")));
  }

  #[test]
  fn test_window_compares_across_offsets() {
    let window = ReportWindow::parse("2025-05-15T00:00:00+00:00", "2025-05-15T12:00:00+00:00").unwrap();
    // 01:00 at +02:00 is 23:00 UTC the previous day
    assert!(!window.contains(&ts("2025-05-15T01:00:00+02:00")));
    assert!(window.contains(&ts("2025-05-15T13:00:00+02:00")));
  }

  #[test]
  fn test_window_rejects_inverted_range() {
    let error = ReportWindow::parse("2025-06-01T00:00:00+00:00", "2025-05-01T10:00:00+00:00").unwrap_err();
    assert!(matches!(error, Error::Configuration(_)));
    assert!(error.to_string().contains("after report.end"));
  }

  #[test]
  fn test_window_names_invalid_key() {
    let error = ReportWindow::parse("yesterday", "2025-05-01").unwrap_err();
    assert!(error.to_string().contains("report.start"));
  }
}
