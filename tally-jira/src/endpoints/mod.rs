//! # Jira API Endpoints
//!
//! Read-only endpoint implementations used by the report: JQL issue search
//! and per-issue worklog listing.

pub mod search;
pub mod worklogs;
