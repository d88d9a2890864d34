//! # Jira Worklog Client
//!
//! Read-only Jira Cloud REST integration for reporting: JQL issue search,
//! per-issue worklog retrieval, and a sequential fetch pipeline that returns
//! validated [`tally_core::Issue`] and [`tally_core::WorklogEntry`] records.

mod client;
mod consts;
mod endpoints;
mod fetch;
pub mod jql;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
pub use fetch::WorklogData;
pub use jql::build_jql;
// Re-export models
pub use models::JiraAuth;
