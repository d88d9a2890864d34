//! Constants for the tally-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("tally/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Issues requested per search page
pub const SEARCH_PAGE_SIZE: usize = 100;

/// Worklogs requested per page
pub const WORKLOG_PAGE_SIZE: usize = 1000;

/// Issue fields the report needs
pub const SEARCH_FIELDS: &[&str] = &["summary", "project", "timeoriginalestimate"];
