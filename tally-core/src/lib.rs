//! # Tally Core Library
//!
//! Configuration loading, the worklog domain model, aggregation of logged
//! hours by team member and ticket, and rendering of the plain-text report.
//! The Jira client and the CLI both build on the types defined here.

pub mod aggregate;
pub mod config;
pub mod creds;
pub mod error;
pub mod export;
pub mod model;
pub mod output;
pub mod report;
pub mod text;
pub mod url;
pub mod window;

// Re-export main types for the client and CLI crates
pub use aggregate::{AggregateOptions, Aggregation, SortOrder, TicketSummary, UserSummary, aggregate};
pub use config::{Config, Environment, JiraSettings, OutputSettings, ProcessEnv, ReportSettings};
pub use error::{Error, Result};
pub use export::{report_filename, save_report};
pub use model::{Author, Issue, WorklogEntry};
pub use report::{ReportContext, render_report};
pub use window::{ReportWindow, parse_timestamp};
