//! Sequential retrieval of issues and their worklogs for a report window

use std::collections::HashSet;

use tally_core::{Issue, ReportWindow, Result, WorklogEntry};
use tracing::{debug, info};

use crate::client::JiraClient;
use crate::jql::build_jql;

/// Issues matched by the search plus their worklogs inside the window
#[derive(Debug, Default)]
pub struct WorklogData {
  pub issues: Vec<Issue>,
  pub worklogs: Vec<WorklogEntry>,
}

impl JiraClient {
  /// Search the configured projects and collect every worklog inside
  /// `window`.
  ///
  /// Issues are fetched one after another; `on_progress` receives the number
  /// of issues processed so far and the total after each one. The first
  /// failing request aborts the whole fetch.
  pub async fn fetch_worklogs_in_window(
    &self,
    projects: &[String],
    window: &ReportWindow,
    mut on_progress: impl FnMut(usize, usize),
  ) -> Result<WorklogData> {
    let jql = build_jql(projects, window);
    info!("Searching issues: {}", jql);

    let mut seen = HashSet::new();
    let issues: Vec<Issue> = self
      .search_issues(&jql)
      .await?
      .into_iter()
      .filter(|issue| seen.insert(issue.key.clone()))
      .collect();
    info!("Found {} issues with worklogs in range", issues.len());

    let total = issues.len();
    let mut worklogs = Vec::new();
    for (index, issue) in issues.iter().enumerate() {
      let entries = self.get_worklogs(&issue.key).await?;
      let before = worklogs.len();
      worklogs.extend(entries.into_iter().filter(|entry| window.contains(&entry.started)));
      debug!("{}: {} worklogs in window", issue.key, worklogs.len() - before);
      on_progress(index + 1, total);
    }

    Ok(WorklogData { issues, worklogs })
  }
}
