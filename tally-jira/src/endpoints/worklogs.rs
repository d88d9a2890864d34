//! # Jira Worklog Endpoints
//!
//! `GET /rest/api/3/issue/{key}/worklog`, paged with `startAt`/`total`.

use tally_core::{Result, WorklogEntry};
use tracing::debug;

use crate::client::JiraClient;
use crate::consts::WORKLOG_PAGE_SIZE;
use crate::models::WorklogPage;

impl JiraClient {
  /// Get every worklog recorded on `issue_key`
  pub async fn get_worklogs(&self, issue_key: &str) -> Result<Vec<WorklogEntry>> {
    let url = format!("{}/rest/api/3/issue/{}/worklog", self.base_url, issue_key);
    let mut entries = Vec::new();
    let mut start_at = 0;

    loop {
      let request = self.client.get(&url).query(&[
        ("startAt", start_at.to_string()),
        ("maxResults", WORKLOG_PAGE_SIZE.to_string()),
      ]);
      let page: WorklogPage = self.send_json(request, &url).await?;
      let received = page.worklogs.len();

      for worklog in page.worklogs {
        entries.push(worklog.into_entry(issue_key, &url)?);
      }

      start_at = page.start_at + received;
      if received == 0 || start_at >= page.total {
        break;
      }
      debug!("Fetching more worklogs for {} from {}", issue_key, start_at);
    }

    Ok(entries)
  }
}
