//! # Jira Issue Search
//!
//! `POST /rest/api/3/search/jql` with token-based pagination.

use tally_core::{Issue, Result};
use tracing::debug;

use crate::client::JiraClient;
use crate::consts::{SEARCH_FIELDS, SEARCH_PAGE_SIZE};
use crate::models::{SearchRequest, SearchResponse};

impl JiraClient {
  /// Run `jql` and collect every matching issue across all pages
  pub async fn search_issues(&self, jql: &str) -> Result<Vec<Issue>> {
    let url = format!("{}/rest/api/3/search/jql", self.base_url);
    let mut issues = Vec::new();
    let mut next_page_token: Option<String> = None;

    loop {
      let body = SearchRequest {
        jql,
        fields: SEARCH_FIELDS,
        max_results: SEARCH_PAGE_SIZE,
        next_page_token: next_page_token.as_deref(),
      };

      let page: SearchResponse = self.send_json(self.client.post(&url).json(&body), &url).await?;
      debug!("Search page returned {} issues", page.issues.len());

      next_page_token = page.next_page().map(str::to_string);
      issues.extend(page.issues.into_iter().map(Issue::from));

      if next_page_token.is_none() {
        break;
      }
    }

    Ok(issues)
  }
}
