use serde::{Deserialize, Serialize};
use tally_core::{Author, Error, Issue, Result, WorklogEntry, parse_timestamp};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Body of `POST /rest/api/3/search/jql`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
  pub jql: &'a str,
  pub fields: &'a [&'a str],
  pub max_results: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_page_token: Option<&'a str>,
}

/// One page of issue search results
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
  pub issues: Vec<JiraIssue>,
  #[serde(default)]
  pub next_page_token: Option<String>,
  #[serde(default)]
  pub is_last: Option<bool>,
}

impl SearchResponse {
  /// Token for the following page, if there is one
  pub fn next_page(&self) -> Option<&str> {
    if self.issues.is_empty() || self.is_last == Some(true) {
      return None;
    }
    self.next_page_token.as_deref()
  }
}

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  pub key: String,
  pub fields: JiraIssueFields,
}

/// The issue fields requested by the search
#[derive(Debug, Deserialize)]
pub struct JiraIssueFields {
  pub summary: String,
  pub project: JiraProject,
  /// Seconds; `null` when no estimate was ever set
  pub timeoriginalestimate: Option<i64>,
}

/// Project reference embedded in issue fields
#[derive(Debug, Deserialize)]
pub struct JiraProject {
  pub key: String,
}

impl From<JiraIssue> for Issue {
  fn from(issue: JiraIssue) -> Self {
    Self {
      key: issue.key,
      summary: issue.fields.summary,
      project_key: issue.fields.project.key,
      original_estimate_seconds: issue.fields.timeoriginalestimate,
    }
  }
}

/// One page of an issue's worklogs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogPage {
  pub start_at: usize,
  pub total: usize,
  pub worklogs: Vec<JiraWorklog>,
}

/// A worklog as returned by Jira
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraWorklog {
  pub author: JiraUser,
  pub started: String,
  pub time_spent_seconds: i64,
}

/// Represents a Jira user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  pub account_id: String,
  /// Hidden by some privacy settings
  pub display_name: Option<String>,
}

impl JiraWorklog {
  /// Validate into a domain entry for `issue_key`. `endpoint` names the
  /// request in error messages.
  pub fn into_entry(self, issue_key: &str, endpoint: &str) -> Result<WorklogEntry> {
    let started = parse_timestamp(&self.started)
      .map_err(|message| Error::data_format(endpoint, format!("invalid worklog start '{}': {message}", self.started)))?;

    let display_name = self
      .author
      .display_name
      .filter(|name| !name.trim().is_empty())
      .unwrap_or_else(|| self.author.account_id.clone());

    Ok(WorklogEntry {
      issue_key: issue_key.to_string(),
      author: Author {
        account_id: self.author.account_id,
        display_name,
      },
      time_spent_seconds: self.time_spent_seconds,
      started,
    })
  }
}
