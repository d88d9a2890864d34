//! Jira Cloud REST payloads for mock servers
//!
//! Shapes follow `POST /rest/api/3/search/jql` and
//! `GET /rest/api/3/issue/{key}/worklog`, including a few of the extra
//! fields real responses carry.

use serde_json::{Value, json};

/// One issue as returned by the search endpoint
pub fn issue(key: &str, summary: &str, original_estimate_seconds: Option<i64>) -> Value {
  let project = key.split('-').next().unwrap_or(key);
  json!({
    "expand": "operations,versionedRepresentations,editmeta,changelog,renderedFields",
    "id": format!("1{}", key.len()),
    "self": format!("https://example.atlassian.net/rest/api/3/issue/{key}"),
    "key": key,
    "fields": {
      "summary": summary,
      "project": { "id": "10000", "key": project, "name": format!("{project} project") },
      "timeoriginalestimate": original_estimate_seconds,
    }
  })
}

/// A page of search results; `None` marks the last page
pub fn search_page(issues: Vec<Value>, next_page_token: Option<&str>) -> Value {
  match next_page_token {
    Some(token) => json!({
      "issues": issues,
      "nextPageToken": token,
      "isLast": false,
    }),
    None => json!({
      "issues": issues,
      "isLast": true,
    }),
  }
}

/// One worklog entry; `started` uses Jira's `+0000` offset style
pub fn worklog(account_id: &str, display_name: &str, time_spent_seconds: i64, started: &str) -> Value {
  json!({
    "self": "https://example.atlassian.net/rest/api/3/issue/10010/worklog/10000",
    "author": {
      "accountId": account_id,
      "displayName": display_name,
      "active": true,
      "timeZone": "Europe/London",
    },
    "created": started,
    "updated": started,
    "started": started,
    "timeSpent": format!("{}m", time_spent_seconds / 60),
    "timeSpentSeconds": time_spent_seconds,
    "id": "100028",
    "issueId": "10002",
  })
}

/// A page of worklogs
pub fn worklog_page(worklogs: Vec<Value>, start_at: usize, total: usize) -> Value {
  json!({
    "startAt": start_at,
    "maxResults": 1048576,
    "total": total,
    "worklogs": worklogs,
  })
}

/// Error body Jira sends with 4xx responses
pub fn error_body(message: &str) -> Value {
  json!({
    "errorMessages": [message],
    "errors": {},
  })
}
