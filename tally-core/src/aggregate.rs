//! # Worklog Aggregation
//!
//! Groups in-window worklog entries by team member and by ticket, and
//! compares the logged time against each ticket's original estimate.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::model::{Author, Issue, WorklogEntry};
use crate::window::ReportWindow;

/// Row ordering used when rendering summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  /// Most logged time first, ties broken by identifier
  #[default]
  Hours,
  /// Ascending identifier (ticket key, account id)
  Key,
}

/// Knobs that change what ends up in an [`Aggregation`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
  /// Keep issues that have no worklog in range, with zero hours
  pub show_all_issues: bool,
}

/// Time logged by one team member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
  pub author: Author,
  pub logged_seconds: i64,
  /// Sum of original estimates of the tickets this user worked on. A ticket
  /// shared by several users counts in full for each of them. `None` when
  /// none of those tickets carries an estimate.
  pub estimated_seconds: Option<i64>,
  /// Logged seconds per ticket key
  pub tickets: BTreeMap<String, i64>,
}

impl UserSummary {
  fn new(author: Author) -> Self {
    Self {
      author,
      logged_seconds: 0,
      estimated_seconds: None,
      tickets: BTreeMap::new(),
    }
  }

  /// Logged minus estimated, positive when over
  pub fn variance_seconds(&self) -> Option<i64> {
    self.estimated_seconds.map(|estimate| self.logged_seconds - estimate)
  }

  /// This user's tickets, most logged first
  pub fn tickets_by_hours(&self) -> Vec<(&str, i64)> {
    let mut tickets: Vec<(&str, i64)> = self.tickets.iter().map(|(key, secs)| (key.as_str(), *secs)).collect();
    tickets.sort_by_key(|(key, secs)| (Reverse(*secs), *key));
    tickets
  }
}

/// Time logged against one ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSummary {
  pub key: String,
  pub summary: String,
  pub original_estimate_seconds: Option<i64>,
  pub logged_seconds: i64,
  /// Logged seconds per account id
  pub contributors: BTreeMap<String, i64>,
}

impl TicketSummary {
  fn from_issue(issue: &Issue) -> Self {
    Self {
      key: issue.key.clone(),
      summary: issue.summary.clone(),
      original_estimate_seconds: issue.original_estimate_seconds,
      logged_seconds: 0,
      contributors: BTreeMap::new(),
    }
  }

  /// Logged minus original estimate, positive when over
  pub fn variance_seconds(&self) -> Option<i64> {
    self
      .original_estimate_seconds
      .map(|estimate| self.logged_seconds - estimate)
  }

  /// Contributors to this ticket, most logged first
  pub fn contributors_by_hours(&self) -> Vec<(&str, i64)> {
    let mut contributors: Vec<(&str, i64)> = self
      .contributors
      .iter()
      .map(|(account_id, secs)| (account_id.as_str(), *secs))
      .collect();
    contributors.sort_by_key(|(account_id, secs)| (Reverse(*secs), *account_id));
    contributors
  }
}

/// Totals across every ticket in an aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
  pub logged_seconds: i64,
  /// Sum of estimates over tickets that have one
  pub estimated_seconds: i64,
  pub tickets: usize,
  pub tickets_with_estimates: usize,
}

/// Result of grouping worklog entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
  pub users: BTreeMap<String, UserSummary>,
  pub tickets: BTreeMap<String, TicketSummary>,
}

impl Aggregation {
  /// Users in rendering order
  pub fn users_sorted(&self, order: SortOrder) -> Vec<&UserSummary> {
    let mut users: Vec<&UserSummary> = self.users.values().collect();
    match order {
      SortOrder::Hours => users.sort_by(|a, b| {
        b.logged_seconds
          .cmp(&a.logged_seconds)
          .then_with(|| a.author.account_id.cmp(&b.author.account_id))
      }),
      SortOrder::Key => users.sort_by(|a, b| a.author.account_id.cmp(&b.author.account_id)),
    }
    users
  }

  /// Tickets in rendering order
  pub fn tickets_sorted(&self, order: SortOrder) -> Vec<&TicketSummary> {
    let mut tickets: Vec<&TicketSummary> = self.tickets.values().collect();
    match order {
      SortOrder::Hours => tickets.sort_by(|a, b| {
        b.logged_seconds
          .cmp(&a.logged_seconds)
          .then_with(|| a.key.cmp(&b.key))
      }),
      SortOrder::Key => tickets.sort_by(|a, b| a.key.cmp(&b.key)),
    }
    tickets
  }

  /// Display name for an account id, falling back to the id itself
  pub fn display_name<'a>(&'a self, account_id: &'a str) -> &'a str {
    self
      .users
      .get(account_id)
      .map(|user| user.author.display_name.as_str())
      .unwrap_or(account_id)
  }

  pub fn totals(&self) -> Totals {
    self.tickets.values().fold(Totals::default(), |mut totals, ticket| {
      totals.logged_seconds += ticket.logged_seconds;
      totals.tickets += 1;
      if let Some(estimate) = ticket.original_estimate_seconds {
        totals.estimated_seconds += estimate;
        totals.tickets_with_estimates += 1;
      }
      totals
    })
  }

  /// Sum of every user's estimate, counting shared tickets once per user
  pub fn total_user_estimate_seconds(&self) -> Option<i64> {
    self
      .users
      .values()
      .filter_map(|user| user.estimated_seconds)
      .reduce(|acc, estimate| acc + estimate)
  }

  pub fn total_user_logged_seconds(&self) -> i64 {
    self.users.values().map(|user| user.logged_seconds).sum()
  }
}

/// Group worklog entries by user and by ticket.
///
/// Entries whose `started` timestamp falls outside the window are ignored.
/// Every remaining entry must belong to one of `issues`.
pub fn aggregate(
  issues: &[Issue],
  worklogs: &[WorklogEntry],
  window: &ReportWindow,
  options: &AggregateOptions,
) -> Result<Aggregation> {
  let issue_lookup: HashMap<&str, &Issue> = issues.iter().map(|issue| (issue.key.as_str(), issue)).collect();

  let mut aggregation = Aggregation::default();

  if options.show_all_issues {
    for issue in issues {
      aggregation
        .tickets
        .entry(issue.key.clone())
        .or_insert_with(|| TicketSummary::from_issue(issue));
    }
  }

  for entry in worklogs {
    if !window.contains(&entry.started) {
      trace!("Skipping worklog on {} started at {}", entry.issue_key, entry.started);
      continue;
    }

    let issue = issue_lookup.get(entry.issue_key.as_str()).ok_or_else(|| {
      Error::data_format(
        "worklog aggregation",
        format!("worklog references unknown issue {}", entry.issue_key),
      )
    })?;

    if entry.time_spent_seconds < 0 {
      warn!(
        "Worklog on {} by {} has negative time spent ({}s)",
        entry.issue_key, entry.author.display_name, entry.time_spent_seconds
      );
    }

    let seconds = entry.time_spent_seconds;
    let account_id = &entry.author.account_id;

    let ticket = aggregation
      .tickets
      .entry(issue.key.clone())
      .or_insert_with(|| TicketSummary::from_issue(issue));
    ticket.logged_seconds += seconds;
    *ticket.contributors.entry(account_id.clone()).or_insert(0) += seconds;

    let user = aggregation
      .users
      .entry(account_id.clone())
      .or_insert_with(|| UserSummary::new(entry.author.clone()));
    user.logged_seconds += seconds;
    *user.tickets.entry(issue.key.clone()).or_insert(0) += seconds;
  }

  for user in aggregation.users.values_mut() {
    user.estimated_seconds = user
      .tickets
      .keys()
      .filter_map(|key| issue_lookup.get(key.as_str()))
      .filter_map(|issue| issue.original_estimate_seconds)
      .reduce(|acc, estimate| acc + estimate);
  }

  debug!(
    "Aggregated {} users across {} tickets",
    aggregation.users.len(),
    aggregation.tickets.len()
  );

  Ok(aggregation)
}
