//! # Report Rendering
//!
//! Turns an [`Aggregation`] into the plain-text report: a header, actuals vs
//! estimates per team member and per ticket, and the two cross breakdowns.
//! Output depends only on the inputs, including the generation timestamp,
//! so identical runs produce identical text.

use chrono::{DateTime, FixedOffset};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::aggregate::{Aggregation, SortOrder};
use crate::model::seconds_to_hours;
use crate::text::truncate_string;
use crate::window::ReportWindow;

const HOURS_PER_DAY: f64 = 8.0;
const SUMMARY_WIDTH: usize = 35;
const BREAKDOWN_SUMMARY_WIDTH: usize = 30;
const RULE_WIDTH: usize = 80;

/// Everything besides the aggregation that shows up in the report
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
  pub window: &'a ReportWindow,
  pub projects: &'a [String],
  pub sort: SortOrder,
  pub generated_at: DateTime<FixedOffset>,
}

#[derive(Tabled)]
struct MemberRow {
  #[tabled(rename = "Team Member")]
  name: String,
  #[tabled(rename = "Est Hours")]
  estimated: String,
  #[tabled(rename = "Act Hours")]
  actual: String,
  #[tabled(rename = "Variance")]
  variance: String,
  #[tabled(rename = "Tickets")]
  tickets: String,
}

#[derive(Tabled)]
struct TicketRow {
  #[tabled(rename = "Ticket")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Original Est")]
  estimate: String,
  #[tabled(rename = "Actual")]
  actual: String,
  #[tabled(rename = "Variance")]
  variance: String,
}

#[derive(Tabled)]
struct MemberTicketRow {
  #[tabled(rename = "Ticket")]
  key: String,
  #[tabled(rename = "Estimated")]
  estimate: String,
  #[tabled(rename = "Actual")]
  actual: String,
  #[tabled(rename = "Summary")]
  summary: String,
}

#[derive(Tabled)]
struct ContributorRow {
  #[tabled(rename = "Team Member")]
  name: String,
  #[tabled(rename = "Hours")]
  hours: String,
  #[tabled(rename = "Percentage")]
  percentage: String,
}

/// Render hours, appending working days once a full day is reached.
///
/// `0h`, `2.5h`, `16.0h (2.0d)`
pub fn format_hours(seconds: i64) -> String {
  if seconds == 0 {
    return "0h".to_string();
  }

  let hours = seconds_to_hours(seconds);
  let days = hours / HOURS_PER_DAY;
  if days >= 1.0 {
    format!("{hours:.1}h ({days:.1}d)")
  } else {
    format!("{hours:.1}h")
  }
}

/// Render a signed variance, or `N/A` when there is no estimate to compare
/// against.
pub fn format_variance(variance_seconds: Option<i64>) -> String {
  match variance_seconds {
    Some(seconds) => format!("{:+.1}h", seconds_to_hours(seconds)),
    None => "N/A".to_string(),
  }
}

/// Render an optional estimate; absent estimates show as `-`
fn format_estimate(estimate_seconds: Option<i64>) -> String {
  estimate_seconds.map_or_else(|| "-".to_string(), format_hours)
}

/// `(1 - |actual - estimated| / estimated) * 100`, only defined when
/// something was estimated.
pub fn estimation_accuracy(actual_seconds: i64, estimated_seconds: i64) -> Option<f64> {
  (estimated_seconds > 0).then(|| {
    let actual = actual_seconds as f64;
    let estimated = estimated_seconds as f64;
    (1.0 - (actual - estimated).abs() / estimated) * 100.0
  })
}

fn banner(lines: &mut Vec<String>, title: &str) {
  lines.push(String::new());
  lines.push("=".repeat(RULE_WIDTH));
  lines.push(title.to_string());
  lines.push("=".repeat(RULE_WIDTH));
}

/// Summary text on one line, cut to `width` characters
fn summary_cell(summary: &str, width: usize) -> String {
  let single_line = summary.split_whitespace().collect::<Vec<_>>().join(" ");
  truncate_string(&single_line, width)
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
  Table::new(rows).with(Style::sharp()).to_string()
}

/// Render the complete report text.
pub fn render_report(aggregation: &Aggregation, context: &ReportContext<'_>) -> String {
  let mut lines = Vec::new();

  render_header(&mut lines, context);
  render_members(&mut lines, aggregation, context.sort);
  render_tickets(&mut lines, aggregation, context.sort);
  render_member_breakdown(&mut lines, aggregation, context.sort);
  render_ticket_breakdown(&mut lines, aggregation, context.sort);

  let mut report = lines.join("\n");
  report.push('\n');
  report
}

fn render_header(lines: &mut Vec<String>, context: &ReportContext<'_>) {
  lines.push("JIRA TIME REPORT - ACTUALS vs ESTIMATES".to_string());
  lines.push("=".repeat(RULE_WIDTH));
  lines.push(format!(
    "Period: {} to {}",
    context.window.start_date(),
    context.window.end_date()
  ));
  let projects = if context.projects.is_empty() {
    "All projects".to_string()
  } else {
    context.projects.join(", ")
  };
  lines.push(format!("Projects: {projects}"));
  lines.push(format!(
    "Generated: {}",
    context.generated_at.format("%Y-%m-%d %H:%M:%S %:z")
  ));
}

fn render_members(lines: &mut Vec<String>, aggregation: &Aggregation, sort: SortOrder) {
  banner(lines, "ACTUALS vs ESTIMATES BY TEAM MEMBER");

  let mut rows: Vec<MemberRow> = aggregation
    .users_sorted(sort)
    .into_iter()
    .map(|user| MemberRow {
      name: user.author.display_name.clone(),
      estimated: format_estimate(user.estimated_seconds),
      actual: format_hours(user.logged_seconds),
      variance: format_variance(user.variance_seconds()),
      tickets: user.tickets.len().to_string(),
    })
    .collect();

  let total_logged = aggregation.total_user_logged_seconds();
  let total_estimated = aggregation.total_user_estimate_seconds();
  rows.push(MemberRow {
    name: "TOTAL".to_string(),
    estimated: format_estimate(total_estimated),
    actual: format_hours(total_logged),
    variance: format_variance(total_estimated.map(|estimate| total_logged - estimate)),
    tickets: aggregation
      .tickets
      .values()
      .filter(|ticket| !ticket.contributors.is_empty())
      .count()
      .to_string(),
  });
  lines.push(table(rows));

  let members = aggregation.users.len();
  lines.push(String::new());
  lines.push(format!("Team Members: {members}"));
  let average = |total: i64| {
    if members == 0 {
      "0h".to_string()
    } else {
      format_hours(total / members as i64)
    }
  };
  lines.push(format!(
    "Average Estimated Hours per Person: {}",
    average(total_estimated.unwrap_or(0))
  ));
  lines.push(format!("Average Actual Hours per Person: {}", average(total_logged)));

  if let Some(accuracy) = total_estimated.and_then(|estimate| estimation_accuracy(total_logged, estimate)) {
    lines.push(format!("Overall Estimation Accuracy: {accuracy:.1}%"));
  }
}

fn render_tickets(lines: &mut Vec<String>, aggregation: &Aggregation, sort: SortOrder) {
  banner(lines, "ACTUALS vs ESTIMATES BY TICKET");

  let mut rows: Vec<TicketRow> = aggregation
    .tickets_sorted(sort)
    .into_iter()
    .map(|ticket| TicketRow {
      key: ticket.key.clone(),
      summary: summary_cell(&ticket.summary, SUMMARY_WIDTH),
      estimate: format_estimate(ticket.original_estimate_seconds),
      actual: format_hours(ticket.logged_seconds),
      variance: format_variance(ticket.variance_seconds()),
    })
    .collect();

  let totals = aggregation.totals();
  let estimated = (totals.tickets_with_estimates > 0).then_some(totals.estimated_seconds);
  rows.push(TicketRow {
    key: "TOTALS".to_string(),
    summary: String::new(),
    estimate: format_estimate(estimated),
    actual: format_hours(totals.logged_seconds),
    variance: format_variance(estimated.map(|estimate| totals.logged_seconds - estimate)),
  });
  lines.push(table(rows));

  if let Some(accuracy) = estimation_accuracy(totals.logged_seconds, totals.estimated_seconds) {
    lines.push(String::new());
    lines.push(format!("Estimation Accuracy: {accuracy:.1}%"));
    lines.push(format!(
      "Tickets with Estimates: {}/{}",
      totals.tickets_with_estimates, totals.tickets
    ));
  }
}

fn render_member_breakdown(lines: &mut Vec<String>, aggregation: &Aggregation, sort: SortOrder) {
  banner(lines, "BREAKDOWN OF ACTUALS BY TEAM MEMBER ACROSS STORIES");

  if aggregation.users.is_empty() {
    lines.push("No worklogs in this period.".to_string());
    return;
  }

  for user in aggregation.users_sorted(sort) {
    lines.push(String::new());
    lines.push(format!(
      "{} - Estimated: {} | Actual: {}",
      user.author.display_name,
      format_estimate(user.estimated_seconds),
      format_hours(user.logged_seconds)
    ));

    let rows: Vec<MemberTicketRow> = user
      .tickets_by_hours()
      .into_iter()
      .map(|(key, seconds)| {
        let ticket = aggregation.tickets.get(key);
        MemberTicketRow {
          key: key.to_string(),
          estimate: format_estimate(ticket.and_then(|ticket| ticket.original_estimate_seconds)),
          actual: format_hours(seconds),
          summary: ticket
            .map(|ticket| summary_cell(&ticket.summary, BREAKDOWN_SUMMARY_WIDTH))
            .unwrap_or_default(),
        }
      })
      .collect();
    lines.push(table(rows));
  }
}

fn render_ticket_breakdown(lines: &mut Vec<String>, aggregation: &Aggregation, sort: SortOrder) {
  banner(lines, "BREAKDOWN OF ACTUALS BY TICKET ACROSS TEAM MEMBERS");

  let tickets: Vec<_> = aggregation
    .tickets_sorted(sort)
    .into_iter()
    .filter(|ticket| ticket.logged_seconds != 0)
    .collect();

  if tickets.is_empty() {
    lines.push("No worklogs in this period.".to_string());
    return;
  }

  for ticket in tickets {
    lines.push(String::new());
    lines.push(format!(
      "{} - Estimated: {} | Actual: {}",
      ticket.key,
      format_estimate(ticket.original_estimate_seconds),
      format_hours(ticket.logged_seconds)
    ));
    lines.push(format!("Summary: {}", ticket.summary));

    let rows: Vec<ContributorRow> = ticket
      .contributors_by_hours()
      .into_iter()
      .map(|(account_id, seconds)| ContributorRow {
        name: aggregation.display_name(account_id).to_string(),
        hours: format_hours(seconds),
        percentage: format!("{:.1}%", seconds as f64 / ticket.logged_seconds as f64 * 100.0),
      })
      .collect();
    lines.push(table(rows));
  }
}
