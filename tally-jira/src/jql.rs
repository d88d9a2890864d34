//! JQL construction for worklog searches

use chrono::{Days, NaiveDate};
use tally_core::ReportWindow;

const JQL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Build the JQL selecting issues with worklogs inside `window`.
///
/// An empty project list searches every project. The date bounds are padded
/// by a day on each side because Jira evaluates `worklogDate` in the server
/// time zone; entries are filtered exactly against the window afterwards.
pub fn build_jql(projects: &[String], window: &ReportWindow) -> String {
  let start = pad(window.start_date(), NaiveDate::checked_sub_days);
  let end = pad(window.end_date(), NaiveDate::checked_add_days);

  let dates = format!(
    "worklogDate >= '{}' AND worklogDate <= '{}'",
    start.format(JQL_DATE_FORMAT),
    end.format(JQL_DATE_FORMAT)
  );

  match projects {
    [] => dates,
    [project] => format!("project = {project} AND ({dates})"),
    _ => format!("project in ({}) AND ({dates})", projects.join(", ")),
  }
}

fn pad(date: NaiveDate, step: fn(NaiveDate, Days) -> Option<NaiveDate>) -> NaiveDate {
  step(date, Days::new(1)).unwrap_or(date)
}
