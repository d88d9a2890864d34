//! Base URL normalisation for the configured Jira host.

use url::{Position, Url};

use crate::error::{Error, Result};

/// Normalise a Jira base URL.
///
/// A missing scheme defaults to `https://`. Trailing slashes are dropped so
/// endpoint paths can be appended with `format!("{base}/rest/...")`.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(Error::configuration("jira.url cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url =
    Url::parse(&candidate).map_err(|e| Error::configuration(format!("Invalid jira.url '{input}': {e}")))?;
  if url.host().is_none() {
    return Err(Error::configuration(format!("Invalid jira.url '{input}': missing host")));
  }

  let mut result = url[..Position::BeforePath].to_string();
  result.push_str(url.path().trim_end_matches('/'));
  Ok(result)
}

/// Host part of a URL, used as the `.netrc` machine name
pub fn host_of(base_url: &str) -> Option<String> {
  Url::parse(base_url)
    .ok()
    .and_then(|url| url.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_url_scheme_with_https() {
    assert_eq!(
      ensure_url_scheme("https://company.atlassian.net").unwrap(),
      "https://company.atlassian.net"
    );
  }

  #[test]
  fn test_ensure_url_scheme_without_scheme() {
    assert_eq!(
      ensure_url_scheme("company.atlassian.net").unwrap(),
      "https://company.atlassian.net"
    );
  }

  #[test]
  fn test_ensure_url_scheme_strips_trailing_slash() {
    assert_eq!(
      ensure_url_scheme("https://company.atlassian.net/").unwrap(),
      "https://company.atlassian.net"
    );
    assert_eq!(
      ensure_url_scheme("https://jira.example.com/jira/").unwrap(),
      "https://jira.example.com/jira"
    );
  }

  #[test]
  fn test_ensure_url_scheme_keeps_http_and_port() {
    assert_eq!(
      ensure_url_scheme("http://localhost:8080").unwrap(),
      "http://localhost:8080"
    );
  }

  #[test]
  fn test_ensure_url_scheme_case_insensitive_scheme() {
    assert_eq!(ensure_url_scheme("HTTPS://example.com").unwrap(), "https://example.com");
  }

  #[test]
  fn test_ensure_url_scheme_empty_string() {
    let error = ensure_url_scheme("   ").unwrap_err();
    assert!(error.to_string().contains("jira.url"));
  }

  #[test]
  fn test_host_of() {
    assert_eq!(
      host_of("https://company.atlassian.net").as_deref(),
      Some("company.atlassian.net")
    );
    assert_eq!(host_of("http://localhost:8080").as_deref(), Some("localhost"));
    assert_eq!(host_of("not a url"), None);
  }
}
