//! # Configuration Management
//!
//! Loads the report configuration from a TOML file, applies environment
//! overrides and the `.netrc` credential fallback, and validates everything
//! into an immutable [`Config`] that is passed by reference to the client,
//! the aggregator and the report formatter.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::aggregate::{AggregateOptions, SortOrder};
use crate::creds::netrc_credentials;
use crate::error::{Error, Result};
use crate::url::{ensure_url_scheme, host_of};
use crate::window::ReportWindow;

/// Environment variable pointing at the configuration file
pub const ENV_CONFIG_PATH: &str = "TALLY_CONFIG";
/// Environment variable overriding `jira.url`
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";
/// Environment variable overriding `jira.email`
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";
/// Environment variable overriding `jira.api_token`
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// File name looked up in the working directory and the config directory
pub const CONFIG_FILE_NAME: &str = "tally.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REPORT_DIR: &str = "reports";

static PROJECT_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]+$").expect("Failed to compile project key regex"));

/// Source of environment values and the home directory.
///
/// Abstracted so configuration loading can be tested without touching the
/// process environment.
pub trait Environment {
  /// Value of an environment variable; empty values count as unset
  fn var(&self, key: &str) -> Option<String>;

  /// The user's home directory, where `.netrc` lives
  fn home_dir(&self) -> Option<PathBuf>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
  fn var(&self, key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
  }

  fn home_dir(&self) -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
  }
}

/// Raw file layout; every field optional so missing keys can be reported
/// together.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  #[serde(default)]
  jira: JiraSection,
  #[serde(default)]
  report: ReportSection,
  #[serde(default)]
  output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JiraSection {
  url: Option<String>,
  email: Option<String>,
  api_token: Option<String>,
  timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportSection {
  start: Option<String>,
  end: Option<String>,
  #[serde(default)]
  projects: Vec<String>,
  #[serde(default)]
  show_all_issues: bool,
  #[serde(default)]
  sort: SortOrder,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
  save_to_file: Option<bool>,
  directory: Option<PathBuf>,
}

/// Connection settings for the Jira client
#[derive(Clone)]
pub struct JiraSettings {
  /// Normalised base URL without trailing slash
  pub base_url: String,
  pub email: String,
  pub api_token: String,
  pub timeout: Duration,
}

impl std::fmt::Debug for JiraSettings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraSettings")
      .field("base_url", &self.base_url)
      .field("email", &self.email)
      .field("api_token", &"***")
      .field("timeout", &self.timeout)
      .finish()
  }
}

/// What the report covers and how rows are arranged
#[derive(Debug, Clone)]
pub struct ReportSettings {
  pub window: ReportWindow,
  /// Upper-cased project keys; empty means all projects
  pub projects: Vec<String>,
  pub show_all_issues: bool,
  pub sort: SortOrder,
}

impl ReportSettings {
  pub const fn aggregate_options(&self) -> AggregateOptions {
    AggregateOptions {
      show_all_issues: self.show_all_issues,
    }
  }
}

/// Where the report file goes
#[derive(Debug, Clone)]
pub struct OutputSettings {
  pub save_to_file: bool,
  pub directory: PathBuf,
}

/// Fully validated configuration for one report run
#[derive(Debug, Clone)]
pub struct Config {
  pub jira: JiraSettings,
  pub report: ReportSettings,
  pub output: OutputSettings,
}

impl Config {
  /// Locate, read and validate the configuration.
  pub fn load(explicit_path: Option<&Path>, env: &impl Environment) -> Result<Self> {
    let path = resolve_config_path(explicit_path, env)?;
    debug!("Loading configuration from {}", path.display());

    let content = fs::read_to_string(&path)
      .map_err(|e| Error::configuration(format!("Failed to read {}: {e}", path.display())))?;

    Self::from_toml_str(&content, env)
      .map_err(|e| match e {
        Error::Configuration(message) => Error::configuration(format!("{message} (in {})", path.display())),
        other => other,
      })
  }

  /// Validate configuration from TOML text.
  pub fn from_toml_str(content: &str, env: &impl Environment) -> Result<Self> {
    let file: ConfigFile =
      toml::from_str(content).map_err(|e| Error::configuration(format!("Invalid TOML: {e}")))?;

    let url = env.var(ENV_JIRA_HOST).or(non_empty(file.jira.url));
    let mut email = env.var(ENV_JIRA_EMAIL).or(non_empty(file.jira.email));
    let mut api_token = env.var(ENV_JIRA_API_TOKEN).or(non_empty(file.jira.api_token));

    let base_url = url.as_deref().map(ensure_url_scheme).transpose()?;

    if (email.is_none() || api_token.is_none())
      && let (Some(base_url), Some(home)) = (&base_url, env.home_dir())
      && let Some(host) = host_of(base_url)
      && let Some(creds) = netrc_credentials(&home, &host)?
    {
      email = email.or(Some(creds.username));
      api_token = api_token.or(Some(creds.password));
    }

    let start = non_empty(file.report.start);
    let end = non_empty(file.report.end);

    let missing: Vec<&str> = [
      ("jira.url", base_url.is_none()),
      ("jira.email", email.is_none()),
      ("jira.api_token", api_token.is_none()),
      ("report.start", start.is_none()),
      ("report.end", end.is_none()),
    ]
    .into_iter()
    .filter_map(|(key, is_missing)| is_missing.then_some(key))
    .collect();

    let (Some(base_url), Some(email), Some(api_token), Some(start), Some(end)) =
      (base_url, email, api_token, start, end)
    else {
      return Err(Error::configuration(format!(
        "Missing required configuration keys: {}",
        missing.join(", ")
      )));
    };

    let window = ReportWindow::parse(&start, &end)?;
    let projects = normalize_project_keys(&file.report.projects)?;

    let timeout_secs = file.jira.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
      return Err(Error::configuration("jira.timeout_secs must be greater than zero"));
    }

    Ok(Self {
      jira: JiraSettings {
        base_url,
        email,
        api_token,
        timeout: Duration::from_secs(timeout_secs),
      },
      report: ReportSettings {
        window,
        projects,
        show_all_issues: file.report.show_all_issues,
        sort: file.report.sort,
      },
      output: OutputSettings {
        save_to_file: file.output.save_to_file.unwrap_or(true),
        directory: file
          .output
          .directory
          .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR)),
      },
    })
  }
}

/// Resolve which configuration file to read.
///
/// Order: explicit path, `$TALLY_CONFIG`, `./tally.toml`, then
/// `<config dir>/tally/tally.toml`.
pub fn resolve_config_path(explicit_path: Option<&Path>, env: &impl Environment) -> Result<PathBuf> {
  if let Some(path) = explicit_path {
    return existing(path.to_path_buf());
  }

  if let Some(path) = env.var(ENV_CONFIG_PATH) {
    return existing(PathBuf::from(path));
  }

  let local = PathBuf::from(CONFIG_FILE_NAME);
  if local.is_file() {
    return Ok(local);
  }

  let user_config = ProjectDirs::from("", "", "tally").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));
  if let Some(path) = user_config.filter(|path| path.is_file()) {
    return Ok(path);
  }

  Err(Error::configuration(format!(
    "No configuration file found. Create ./{CONFIG_FILE_NAME}, set ${ENV_CONFIG_PATH}, or pass --config"
  )))
}

fn existing(path: PathBuf) -> Result<PathBuf> {
  if path.is_file() {
    Ok(path)
  } else {
    Err(Error::configuration(format!(
      "Configuration file {} does not exist",
      path.display()
    )))
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|value| !value.trim().is_empty())
}

/// Upper-case and validate project keys so they can be inlined into JQL.
fn normalize_project_keys(keys: &[String]) -> Result<Vec<String>> {
  keys
    .iter()
    .map(|key| {
      let key = key.trim().to_ascii_uppercase();
      if PROJECT_KEY_PATTERN.is_match(&key) {
        Ok(key)
      } else {
        Err(Error::configuration(format!("Invalid project key '{key}' in report.projects")))
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tally_test_utils::{ConfigFileGuard, NetrcGuard};

  use super::*;

  #[derive(Default)]
  struct MapEnv {
    vars: HashMap<&'static str, String>,
    home: Option<PathBuf>,
  }

  impl MapEnv {
    fn with(mut self, key: &'static str, value: &str) -> Self {
      self.vars.insert(key, value.to_string());
      self
    }

    fn with_home(mut self, home: &Path) -> Self {
      self.home = Some(home.to_path_buf());
      self
    }
  }

  impl Environment for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
      self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
      self.home.clone()
    }
  }

  const FULL: &str = r#"
[jira]
url = "company.atlassian.net/"
email = "me@example.com"
api_token = "token-123"

[report]
start = "2025-05-15T00:00:00+00:00"
end = "2025-06-28T23:59:59+00:00"
projects = ["proj", "OPS"]
"#;

  #[test]
  fn test_full_config() {
    let config = Config::from_toml_str(FULL, &MapEnv::default()).unwrap();

    assert_eq!(config.jira.base_url, "https://company.atlassian.net");
    assert_eq!(config.jira.email, "me@example.com");
    assert_eq!(config.jira.api_token, "token-123");
    assert_eq!(config.jira.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(config.report.projects, vec!["PROJ", "OPS"]);
    assert_eq!(config.report.sort, SortOrder::Hours);
    assert!(!config.report.show_all_issues);
    assert!(config.output.save_to_file);
    assert_eq!(config.output.directory, PathBuf::from("reports"));
  }

  #[test]
  fn test_optional_sections() {
    let content = format!(
      "{FULL}show_all_issues = true\nsort = \"key\"\n\n[output]\nsave_to_file = false\ndirectory = \"out\"\n"
    );
    let config = Config::from_toml_str(&content, &MapEnv::default()).unwrap();

    assert!(config.report.show_all_issues);
    assert!(config.report.aggregate_options().show_all_issues);
    assert_eq!(config.report.sort, SortOrder::Key);
    assert!(!config.output.save_to_file);
    assert_eq!(config.output.directory, PathBuf::from("out"));
  }

  #[test]
  fn test_missing_keys_are_all_named() {
    let content = r#"
[jira]
url = "https://company.atlassian.net"
api_token = ""

[report]
end = "2025-06-28"
"#;
    let error = Config::from_toml_str(content, &MapEnv::default()).unwrap_err();
    let message = error.to_string();

    assert!(matches!(error, Error::Configuration(_)));
    assert!(message.contains("jira.email"));
    assert!(message.contains("jira.api_token"));
    assert!(message.contains("report.start"));
    assert!(!message.contains("jira.url"));
    assert!(!message.contains("report.end"));
  }

  #[test]
  fn test_environment_overrides_file() {
    let env = MapEnv::default()
      .with(ENV_JIRA_HOST, "https://other.atlassian.net")
      .with(ENV_JIRA_API_TOKEN, "env-token");
    let config = Config::from_toml_str(FULL, &env).unwrap();

    assert_eq!(config.jira.base_url, "https://other.atlassian.net");
    assert_eq!(config.jira.api_token, "env-token");
    assert_eq!(config.jira.email, "me@example.com");
  }

  #[test]
  fn test_netrc_fills_missing_credentials() {
    let guard = NetrcGuard::new("machine company.atlassian.net login netrc@example.com password netrc-token\n");
    let content = r#"
[jira]
url = "https://company.atlassian.net"

[report]
start = "2025-05-15"
end = "2025-05-31"
"#;
    let env = MapEnv::default().with_home(guard.home_dir());
    let config = Config::from_toml_str(content, &env).unwrap();

    assert_eq!(config.jira.email, "netrc@example.com");
    assert_eq!(config.jira.api_token, "netrc-token");
  }

  #[test]
  fn test_invalid_project_key() {
    let content = FULL.replace(r#"["proj", "OPS"]"#, r#"["PROJ) OR project = X"]"#);
    let error = Config::from_toml_str(&content, &MapEnv::default()).unwrap_err();
    assert!(error.to_string().contains("Invalid project key"));
  }

  #[test]
  fn test_inverted_window() {
    let content = FULL.replace("2025-06-28T23:59:59+00:00", "2025-01-01T10:00:00+00:00");
    let error = Config::from_toml_str(&content, &MapEnv::default()).unwrap_err();
    assert!(matches!(error, Error::Configuration(_)));
  }

  #[test]
  fn test_invalid_toml() {
    let error = Config::from_toml_str("[jira\nurl = ", &MapEnv::default()).unwrap_err();
    assert!(error.to_string().contains("Invalid TOML"));
  }

  #[test]
  fn test_misspelled_keys_are_rejected() {
    let content = format!("{FULL}\n[output]\nsave_to_fle = false\n");
    let error = Config::from_toml_str(&content, &MapEnv::default()).unwrap_err();
    assert!(matches!(error, Error::Configuration(_)));
    assert!(error.to_string().contains("save_to_fle"));

    let content = FULL.replace("projects = [", "show_all_isues = true\nprojects = [");
    let error = Config::from_toml_str(&content, &MapEnv::default()).unwrap_err();
    assert!(error.to_string().contains("show_all_isues"));

    let error = Config::from_toml_str(&format!("{FULL}\n[ouput]\n"), &MapEnv::default()).unwrap_err();
    assert!(error.to_string().contains("ouput"));
  }

  #[test]
  fn test_debug_redacts_token() {
    let config = Config::from_toml_str(FULL, &MapEnv::default()).unwrap();
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("token-123"));
  }

  #[test]
  fn test_load_from_explicit_path() {
    let guard = ConfigFileGuard::new(FULL);
    let config = Config::load(Some(guard.path()), &MapEnv::default()).unwrap();
    assert_eq!(config.jira.email, "me@example.com");
  }

  #[test]
  fn test_load_from_env_path() {
    let guard = ConfigFileGuard::new(FULL);
    let env = MapEnv::default().with(ENV_CONFIG_PATH, &guard.path().display().to_string());
    let config = Config::load(None, &env).unwrap();
    assert_eq!(config.report.projects.len(), 2);
  }

  #[test]
  fn test_load_errors_mention_file() {
    let guard = ConfigFileGuard::new("[report]\nstart = \"2025-05-01\"\nend = \"2025-05-02\"\n");
    let error = Config::load(Some(guard.path()), &MapEnv::default()).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("jira.url"));
    assert!(message.contains(&guard.path().display().to_string()));
  }

  #[test]
  fn test_load_missing_explicit_file() {
    let error = Config::load(Some(Path::new("/nonexistent/tally.toml")), &MapEnv::default()).unwrap_err();
    assert!(error.to_string().contains("does not exist"));
  }
}
