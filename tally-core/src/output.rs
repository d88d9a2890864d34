//! # Output Formatting
//!
//! Colored status lines for the console. Status lines go to stderr so that
//! stdout carries only the report, and colors are dropped when stderr is not
//! a terminal.

use owo_colors::{OwoColorize, Stream};

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("white_check_mark", "✓");
  eprintln!(
    "{} {}",
    check.if_supports_color(Stream::Stderr, |text| text.green().bold().to_string()),
    message
  );
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("x", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |text| text.red().bold().to_string()),
    message
  );
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information_source", "ℹ");
  eprintln!(
    "{} {}",
    info.if_supports_color(Stream::Stderr, |text| text.blue().bold().to_string()),
    message
  );
}

/// Format a file path for a status line
pub fn format_path(path: &str) -> String {
  path
    .if_supports_color(Stream::Stderr, |text| text.bright_green())
    .to_string()
}
