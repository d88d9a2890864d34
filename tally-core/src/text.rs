//! Text helpers for report cells.

/// Truncate a string to at most `max_chars` characters, appending `...` when
/// anything was cut. Counts characters, so multibyte input is never split.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
  if s.chars().count() <= max_chars {
    s.to_string()
  } else if max_chars <= 3 {
    "...".to_string()
  } else {
    let truncated: String = s.chars().take(max_chars - 3).collect();
    format!("{truncated}...")
  }
}
