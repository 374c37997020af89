/// Truncate a string to a maximum character count, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Uppercased first letter of a display name, for avatar-style markers
pub fn initial(name: &str) -> String {
  name
    .chars()
    .next()
    .map(|c| c.to_uppercase().to_string())
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    // Must cut on character boundaries, not bytes
    assert_eq!(truncate("héllö wörld", 8), "héllö...");
  }

  #[test]
  fn test_initial() {
    assert_eq!(initial("leanne Graham"), "L");
    assert_eq!(initial(""), "");
  }
}
