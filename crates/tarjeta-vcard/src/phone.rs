//! E.164-style phone normalization.

/// Strip everything except digits, preserving a leading `+` only when the
/// trimmed original started with one. All other formatting characters
/// (spaces, dashes, parentheses) are discarded.
pub fn normalize_phone(s: &str) -> String {
  let trimmed = s.trim();
  let keep_plus = trimmed.starts_with('+');

  let mut out = String::with_capacity(trimmed.len() + 1);
  if keep_plus {
    out.push('+');
  }
  out.extend(trimmed.chars().filter(char::is_ascii_digit));
  out
}
