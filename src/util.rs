//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let cut = s
      .char_indices()
      .map(|(i, c)| i + c.len_utf8())
      .take_while(|end| *end <= max)
      .last()
      .unwrap_or(0);
    format!("{}… ({} bytes total)", &s[..cut], s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_all_occurrences() {
    let out = fill_template("{n} words about {topic}, really {n}", &[("n", "5"), ("topic", "space")]);
    assert_eq!(out, "5 words about space, really 5");
  }

  #[test]
  fn trunc_for_log_respects_char_boundaries() {
    let s = "привет мир привет мир";
    let t = trunc_for_log(s, 7);
    assert!(t.ends_with("bytes total)"));
    // 7 bytes fit three 2-byte Cyrillic chars but not four.
    assert!(t.starts_with("при"));
    assert!(!t.starts_with("прив"));
    // must not panic on multi-byte boundaries
    assert!(trunc_for_log("ééééé", 3).starts_with("é…"));
  }
}
