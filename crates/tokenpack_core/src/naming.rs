/// Converts a display name into the kebab-case form used in generated CSS
/// variable and utility class names.
///
/// The normalization is a literal contract with consuming stylesheets:
/// lowercase, camelCase boundaries split with a hyphen, whitespace, slashes,
/// underscores and dots mapped to hyphens, every other non-alphanumeric
/// character stripped, repeated hyphens collapsed, leading and trailing
/// hyphens trimmed. The function is idempotent.
pub fn kebab_case(input: &str) -> String {
  let mut mapped = String::with_capacity(input.len() + 4);
  let mut previous: Option<char> = None;

  for ch in input.chars() {
    if ch.is_ascii_uppercase() {
      if previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
        mapped.push('-');
      }
      mapped.push(ch.to_ascii_lowercase());
    } else if ch.is_whitespace() || matches!(ch, '/' | '_' | '.') {
      mapped.push('-');
    } else if ch.is_ascii_alphanumeric() || ch == '-' {
      mapped.push(ch);
    }
    previous = Some(ch);
  }

  let mut collapsed = String::with_capacity(mapped.len());
  for ch in mapped.chars() {
    if ch == '-' && collapsed.ends_with('-') {
      continue;
    }
    collapsed.push(ch);
  }

  collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn lowercases_and_hyphenates_spaces() {
    assert_eq!(kebab_case("Accent Cool"), "accent-cool");
    assert_eq!(kebab_case("Dark Hover"), "dark-hover");
  }

  #[test]
  fn splits_camel_case_boundaries() {
    assert_eq!(kebab_case("fontWeight"), "font-weight");
    assert_eq!(kebab_case("accentCoolDarker"), "accent-cool-darker");
  }

  #[test]
  fn maps_separators_to_hyphens() {
    assert_eq!(kebab_case("USWDS Theme/Project theme"), "uswds-theme-project-theme");
    assert_eq!(kebab_case("font_size.lg"), "font-size-lg");
  }

  #[test]
  fn strips_other_punctuation() {
    assert_eq!(kebab_case("spacing (large)"), "spacing-large");
    assert_eq!(kebab_case("50%"), "50");
  }

  #[test]
  fn collapses_and_trims_hyphens() {
    assert_eq!(kebab_case("--font--size--"), "font-size");
    assert_eq!(kebab_case("  gray  50  "), "gray-50");
  }

  #[test]
  fn is_idempotent() {
    for input in [
      "Accent Cool",
      "fontWeight",
      "USWDS Theme/Project theme",
      "--font--size--",
      "already-kebab-case",
      "A1b2C3",
    ] {
      let once = kebab_case(input);
      assert_eq!(kebab_case(&once), once, "kebab_case not idempotent for {input:?}");
    }
  }

  #[test]
  fn never_leaves_edge_or_duplicate_hyphens() {
    for input in ["  x  ", "a//b", "a...b", "_a_", "(a)"] {
      let output = kebab_case(input);
      assert!(!output.starts_with('-'));
      assert!(!output.ends_with('-'));
      assert!(!output.contains("--"));
    }
  }
}
