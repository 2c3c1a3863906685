use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tokenpack_core::diagnostic::{Diagnostics, FallbackReason, ResolutionDiagnostic};
use tokenpack_core::naming::kebab_case;
use tokenpack_core::schema::SchemaError;
use tokenpack_resolver::is_alias;

/// Literal rename rules folding font-family-specific abstraction tokens into
/// shared variable names. These are a string-rewrite contract with consuming
/// stylesheets; extend the list, do not generalize it.
static RENAME_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
  [
    (
      r"^--font-open-sans-abstraction-open-sans-",
      "--font-abstraction-open-sans-",
    ),
    (
      r"^--font-public-sans-abstraction-public-sans-",
      "--font-abstraction-public-sans-",
    ),
    (
      r"^--font-merriweather-abstraction-merriweather-",
      "--font-abstraction-merriweather-",
    ),
    (
      r"^--font-roboto-mono-abstraction-roboto-mono-",
      "--font-abstraction-roboto-mono-",
    ),
    (
      r"^--font-source-sans-pro-abstraction-source-sans-pro-",
      "--font-abstraction-source-sans-pro-",
    ),
  ]
  .into_iter()
  .map(|(pattern, replacement)| {
    (
      Regex::new(pattern).expect("rename rule pattern"),
      replacement,
    )
  })
  .collect()
});

/// Result of one Zeroheight emission pass.
///
/// Unlike the main transformer there is no type fallback table: unresolved
/// references are warned about and their declaration omitted.
#[derive(Clone, Debug, PartialEq)]
pub struct ZeroheightOutput {
  pub css: String,
  pub diagnostics: Vec<ResolutionDiagnostic>,
}

/// Emits a `:root` block from a Zeroheight export, where leaves are objects
/// carrying a `$value` and `$value` strings wrapped in `{...}` reference
/// other tokens by dotted path from the document root.
#[tracing::instrument(level = "debug", skip_all)]
pub fn transform(document: &Value) -> Result<ZeroheightOutput, SchemaError> {
  if !document.is_object() {
    return Err(SchemaError::NotAnObject(
      match document {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
      }
      .into(),
    ));
  }

  let mut declarations = Vec::new();
  let mut diagnostics = Diagnostics::default();
  let mut trail = Vec::new();
  walk(document, document, &mut trail, &mut declarations, &mut diagnostics);

  let mut css = String::from(":root {\n");
  for (name, value) in &declarations {
    css.push_str(&format!("  {name}: {value};\n"));
  }
  css.push_str("}\n");

  Ok(ZeroheightOutput {
    css,
    diagnostics: diagnostics.into_vec(),
  })
}

fn walk(
  root: &Value,
  node: &Value,
  trail: &mut Vec<String>,
  declarations: &mut Vec<(String, String)>,
  diagnostics: &mut Diagnostics,
) {
  let Some(object) = node.as_object() else {
    return;
  };

  if let Some(raw) = object.get("$value") {
    let path = trail.join(".");
    match resolve_value(root, &path, raw, &HashSet::new(), diagnostics) {
      Some(value) => {
        let name = rename(&format!("--{}", kebab_case(&trail.join("-"))));
        declarations.push((name, value));
      }
      None => {
        // Warned during resolution; the declaration is omitted.
      }
    }
    return;
  }

  for (key, child) in object {
    if key.starts_with('$') {
      continue;
    }
    trail.push(key.clone());
    walk(root, child, trail, declarations, diagnostics);
    trail.pop();
  }
}

fn resolve_value(
  root: &Value,
  token_path: &str,
  raw: &Value,
  visited: &HashSet<String>,
  diagnostics: &mut Diagnostics,
) -> Option<String> {
  match raw {
    Value::String(text) if is_alias(text) => {
      let reference = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .unwrap_or(text);

      if visited.contains(reference) {
        tracing::warn!("token {token_path}: reference cycle at {reference:?}, omitting");
        diagnostics.record(
          token_path,
          FallbackReason::Cycle,
          format!("reference cycle at {reference:?}"),
        );
        return None;
      }

      let Some(target) = lookup(root, reference) else {
        tracing::warn!("token {token_path}: unresolved reference {reference:?}, omitting");
        diagnostics.record(
          token_path,
          FallbackReason::UnresolvedPath,
          format!("unresolved reference {reference:?}"),
        );
        return None;
      };

      let mut visited = visited.clone();
      visited.insert(reference.to_string());
      resolve_value(root, token_path, target, &visited, diagnostics)
    }
    Value::String(text) => Some(text.clone()),
    Value::Number(number) => Some(number.to_string()),
    other => {
      tracing::warn!("token {token_path}: unsupported $value {other:?}, omitting");
      diagnostics.record(
        token_path,
        FallbackReason::MalformedValue,
        format!("unsupported $value {other}"),
      );
      None
    }
  }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
  let mut cursor = root;
  for segment in path.split('.').filter(|s| !s.is_empty()) {
    cursor = cursor.as_object()?.get(segment)?;
  }
  cursor.as_object()?.get("$value")
}

fn rename(name: &str) -> String {
  for (pattern, replacement) in RENAME_RULES.iter() {
    if pattern.is_match(name) {
      return pattern.replace(name, *replacement).into_owned();
    }
  }
  name.to_string()
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn emits_declarations_for_value_leaves() {
    let output = transform(&json!({
      "color": {
        "primary": { "$value": "#005ea2" },
        "weight": { "$value": 700 }
      }
    }))
    .unwrap();

    assert!(output.css.contains("  --color-primary: #005ea2;\n"));
    assert!(output.css.contains("  --color-weight: 700;\n"));
    assert!(output.diagnostics.is_empty());
  }

  #[test]
  fn resolves_references_between_tokens() {
    let output = transform(&json!({
      "color": {
        "base": { "$value": "#1b1b1b" },
        "text": { "$value": "{color.base}" }
      }
    }))
    .unwrap();

    assert!(output.css.contains("  --color-text: #1b1b1b;\n"));
  }

  #[test]
  fn omits_declarations_for_unresolved_references() {
    let output = transform(&json!({
      "color": {
        "text": { "$value": "{color.missing}" }
      }
    }))
    .unwrap();

    assert!(!output.css.contains("--color-text"));
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].reason, FallbackReason::UnresolvedPath);
  }

  #[test]
  fn omits_declarations_for_reference_cycles() {
    let output = transform(&json!({
      "color": {
        "a": { "$value": "{color.b}" },
        "b": { "$value": "{color.a}" }
      }
    }))
    .unwrap();

    assert!(!output.css.contains("--color-a"));
    assert!(!output.css.contains("--color-b"));
    assert_eq!(output.diagnostics.len(), 2);
    assert!(output
      .diagnostics
      .iter()
      .all(|d| d.reason == FallbackReason::Cycle));
  }

  #[test]
  fn folds_font_abstraction_names_into_shared_variables() {
    let output = transform(&json!({
      "font": {
        "open-sans": {
          "abstraction": {
            "open-sans": {
              "2xl": { "$value": "40px" }
            }
          }
        }
      }
    }))
    .unwrap();

    assert!(output.css.contains("  --font-abstraction-open-sans-2xl: 40px;\n"));
    assert!(!output.css.contains("--font-open-sans-abstraction"));
  }

  #[test]
  fn rejects_non_object_documents() {
    assert_eq!(
      transform(&json!("nope")),
      Err(SchemaError::NotAnObject("a string".into()))
    );
  }

  #[test]
  fn skips_metadata_keys() {
    let output = transform(&json!({
      "$metadata": { "$value": "ignored" },
      "color": { "base": { "$value": "#000000" } }
    }))
    .unwrap();

    assert!(output.css.contains("--color-base"));
    assert!(!output.css.contains("ignored"));
  }
}
