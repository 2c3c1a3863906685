use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::types::{SYSTEM_SCOPE, THEME_SCOPE};

/// Structural failure in a token document.
///
/// Unlike per-token resolution failures, these abort processing: a document
/// that does not match the expected export shape must not be silently turned
/// into an empty stylesheet.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaError {
  #[error("token document must be a JSON object, found {0}")]
  NotAnObject(String),
  #[error("token set {0:?} must be a JSON object")]
  SetNotAnObject(String),
  #[error("token set {0:?} is missing a `--usa` or `--theme` scope")]
  MissingScope(String),
  #[error("scope {scope:?} of token set {set:?} must be a JSON object")]
  ScopeNotAnObject { set: String, scope: String },
  #[error("scope {scope:?} of token set {set:?} is malformed: {message}")]
  MalformedScope {
    set: String,
    scope: String,
    message: String,
  },
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Validates the top-level shape of a token document and hands back the
/// validated object. `$`-prefixed keys (`$themes`, `$metadata`) are ignored.
pub fn validate(document: &Value) -> Result<&Map<String, Value>, SchemaError> {
  let object = document
    .as_object()
    .ok_or_else(|| SchemaError::NotAnObject(json_type_name(document).into()))?;

  for (name, set_value) in object {
    if name.starts_with('$') {
      continue;
    }

    let set_object = set_value
      .as_object()
      .ok_or_else(|| SchemaError::SetNotAnObject(name.clone()))?;

    let mut has_scope = false;
    for scope in [SYSTEM_SCOPE, THEME_SCOPE] {
      let Some(scope_value) = set_object.get(scope) else {
        continue;
      };
      has_scope = true;

      if !scope_value.is_object() {
        return Err(SchemaError::ScopeNotAnObject {
          set: name.clone(),
          scope: scope.into(),
        });
      }
    }

    if !has_scope {
      return Err(SchemaError::MissingScope(name.clone()));
    }
  }

  Ok(object)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn accepts_sets_with_either_scope() {
    let document = json!({
      "Color": { "--usa": { "color": {} } },
      "USWDS Theme/Project theme": { "--theme": { "color": {} } }
    });

    assert!(validate(&document).is_ok());
  }

  #[test]
  fn ignores_dollar_prefixed_keys() {
    let document = json!({
      "$themes": [],
      "$metadata": { "tokenSetOrder": [] },
      "Color": { "--usa": {} }
    });

    assert!(validate(&document).is_ok());
  }

  #[test]
  fn rejects_non_object_documents() {
    assert_eq!(
      validate(&json!([1, 2, 3])),
      Err(SchemaError::NotAnObject("an array".into()))
    );
  }

  #[test]
  fn rejects_sets_without_a_scope() {
    let document = json!({ "Color": { "color": {} } });

    assert_eq!(
      validate(&document),
      Err(SchemaError::MissingScope("Color".into()))
    );
  }

  #[test]
  fn rejects_non_object_scopes() {
    let document = json!({ "Color": { "--usa": "not an object" } });

    assert_eq!(
      validate(&document),
      Err(SchemaError::ScopeNotAnObject {
        set: "Color".into(),
        scope: "--usa".into(),
      })
    );
  }
}
