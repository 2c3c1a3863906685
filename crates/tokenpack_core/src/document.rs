use anyhow::Context;
use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::{self, SchemaError};
use crate::types::{Categories, TokenSet, TokenStore, SYSTEM_SCOPE, THEME_SCOPE};

/// Parses raw export text into JSON. Standard JSON is tried first since it
/// covers almost every export; json5 handles the occasional hand-edited file
/// with comments or trailing commas.
pub fn parse_raw(source: &str) -> anyhow::Result<Value> {
  match serde_json::from_str::<Value>(source) {
    Ok(value) => Ok(value),
    Err(serde_error) => {
      tracing::debug!(
        "Falling back to json5 parser (likely contains JSON5 features): {serde_error}"
      );
      json5::from_str::<Value>(source).context("Token document is not valid JSON or JSON5")
    }
  }
}

/// Parses a raw token export into a [`TokenStore`].
pub fn parse_document(source: &str) -> anyhow::Result<TokenStore> {
  let value = parse_raw(source)?;
  let store = document_from_value(&value)?;
  Ok(store)
}

/// Builds a [`TokenStore`] from an already-parsed document, validating its
/// top-level shape first.
pub fn document_from_value(value: &Value) -> Result<TokenStore, SchemaError> {
  let object = schema::validate(value)?;

  let mut sets = IndexMap::new();
  for (name, set_value) in object {
    if name.starts_with('$') {
      continue;
    }

    // validate() guarantees every non-$ set is an object with a known scope
    let Some(set_object) = set_value.as_object() else {
      continue;
    };

    let mut scopes = IndexMap::new();
    for (key, scope_value) in set_object {
      if key != SYSTEM_SCOPE && key != THEME_SCOPE {
        continue;
      }

      let categories: Categories =
        serde_json::from_value(scope_value.clone()).map_err(|err| SchemaError::MalformedScope {
          set: name.clone(),
          scope: key.clone(),
          message: err.to_string(),
        })?;

      scopes.insert(key.clone(), categories);
    }

    sets.insert(
      name.clone(),
      TokenSet {
        name: name.clone(),
        scopes,
      },
    );
  }

  Ok(TokenStore::new(sets))
}
