use serde_json::{json, Map, Value};
use tokenpack_core::diagnostic::{Diagnostics, ResolutionDiagnostic};
use tokenpack_core::types::{Scope, TokenNode, TokenStore};
use tokenpack_resolver::{token_value, StoreAliasResolver};

/// Result of one JSON emission pass: the token tree with every definition's
/// value replaced by its resolved string, structure and order preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonOutput {
  pub value: Value,
  pub diagnostics: Vec<ResolutionDiagnostic>,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn transform(store: &TokenStore) -> JsonOutput {
  let alias = StoreAliasResolver::new(store);
  let mut diagnostics = Diagnostics::default();

  let mut document = Map::new();
  for set in store.sets() {
    let mut scopes = Map::new();
    for scope in [Scope::System, Scope::Theme] {
      let Some(categories) = set.scope(scope) else {
        continue;
      };

      let mut tree = Map::new();
      for (category, node) in categories {
        let path = format!("{}.{}.{category}", set.name, scope.key());
        tree.insert(
          category.clone(),
          normalize_node(&path, node, &alias, &mut diagnostics),
        );
      }
      scopes.insert(scope.key().to_string(), Value::Object(tree));
    }
    document.insert(set.name.clone(), Value::Object(scopes));
  }

  JsonOutput {
    value: Value::Object(document),
    diagnostics: diagnostics.into_vec(),
  }
}

fn normalize_node(
  path: &str,
  node: &TokenNode,
  alias: &StoreAliasResolver<'_>,
  diagnostics: &mut Diagnostics,
) -> Value {
  match node {
    TokenNode::Group(children) => {
      let mut tree = Map::new();
      for (key, child) in children {
        let child_path = format!("{path}.{key}");
        tree.insert(
          key.clone(),
          normalize_node(&child_path, child, alias, diagnostics),
        );
      }
      Value::Object(tree)
    }
    TokenNode::Token(definition) => {
      let resolved = token_value(path, definition, alias, diagnostics);
      let mut leaf = json!({
        "value": resolved,
        "type": &definition.token_type,
      });
      if let Some(description) = &definition.description {
        leaf["description"] = json!(description);
      }
      leaf
    }
  }
}
