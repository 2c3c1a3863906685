use std::collections::HashMap;

use tokenpack_core::types::{Scope, TokenStore};

/// Category name to owning set names, built once per resolution pass.
///
/// Alias paths omit which token set they belong to. Rather than re-scanning
/// every set per alias, the index records, per scope, which sets define each
/// category. Candidates keep document order, so the winning set for an
/// ambiguous category is deterministic.
#[derive(Debug, Default)]
pub struct ScopeIndex {
  system: HashMap<String, Vec<String>>,
  theme: HashMap<String, Vec<String>>,
}

impl ScopeIndex {
  pub fn build(store: &TokenStore) -> ScopeIndex {
    let mut system: HashMap<String, Vec<String>> = HashMap::new();
    let mut theme: HashMap<String, Vec<String>> = HashMap::new();

    for set in store.sets() {
      for (scope, bucket) in [(Scope::System, &mut system), (Scope::Theme, &mut theme)] {
        let Some(categories) = set.scope(scope) else {
          continue;
        };
        for category in categories.keys() {
          bucket.entry(category.clone()).or_default().push(set.name.clone());
        }
      }
    }

    ScopeIndex { system, theme }
  }

  /// Sets defining `category` under `scope`, in document order.
  pub fn candidates(&self, scope: Scope, category: &str) -> &[String] {
    let bucket = match scope {
      Scope::System => &self.system,
      Scope::Theme => &self.theme,
    };
    bucket.get(category).map(Vec::as_slice).unwrap_or(&[])
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokenpack_core::document::document_from_value;

  use super::*;

  #[test]
  fn indexes_categories_per_scope_in_document_order() {
    let store = document_from_value(&serde_json::json!({
      "Color": { "--usa": { "color": {} } },
      "Brand Color": { "--usa": { "color": {} } },
      "USWDS Theme/Project theme": { "--theme": { "color": {}, "spacing": {} } }
    }))
    .unwrap();

    let index = ScopeIndex::build(&store);

    assert_eq!(
      index.candidates(Scope::System, "color"),
      ["Color".to_string(), "Brand Color".to_string()]
    );
    assert_eq!(
      index.candidates(Scope::Theme, "spacing"),
      ["USWDS Theme/Project theme".to_string()]
    );
    assert!(index.candidates(Scope::Theme, "font-size").is_empty());
  }
}
