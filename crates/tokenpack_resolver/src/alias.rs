use std::collections::HashSet;

use tokenpack_core::diagnostic::{FallbackReason, ResolutionDiagnostic};
use tokenpack_core::types::{Scope, TokenNode, TokenStore, TokenValue};

use crate::path;
use crate::scope_index::ScopeIndex;

/// Hard cap on chained alias dereferences within one resolution.
pub const MAX_ALIAS_HOPS: usize = 10;

/// Outcome of one alias resolution.
///
/// `value` is `None` when resolution failed and the caller should apply its
/// type fallback; the diagnostic then records why. Resolution itself never
/// errors.
#[derive(Clone, Debug, PartialEq)]
pub struct AliasOutcome {
  pub value: Option<TokenValue>,
  pub diagnostic: Option<ResolutionDiagnostic>,
}

impl AliasOutcome {
  fn found(value: TokenValue) -> Self {
    AliasOutcome {
      value: Some(value),
      diagnostic: None,
    }
  }

  fn failed(path: &str, reason: FallbackReason, message: String) -> Self {
    AliasOutcome {
      value: None,
      diagnostic: Some(ResolutionDiagnostic {
        path: path.into(),
        reason,
        message,
      }),
    }
  }
}

/// Returns true when a raw string value is an alias reference.
pub fn is_alias(value: &str) -> bool {
  value.starts_with('{') && value.ends_with('}')
}

/// Strips the `{...}` wrapper and any leading `--` from an alias reference.
pub fn alias_path(value: &str) -> &str {
  let inner = value
    .strip_prefix('{')
    .and_then(|v| v.strip_suffix('}'))
    .unwrap_or(value);
  inner.strip_prefix("--").unwrap_or(inner)
}

/// Dereferences alias references to primitive values.
///
/// The type-specific resolvers take this as an explicit dependency so tests
/// can substitute their own lookup.
pub trait AliasResolver {
  fn resolve_alias(&self, reference: &str, visited: &HashSet<String>) -> AliasOutcome;
}

/// [`AliasResolver`] backed by a token store and a per-pass [`ScopeIndex`].
pub struct StoreAliasResolver<'a> {
  store: &'a TokenStore,
  index: ScopeIndex,
}

impl<'a> StoreAliasResolver<'a> {
  pub fn new(store: &'a TokenStore) -> Self {
    StoreAliasResolver {
      store,
      index: ScopeIndex::build(store),
    }
  }

  /// Locates the definition an alias path points at. Paths starting with
  /// `usa.` or `theme.` omit their set name; the scope index supplies the
  /// owning sets, first full resolution in document order wins.
  fn find_definition(&self, segments: &[&str]) -> Option<&'a TokenNode> {
    let scope = match segments.first().copied() {
      Some("usa") => Some(Scope::System),
      Some("theme") => Some(Scope::Theme),
      _ => None,
    };

    let Some(scope) = scope else {
      return path::resolve(&segments.join("."), self.store);
    };

    let category = segments.get(1)?;
    let mut candidates = self.index.candidates(scope, category);

    // The category itself may be a hyphenated key split by the dot path.
    let merged_category;
    if candidates.is_empty() {
      if let Some(next) = segments.get(2) {
        merged_category = format!("{category}-{next}");
        candidates = self.index.candidates(scope, &merged_category);
      }
    }

    if candidates.len() > 1 {
      tracing::warn!(
        "alias path {:?} matches category {category:?} in token sets {candidates:?}; using the first in document order",
        segments.join(".")
      );
    }

    for set_name in candidates {
      let Some(set) = self.store.set(set_name) else {
        continue;
      };
      let Some(categories) = set.scope(scope) else {
        continue;
      };
      if let Some(node) = path::resolve_under(categories, &segments[1..]) {
        return Some(node);
      }
    }

    None
  }

  fn resolve_inner(&self, reference: &str, visited: &HashSet<String>, hops: usize) -> AliasOutcome {
    let path = alias_path(reference);

    if visited.contains(path) {
      return AliasOutcome::failed(
        path,
        FallbackReason::Cycle,
        format!("alias cycle detected at {path:?}"),
      );
    }

    if hops >= MAX_ALIAS_HOPS {
      return AliasOutcome::failed(
        path,
        FallbackReason::HopCapExceeded,
        format!("alias chain exceeded {MAX_ALIAS_HOPS} hops"),
      );
    }

    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some(node) = self.find_definition(&segments) else {
      return AliasOutcome::failed(
        path,
        FallbackReason::UnresolvedPath,
        format!("no token definition at {path:?}"),
      );
    };

    let Some(definition) = node.as_token() else {
      return AliasOutcome::failed(
        path,
        FallbackReason::UnresolvedPath,
        format!("{path:?} names a token group, not a definition"),
      );
    };

    match &definition.value {
      TokenValue::Text(text) if is_alias(text) => {
        // Each hop carries its own copy of the visited set; independent
        // top-level resolutions never share state.
        let mut visited = visited.clone();
        visited.insert(path.to_string());
        self.resolve_inner(text, &visited, hops + 1)
      }
      value => AliasOutcome::found(value.clone()),
    }
  }
}

impl AliasResolver for StoreAliasResolver<'_> {
  fn resolve_alias(&self, reference: &str, visited: &HashSet<String>) -> AliasOutcome {
    self.resolve_inner(reference, visited, 0)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokenpack_core::document::document_from_value;
  use tokenpack_core::types::TokenStore;

  use super::*;

  fn store() -> TokenStore {
    document_from_value(&serde_json::json!({
      "Color": {
        "--usa": {
          "color": {
            "gray": { "50": { "value": "#757575", "type": "color" } },
            "base": { "value": "{--usa.color.gray.50}", "type": "color" },
            "loop-a": { "value": "{--usa.color.loop-b}", "type": "color" },
            "loop-b": { "value": "{--usa.color.loop-a}", "type": "color" }
          }
        }
      },
      "USWDS Theme/Project theme": {
        "--theme": {
          "color": {
            "primary": {
              "light": { "value": "{--usa.color.gray.50}", "type": "color" }
            }
          }
        }
      }
    }))
    .unwrap()
  }

  fn resolve(reference: &str, store: &TokenStore) -> AliasOutcome {
    StoreAliasResolver::new(store).resolve_alias(reference, &HashSet::new())
  }

  #[test]
  fn recognizes_bracketed_references() {
    assert!(is_alias("{--usa.color.gray.50}"));
    assert!(!is_alias("#757575"));
  }

  #[test]
  fn strips_brackets_and_scope_dashes() {
    assert_eq!(alias_path("{--usa.color.gray.50}"), "usa.color.gray.50");
    assert_eq!(alias_path("theme.color.primary"), "theme.color.primary");
  }

  #[test]
  fn resolves_system_scoped_aliases_without_a_set_name() {
    let store = store();
    let outcome = resolve("{--usa.color.gray.50}", &store);

    assert_eq!(outcome.value, Some(TokenValue::Text("#757575".into())));
    assert_eq!(outcome.diagnostic, None);
  }

  #[test]
  fn resolves_theme_scoped_aliases_through_chained_hops() {
    let store = store();
    let outcome = resolve("{--theme.color.primary.light}", &store);

    assert_eq!(outcome.value, Some(TokenValue::Text("#757575".into())));
  }

  #[test]
  fn chains_through_intermediate_aliases() {
    let store = store();
    let outcome = resolve("{--usa.color.base}", &store);

    assert_eq!(outcome.value, Some(TokenValue::Text("#757575".into())));
  }

  #[test]
  fn unresolved_paths_fail_with_a_diagnostic() {
    let store = store();
    let outcome = resolve("{--theme.color.accent.dark}", &store);

    assert_eq!(outcome.value, None);
    let diagnostic = outcome.diagnostic.unwrap();
    assert_eq!(diagnostic.reason, FallbackReason::UnresolvedPath);
    assert_eq!(diagnostic.path, "theme.color.accent.dark");
  }

  #[test]
  fn mutual_cycles_terminate_with_a_cycle_diagnostic() {
    let store = store();

    for reference in ["{--usa.color.loop-a}", "{--usa.color.loop-b}"] {
      let outcome = resolve(reference, &store);
      assert_eq!(outcome.value, None);
      assert_eq!(outcome.diagnostic.unwrap().reason, FallbackReason::Cycle);
    }
  }

  #[test]
  fn long_chains_within_the_cap_resolve() {
    let mut color = serde_json::Map::new();
    color.insert(
      "end".into(),
      serde_json::json!({ "value": "#112233", "type": "color" }),
    );
    for hop in 0..9 {
      let target = if hop == 8 { "end".to_string() } else { format!("hop-{}", hop + 1) };
      color.insert(
        format!("hop-{hop}"),
        serde_json::json!({ "value": format!("{{--usa.color.{target}}}"), "type": "color" }),
      );
    }
    let store = document_from_value(&serde_json::json!({
      "Color": { "--usa": { "color": color } }
    }))
    .unwrap();

    let outcome = resolve("{--usa.color.hop-0}", &store);
    assert_eq!(outcome.value, Some(TokenValue::Text("#112233".into())));
  }

  #[test]
  fn chains_beyond_the_cap_fail_with_a_diagnostic() {
    let mut color = serde_json::Map::new();
    color.insert(
      "end".into(),
      serde_json::json!({ "value": "#112233", "type": "color" }),
    );
    for hop in 0..12 {
      let target = if hop == 11 { "end".to_string() } else { format!("hop-{}", hop + 1) };
      color.insert(
        format!("hop-{hop}"),
        serde_json::json!({ "value": format!("{{--usa.color.{target}}}"), "type": "color" }),
      );
    }
    let store = document_from_value(&serde_json::json!({
      "Color": { "--usa": { "color": color } }
    }))
    .unwrap();

    let outcome = resolve("{--usa.color.hop-0}", &store);
    assert_eq!(outcome.value, None);
    assert_eq!(
      outcome.diagnostic.unwrap().reason,
      FallbackReason::HopCapExceeded
    );
  }

  #[test]
  fn group_references_fail_with_a_diagnostic() {
    let store = store();
    let outcome = resolve("{--usa.color.gray}", &store);

    assert_eq!(outcome.value, None);
    assert_eq!(
      outcome.diagnostic.unwrap().reason,
      FallbackReason::UnresolvedPath
    );
  }
}
