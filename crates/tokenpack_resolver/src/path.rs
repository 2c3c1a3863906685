use tokenpack_core::types::{Categories, TokenNode, TokenSet, TokenStore};

enum Cursor<'a> {
  Set(&'a TokenSet),
  Categories(&'a Categories),
  Node(&'a TokenNode),
}

fn step<'a>(cursor: &Cursor<'a>, key: &str) -> Option<Cursor<'a>> {
  match cursor {
    Cursor::Set(set) => set.scopes.get(key).map(Cursor::Categories),
    Cursor::Categories(categories) => categories.get(key).map(Cursor::Node),
    Cursor::Node(TokenNode::Group(children)) => children.get(key).map(Cursor::Node),
    Cursor::Node(TokenNode::Token(_)) => None,
  }
}

fn walk<'a>(mut cursor: Cursor<'a>, segments: &[&str]) -> Option<&'a TokenNode> {
  let mut index = 0;
  while index < segments.len() {
    if let Some(next) = step(&cursor, segments[index]) {
      cursor = next;
      index += 1;
      continue;
    }

    // Keys such as "font-size" get split by the dot path; retry with the
    // segment merged into the next one before failing.
    if index + 1 < segments.len() {
      let merged = format!("{}-{}", segments[index], segments[index + 1]);
      if let Some(next) = step(&cursor, &merged) {
        cursor = next;
        index += 2;
        continue;
      }
    }

    return None;
  }

  match cursor {
    Cursor::Node(node) => Some(node),
    _ => None,
  }
}

/// Locates the node a dotted path refers to, starting from a top-level set
/// name.
///
/// Set names may contain slashes ("USWDS Theme/Project theme"), so
/// progressively longer dot-joined prefixes of the path are matched against
/// slash-normalized set names; the longest match wins. Without a
/// multi-segment match the first segment is taken as the set name. `None`
/// means "use fallback" to every caller, never an error.
pub fn resolve<'a>(path: &str, store: &'a TokenStore) -> Option<&'a TokenNode> {
  let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
  if segments.is_empty() {
    return None;
  }

  let mut chosen: Option<(&TokenSet, usize)> = None;
  for count in 2..=segments.len() {
    let prefix = segments[..count].join(".");
    for set in store.sets() {
      if set.name.replace('/', ".") == prefix {
        chosen = Some((set, count));
      }
    }
  }

  let (set, consumed) = match chosen {
    Some(found) => found,
    None => (store.set(segments[0])?, 1),
  };

  walk(Cursor::Set(set), &segments[consumed..])
}

/// Walks path segments beneath an already-located category tree, with the
/// same hyphen-merge tolerance as [`resolve`].
pub fn resolve_under<'a>(categories: &'a Categories, segments: &[&str]) -> Option<&'a TokenNode> {
  walk(Cursor::Categories(categories), segments)
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
            "gray": { "50": { "value": "#757575", "type": "color" } }
          }
        }
      },
      "Typography": {
        "--usa": {
          "font-size": { "lg": { "value": "22px", "type": "fontSize" } }
        }
      },
      "USWDS Theme/Project theme": {
        "--theme": {
          "color": {
            "primary": { "light": { "value": "#73b3e7", "type": "color" } }
          }
        }
      }
    }))
    .unwrap()
  }

  fn text_value(node: Option<&TokenNode>) -> Option<&str> {
    node.and_then(TokenNode::as_token).and_then(|d| d.value.as_text())
  }

  #[test]
  fn resolves_through_a_single_segment_set_name() {
    let store = store();
    let node = resolve("Color.--usa.color.gray.50", &store);
    assert_eq!(text_value(node), Some("#757575"));
  }

  #[test]
  fn resolves_multi_segment_set_names_with_slashes() {
    let store = store();
    let node = resolve(
      "USWDS Theme.Project theme.--theme.color.primary.light",
      &store,
    );
    assert_eq!(text_value(node), Some("#73b3e7"));
  }

  #[test]
  fn merges_hyphenated_keys_split_by_the_dot_path() {
    let store = store();
    let node = resolve("Typography.--usa.font.size.lg", &store);
    assert_eq!(text_value(node), Some("22px"));
  }

  #[test]
  fn returns_none_for_missing_segments() {
    let store = store();
    assert_eq!(resolve("Color.--usa.color.gray.95", &store), None);
    assert_eq!(resolve("Missing.--usa.color", &store), None);
  }

  #[test]
  fn returns_group_nodes_when_the_path_stops_early() {
    let store = store();
    let node = resolve("Color.--usa.color.gray", &store).unwrap();
    assert!(node.as_group().is_some());
  }

  #[test]
  fn resolve_under_walks_category_trees() {
    let store = store();
    let categories = store
      .set("Color")
      .unwrap()
      .scope(tokenpack_core::types::Scope::System)
      .unwrap();
    let node = resolve_under(categories, &["color", "gray", "50"]);
    assert_eq!(text_value(node), Some("#757575"));
  }
}
