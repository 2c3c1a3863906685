use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tokenpack_core::diagnostic::{Diagnostics, ResolutionDiagnostic};
use tokenpack_core::naming::kebab_case;
use tokenpack_core::types::{Categories, Scope, TokenDefinition, TokenNode, TokenStore};
use tokenpack_resolver::{token_value, StoreAliasResolver};

/// Known set-name prefixes stripped when deriving a font-type qualifier from
/// a set's display name ("Typography Open Sans" carries qualifier
/// "open-sans").
static SET_NAME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^(uswds( theme)?|project theme|theme|typography|color|spacing|effects?)\b[ /]*")
    .expect("set name prefix pattern")
});

/// Result of one CSS emission pass: the stylesheet text, a parallel map of
/// utility class name to resolved value, and every fallback recorded along
/// the way.
#[derive(Clone, Debug, PartialEq)]
pub struct CssOutput {
  pub css: String,
  pub utilities: IndexMap<String, String>,
  pub diagnostics: Vec<ResolutionDiagnostic>,
}

/// Emits the full stylesheet for a token store.
pub fn transform(store: &TokenStore) -> CssOutput {
  CssTransformer::new(store).transform()
}

#[derive(Clone, Debug)]
struct UtilityEntry {
  category: String,
  value: String,
}

/// Walks the token store in document order and produces a single `:root`
/// block of custom properties followed by utility class rules.
///
/// Duplicate variable names are last-write-wins, matching how the cascade
/// would treat repeated declarations; no other ordering is significant.
pub struct CssTransformer<'a> {
  store: &'a TokenStore,
  alias: StoreAliasResolver<'a>,
  diagnostics: Diagnostics,
  declarations: IndexMap<String, String>,
  colors: IndexMap<String, UtilityEntry>,
  font_sizes: IndexMap<String, UtilityEntry>,
  font_weights: IndexMap<String, UtilityEntry>,
  spacing: IndexMap<String, UtilityEntry>,
}

impl<'a> CssTransformer<'a> {
  pub fn new(store: &'a TokenStore) -> Self {
    CssTransformer {
      store,
      alias: StoreAliasResolver::new(store),
      diagnostics: Diagnostics::default(),
      declarations: IndexMap::new(),
      colors: IndexMap::new(),
      font_sizes: IndexMap::new(),
      font_weights: IndexMap::new(),
      spacing: IndexMap::new(),
    }
  }

  #[tracing::instrument(level = "debug", skip_all)]
  pub fn transform(mut self) -> CssOutput {
    for set in self.store.sets() {
      let qualifier = set_qualifier(&set.name);

      if let Some(categories) = set.scope(Scope::System) {
        self.emit_scope(&set.name, Scope::System, qualifier.as_deref(), categories);
      }
      if let Some(categories) = set.scope(Scope::Theme) {
        self.emit_scope(&set.name, Scope::Theme, qualifier.as_deref(), categories);
      }
    }

    let mut css = String::from(":root {\n");
    for (name, value) in &self.declarations {
      css.push_str(&format!("  {name}: {value};\n"));
    }
    css.push_str("}\n");

    let rules = self.utility_rules();
    if !rules.is_empty() {
      css.push('\n');
      css.push_str(&rules);
    }

    CssOutput {
      css,
      utilities: self.utility_map(),
      diagnostics: self.diagnostics.into_vec(),
    }
  }

  fn utility_map(&self) -> IndexMap<String, String> {
    let mut utilities = IndexMap::new();
    for (key, entry) in &self.colors {
      utilities.insert(format!("color-{key}"), entry.value.clone());
      utilities.insert(format!("bg-{key}"), entry.value.clone());
    }
    for (key, entry) in &self.font_sizes {
      utilities.insert(format!("font-size-{key}"), entry.value.clone());
    }
    for (key, entry) in &self.font_weights {
      utilities.insert(format!("font-weight-{key}"), entry.value.clone());
    }
    for (key, entry) in &self.spacing {
      utilities.insert(format!("margin-{key}"), entry.value.clone());
      utilities.insert(format!("padding-{key}"), entry.value.clone());
    }
    utilities
  }

  fn emit_scope(
    &mut self,
    set_name: &str,
    scope: Scope,
    qualifier: Option<&str>,
    categories: &Categories,
  ) {
    for (category, node) in categories {
      let mut trail = Vec::new();
      self.emit_node(set_name, scope, qualifier, category, &mut trail, node);
    }
  }

  fn emit_node(
    &mut self,
    set_name: &str,
    scope: Scope,
    qualifier: Option<&str>,
    category: &str,
    trail: &mut Vec<String>,
    node: &TokenNode,
  ) {
    match node {
      TokenNode::Group(children) => {
        for (key, child) in children {
          trail.push(key.clone());
          self.emit_node(set_name, scope, qualifier, category, trail, child);
          trail.pop();
        }
      }
      TokenNode::Token(definition) => {
        self.emit_token(set_name, scope, qualifier, category, trail, definition);
      }
    }
  }

  fn emit_token(
    &mut self,
    set_name: &str,
    scope: Scope,
    qualifier: Option<&str>,
    category: &str,
    trail: &[String],
    definition: &TokenDefinition,
  ) {
    let token_path = if trail.is_empty() {
      format!("{set_name}.{}.{category}", scope.key())
    } else {
      format!("{set_name}.{}.{category}.{}", scope.key(), trail.join("."))
    };

    let value = token_value(&token_path, definition, &self.alias, &mut self.diagnostics);

    let category_key = kebab_case(category);
    let variant_key = kebab_case(&trail.join("-"));
    // The qualifier only applies to font categories, where per-typeface sets
    // would otherwise collide on the same variable names.
    let qualifier = qualifier.filter(|_| category_key.starts_with("font"));
    let key = match (qualifier, variant_key.as_str()) {
      (Some(qualifier), "") => qualifier.to_string(),
      (Some(qualifier), variant) => format!("{qualifier}-{variant}"),
      (None, variant) => variant.to_string(),
    };
    let suffix = if key.is_empty() {
      category_key.clone()
    } else {
      format!("{category_key}-{key}")
    };
    let name = match scope {
      Scope::System => format!("--{suffix}"),
      Scope::Theme => format!("--theme-{suffix}"),
    };

    self.record_utility(&category_key, &key, &value);
    self.declarations.insert(name, value);
  }

  fn record_utility(&mut self, category_key: &str, variant_key: &str, value: &str) {
    if variant_key.is_empty() {
      return;
    }

    let table = match category_key {
      "color" => &mut self.colors,
      "font-size" => &mut self.font_sizes,
      "font-weight" => &mut self.font_weights,
      "spacing" | "margin" | "padding" => &mut self.spacing,
      _ => return,
    };

    table.insert(
      variant_key.to_string(),
      UtilityEntry {
        category: category_key.to_string(),
        value: value.to_string(),
      },
    );
  }

  fn utility_rules(&self) -> String {
    let mut rules = String::new();

    for (key, entry) in &self.colors {
      let variable = self.variable_reference(&entry.category, key);
      rules.push_str(&format!(".color-{key} {{ color: var({variable}); }}\n"));
      rules.push_str(&format!(
        ".bg-{key} {{ background-color: var({variable}); }}\n"
      ));
    }

    for (key, entry) in &self.font_sizes {
      let variable = self.variable_reference(&entry.category, key);
      rules.push_str(&format!(
        ".font-size-{key} {{ font-size: var({variable}); }}\n"
      ));
    }

    for (key, entry) in &self.font_weights {
      let variable = self.variable_reference(&entry.category, key);
      rules.push_str(&format!(
        ".font-weight-{key} {{ font-weight: var({variable}); }}\n"
      ));
    }

    for (key, entry) in &self.spacing {
      let variable = self.variable_reference(&entry.category, key);
      rules.push_str(&format!(".margin-{key} {{ margin: var({variable}); }}\n"));
      rules.push_str(&format!(".padding-{key} {{ padding: var({variable}); }}\n"));
    }

    rules
  }

  /// Utility classes reference the theme-prefixed variable when any theme
  /// scope defines the key, otherwise the plain system variable.
  fn variable_reference(&self, category: &str, key: &str) -> String {
    if self.theme_defines(category, key) {
      format!("--theme-{category}-{key}")
    } else {
      format!("--{category}-{key}")
    }
  }

  fn theme_defines(&self, category: &str, key: &str) -> bool {
    for set in self.store.sets() {
      let Some(categories) = set.scope(Scope::Theme) else {
        continue;
      };
      let qualifier = set_qualifier(&set.name);
      for (theme_category, node) in categories {
        let theme_category_key = kebab_case(theme_category);
        if theme_category_key != category {
          continue;
        }
        let prefix = qualifier
          .as_deref()
          .filter(|_| theme_category_key.starts_with("font"));
        let mut trail = Vec::new();
        if node_defines_key(node, key, prefix, &mut trail) {
          return true;
        }
      }
    }
    false
  }
}

fn node_defines_key(node: &TokenNode, key: &str, prefix: Option<&str>, trail: &mut Vec<String>) -> bool {
  match node {
    TokenNode::Token(_) => {
      let variant = kebab_case(&trail.join("-"));
      let candidate = match (prefix, variant.as_str()) {
        (Some(prefix), "") => prefix.to_string(),
        (Some(prefix), variant) => format!("{prefix}-{variant}"),
        (None, variant) => variant.to_string(),
      };
      candidate == key
    }
    TokenNode::Group(children) => children.iter().any(|(name, child)| {
      trail.push(name.clone());
      let defined = node_defines_key(child, key, prefix, trail);
      trail.pop();
      defined
    }),
  }
}

/// Derives a font-type qualifier from a set display name by stripping known
/// prefixes ("USWDS Theme/Typography Open Sans" carries "open-sans").
fn set_qualifier(name: &str) -> Option<String> {
  let mut rest = name.to_string();
  loop {
    let stripped = SET_NAME_PREFIX.replace(&rest, "").into_owned();
    if stripped == rest {
      break;
    }
    rest = stripped;
  }

  let qualifier = kebab_case(&rest);
  if qualifier.is_empty() {
    None
  } else {
    Some(qualifier)
  }
}
