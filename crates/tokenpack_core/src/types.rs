use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Scope key carried by system-level token sets.
pub const SYSTEM_SCOPE: &str = "--usa";

/// Scope key carried by theme-level token sets.
pub const THEME_SCOPE: &str = "--theme";

/// The two scopes a token set can expose categories under.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Scope {
  System,
  Theme,
}

impl Scope {
  pub fn key(&self) -> &'static str {
    match self {
      Scope::System => SYSTEM_SCOPE,
      Scope::Theme => THEME_SCOPE,
    }
  }

  pub fn from_key(key: &str) -> Option<Scope> {
    match key {
      SYSTEM_SCOPE => Some(Scope::System),
      THEME_SCOPE => Some(Scope::Theme),
      _ => None,
    }
  }
}

/// Declared type of a token definition.
///
/// The declared type selects the normalizer applied once alias resolution
/// yields a primitive. It is trusted even when resolution falls back.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
  Color,
  Dimension,
  Spacing,
  FontWeight,
  FontFamily,
  FontSize,
  Typography,
  Text,
  #[serde(untagged)]
  Other(String),
}

impl Default for TokenType {
  fn default() -> Self {
    TokenType::Text
  }
}

/// Composite value carried by typography tokens.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyValue {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub font_family: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub font_size: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub font_weight: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub line_height: Option<String>,
}

/// Raw value of a token definition.
///
/// A string value of the form `{path.to.other.token}` is an alias referencing
/// another token by path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
  Text(String),
  Number(f64),
  Typography(TypographyValue),
}

impl TokenValue {
  pub fn as_text(&self) -> Option<&str> {
    match self {
      TokenValue::Text(text) => Some(text.as_str()),
      _ => None,
    }
  }
}

/// A single token definition as exported by the design tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenDefinition {
  pub value: TokenValue,
  #[serde(rename = "type", default)]
  pub token_type: TokenType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// A node in a category tree. An object is a token leaf iff it carries a
/// `value` key; anything else is a group of named children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
  Token(TokenDefinition),
  Group(IndexMap<String, TokenNode>),
}

impl TokenNode {
  pub fn as_token(&self) -> Option<&TokenDefinition> {
    match self {
      TokenNode::Token(definition) => Some(definition),
      TokenNode::Group(_) => None,
    }
  }

  pub fn as_group(&self) -> Option<&IndexMap<String, TokenNode>> {
    match self {
      TokenNode::Token(_) => None,
      TokenNode::Group(children) => Some(children),
    }
  }
}

/// Category name to category tree, in document order.
pub type Categories = IndexMap<String, TokenNode>;

/// A named top-level grouping of tokens, e.g. "Color" or
/// "USWDS Theme/Project theme". Holds one category tree per scope key.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenSet {
  pub name: String,
  pub scopes: IndexMap<String, Categories>,
}

impl TokenSet {
  pub fn scope(&self, scope: Scope) -> Option<&Categories> {
    self.scopes.get(scope.key())
  }
}

/// In-memory representation of a parsed token document. Constructed once from
/// input JSON and immutable during a resolution pass. Set iteration order is
/// document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenStore {
  sets: IndexMap<String, TokenSet>,
}

impl TokenStore {
  pub fn new(sets: IndexMap<String, TokenSet>) -> Self {
    TokenStore { sets }
  }

  pub fn set(&self, name: &str) -> Option<&TokenSet> {
    self.sets.get(name)
  }

  pub fn sets(&self) -> impl Iterator<Item = &TokenSet> {
    self.sets.values()
  }

  pub fn set_names(&self) -> impl Iterator<Item = &str> {
    self.sets.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.sets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sets.is_empty()
  }
}
