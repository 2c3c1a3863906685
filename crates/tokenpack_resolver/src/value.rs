use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tokenpack_core::diagnostic::{Diagnostics, FallbackReason};
use tokenpack_core::types::{TokenDefinition, TokenType, TokenValue, TypographyValue};

use crate::alias::{alias_path, is_alias, AliasResolver};
use crate::tables;

static BARE_NUMBER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)$").expect("bare number pattern"));

static CSS_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)(?:px|rem|em|%|vw|vh|pt|ex|ch)$").expect("css length pattern")
});

/// Resolves a token definition to its final CSS value string.
///
/// Aliases are dereferenced through the injected resolver, then the primitive
/// is normalized according to the definition's declared type. Failures never
/// propagate: the type's fallback constant is returned and the failure is
/// recorded in `diagnostics`. Fallbacks are a pure function of the declared
/// type and the static lookup tables.
pub fn token_value(
  token_path: &str,
  definition: &TokenDefinition,
  alias: &dyn AliasResolver,
  diagnostics: &mut Diagnostics,
) -> String {
  match &definition.value {
    TokenValue::Number(number) => format_number(*number, &definition.token_type),
    TokenValue::Typography(typography) => typography_value(token_path, typography, diagnostics),
    TokenValue::Text(text) => {
      if !is_alias(text) {
        return normalize(token_path, text, &definition.token_type, diagnostics);
      }

      // Fresh visited set per top-level resolution (spec: per-chain state
      // must not leak between independent resolutions).
      let outcome = alias.resolve_alias(text, &HashSet::new());
      if let Some(diagnostic) = outcome.diagnostic {
        tracing::debug!("token {token_path}: {diagnostic}");
        diagnostics.push(diagnostic);
      }

      match outcome.value {
        Some(TokenValue::Number(number)) => format_number(number, &definition.token_type),
        Some(TokenValue::Typography(typography)) => {
          typography_value(token_path, &typography, diagnostics)
        }
        Some(TokenValue::Text(resolved)) => {
          normalize(token_path, &resolved, &definition.token_type, diagnostics)
        }
        // Resolution failed; normalize the unresolved path so the category
        // tables get a chance before the type fallback applies.
        None => normalize(
          token_path,
          alias_path(text),
          &definition.token_type,
          diagnostics,
        ),
      }
    }
  }
}

fn format_number(number: f64, token_type: &TokenType) -> String {
  let text = if number.fract() == 0.0 {
    format!("{}", number as i64)
  } else {
    number.to_string()
  };

  match token_type {
    TokenType::Dimension | TokenType::Spacing | TokenType::FontSize | TokenType::Typography => {
      format!("{text}px")
    }
    _ => text,
  }
}

fn normalize(
  token_path: &str,
  candidate: &str,
  token_type: &TokenType,
  diagnostics: &mut Diagnostics,
) -> String {
  match token_type {
    TokenType::Color => color_value(token_path, candidate, diagnostics),
    TokenType::FontFamily => font_family_value(token_path, candidate, diagnostics),
    TokenType::FontSize | TokenType::Typography => {
      font_size_value(token_path, candidate, diagnostics)
    }
    TokenType::FontWeight => font_weight_value(token_path, candidate, diagnostics),
    TokenType::Spacing | TokenType::Dimension => {
      spacing_value(token_path, candidate, diagnostics)
    }
    TokenType::Text | TokenType::Other(_) => candidate.to_string(),
  }
}

fn color_value(token_path: &str, candidate: &str, diagnostics: &mut Diagnostics) -> String {
  if candidate.starts_with('#') || candidate.starts_with("rgb(") || candidate.starts_with("rgba(")
  {
    return candidate.to_string();
  }

  // An unresolved path names the ramp entry by its last two segments,
  // e.g. "usa.color.blue-warm.50".
  let lookup = {
    let segments: Vec<&str> = candidate.split('.').collect();
    match segments.as_slice() {
      [.., family, grade] => tables::color_ramp(family, grade),
      [single] => single
        .rsplit_once('-')
        .and_then(|(family, grade)| tables::color_ramp(family, grade)),
      [] => None,
    }
  };

  if let Some(hex) = lookup {
    return hex.to_string();
  }

  diagnostics.record(
    token_path,
    FallbackReason::UnknownLookupKey,
    format!("no color ramp entry for {candidate:?}"),
  );
  tables::COLOR_FALLBACK.to_string()
}

fn font_family_value(token_path: &str, candidate: &str, diagnostics: &mut Diagnostics) -> String {
  // A comma means the value already is a CSS font stack.
  if candidate.contains(',') {
    return candidate.to_string();
  }

  if let Some(stack) = tables::font_stack(candidate) {
    return stack.to_string();
  }

  diagnostics.record(
    token_path,
    FallbackReason::UnknownLookupKey,
    format!("no font stack matches {candidate:?}"),
  );
  tables::FONT_FAMILY_FALLBACK.to_string()
}

fn font_size_value(token_path: &str, candidate: &str, diagnostics: &mut Diagnostics) -> String {
  if let Some(length) = as_css_length(candidate) {
    return length;
  }

  let name = candidate.rsplit('.').next().unwrap_or(candidate);
  if let Some(size) = tables::font_size(name) {
    return size.to_string();
  }

  diagnostics.record(
    token_path,
    FallbackReason::UnknownLookupKey,
    format!("no font size named {name:?}"),
  );
  tables::FONT_SIZE_FALLBACK.to_string()
}

fn font_weight_value(token_path: &str, candidate: &str, diagnostics: &mut Diagnostics) -> String {
  if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()) {
    return candidate.to_string();
  }

  let name = candidate.rsplit('.').next().unwrap_or(candidate);
  if let Some(weight) = tables::font_weight(&name.to_ascii_lowercase()) {
    return weight.to_string();
  }

  diagnostics.record(
    token_path,
    FallbackReason::UnknownLookupKey,
    format!("no font weight named {name:?}"),
  );
  tables::FONT_WEIGHT_FALLBACK.to_string()
}

fn spacing_value(token_path: &str, candidate: &str, diagnostics: &mut Diagnostics) -> String {
  if CSS_LENGTH.is_match(candidate) {
    return candidate.to_string();
  }

  // Scale keys ("05", "2", "105") are themselves numeric, so the scale is
  // consulted before the bare-number rule.
  let key = candidate.rsplit('.').next().unwrap_or(candidate);
  if let Some(value) = tables::spacing(key) {
    return value.to_string();
  }

  if BARE_NUMBER.is_match(candidate) {
    return format!("{candidate}px");
  }

  diagnostics.record(
    token_path,
    FallbackReason::UnknownLookupKey,
    format!("no spacing scale entry for {key:?}"),
  );
  tables::SPACING_FALLBACK.to_string()
}

fn typography_value(
  token_path: &str,
  typography: &TypographyValue,
  diagnostics: &mut Diagnostics,
) -> String {
  let Some(size) = typography.font_size.as_deref() else {
    diagnostics.record(
      token_path,
      FallbackReason::MalformedValue,
      "typography value has no fontSize",
    );
    return tables::FONT_SIZE_FALLBACK.to_string();
  };

  font_size_value(token_path, size, diagnostics)
}

/// Bare numbers get a `px` suffix; united lengths pass through unchanged.
fn as_css_length(candidate: &str) -> Option<String> {
  if BARE_NUMBER.is_match(candidate) {
    return Some(format!("{candidate}px"));
  }
  if CSS_LENGTH.is_match(candidate) {
    return Some(candidate.to_string());
  }
  None
}
