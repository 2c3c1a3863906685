use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

/// Why a token resolution degraded to its type fallback.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackReason {
  /// No definition was found for the referenced path.
  UnresolvedPath,
  /// The alias chain revisited a path it had already dereferenced.
  Cycle,
  /// The alias chain exceeded the hop cap.
  HopCapExceeded,
  /// The resolved name had no entry in the category lookup table.
  UnknownLookupKey,
  /// The definition's value did not fit its declared type.
  MalformedValue,
}

/// A record of one silent fallback during emission.
///
/// The resolution core never fails on a single bad token; these records are
/// returned alongside the CSS/JSON output so a caller can surface or reject
/// unexpected fallbacks.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolutionDiagnostic {
  /// Token or alias path the fallback applies to.
  pub path: String,
  pub reason: FallbackReason,
  pub message: String,
}

impl Display for ResolutionDiagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.path, self.message)
  }
}

/// Collects [`ResolutionDiagnostic`] records over one emission pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
  records: Vec<ResolutionDiagnostic>,
}

impl Diagnostics {
  pub fn record(&mut self, path: impl Into<String>, reason: FallbackReason, message: impl Into<String>) {
    self.records.push(ResolutionDiagnostic {
      path: path.into(),
      reason,
      message: message.into(),
    });
  }

  pub fn push(&mut self, diagnostic: ResolutionDiagnostic) {
    self.records.push(diagnostic);
  }

  pub fn extend(&mut self, other: Diagnostics) {
    self.records.extend(other.records);
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ResolutionDiagnostic> {
    self.records.iter()
  }

  pub fn into_vec(self) -> Vec<ResolutionDiagnostic> {
    self.records
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn records_are_collected_in_order() {
    let mut diagnostics = Diagnostics::default();
    diagnostics.record("theme.color.primary", FallbackReason::UnresolvedPath, "no definition");
    diagnostics.record("usa.color.loop", FallbackReason::Cycle, "alias cycle");

    let records = diagnostics.into_vec();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].path, "theme.color.primary");
    assert_eq!(records[1].reason, FallbackReason::Cycle);
  }

  #[test]
  fn displays_path_and_message() {
    let diagnostic = ResolutionDiagnostic {
      path: "usa.color.gray.50".into(),
      reason: FallbackReason::UnknownLookupKey,
      message: "no ramp entry".into(),
    };

    assert_eq!(diagnostic.to_string(), "usa.color.gray.50: no ramp entry");
  }
}
