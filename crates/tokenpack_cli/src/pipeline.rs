use std::fs;

use anyhow::{anyhow, Context};
use tokenpack_core::diagnostic::ResolutionDiagnostic;
use tokenpack_core::document::{document_from_value, parse_document, parse_raw};
use tokenpack_core::types::TokenStore;
use tokenpack_figma::FigmaClient;

use crate::{SourceKind, TokenpackCommand};

/// One complete pipeline run: load, resolve, emit, write.
///
/// Per-token fallbacks never fail the run unless `--strict` was passed;
/// structural failures (unreadable input, schema violations, API errors)
/// always do.
pub fn run(cmd: &TokenpackCommand) -> anyhow::Result<()> {
  let (css, json, diagnostics) = match cmd.source {
    SourceKind::File => {
      let source = fs::read_to_string(&cmd.input)
        .with_context(|| format!("Unable to read {}", cmd.input))?;
      let store = parse_document(&source)?;
      emit_store(&store)?
    }
    SourceKind::Figma => {
      let token = cmd
        .figma_access_token
        .clone()
        .ok_or_else(|| anyhow!("--source figma requires FIGMA_ACCESS_TOKEN"))?;
      let export = FigmaClient::new(token).fetch_variables(&cmd.input)?;
      let store = document_from_value(&export)?;
      emit_store(&store)?
    }
    SourceKind::Zeroheight => {
      let source = fs::read_to_string(&cmd.input)
        .with_context(|| format!("Unable to read {}", cmd.input))?;
      let document = parse_raw(&source)?;
      let output = tokenpack_transformer_zeroheight::transform(&document)?;
      let json = serde_json::to_string_pretty(&document)?;
      (output.css, json, output.diagnostics)
    }
  };

  fs::create_dir_all(&cmd.output)
    .with_context(|| format!("Unable to create {}", cmd.output.display()))?;
  fs::write(cmd.output.join("design_tokens.css"), css)?;
  fs::write(cmd.output.join("design_tokens.json"), json)?;

  for diagnostic in &diagnostics {
    tracing::warn!("token fell back: {diagnostic}");
  }

  if cmd.strict && !diagnostics.is_empty() {
    return Err(anyhow!(
      "{} token(s) fell back during resolution",
      diagnostics.len()
    ));
  }

  Ok(())
}

/// Emits CSS and normalized JSON from one store. Both emitters walk the same
/// tokens, so the CSS pass's diagnostics cover every fallback.
fn emit_store(store: &TokenStore) -> anyhow::Result<(String, String, Vec<ResolutionDiagnostic>)> {
  let css_output = tokenpack_transformer_css::transform(store);
  let json_output = tokenpack_transformer_json::transform(store);
  let json = serde_json::to_string_pretty(&json_output.value)?;

  Ok((css_output.css, json, css_output.diagnostics))
}
