mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SourceKind {
  /// A design-tool token export on disk
  File,
  /// Fetch the export from the Figma API
  Figma,
  /// A Zeroheight `$value` export on disk
  Zeroheight,
}

#[derive(Parser, Debug)]
#[command(
  name = "tokenpack",
  about = "Converts design token exports into CSS variables and JSON",
  version
)]
pub struct TokenpackCommand {
  /// Where the token export comes from
  #[arg(long, value_enum)]
  pub source: SourceKind,
  /// Path to a token export file, or a Figma file key when --source figma
  #[arg(long)]
  pub input: String,
  /// Directory receiving design_tokens.css and design_tokens.json
  #[arg(long)]
  pub output: PathBuf,
  /// Exit non-zero when any token resolution fell back
  #[arg(long)]
  pub strict: bool,
  /// Personal access token for the Figma API
  #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
  pub figma_access_token: Option<String>,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let args = TokenpackCommand::parse();
  pipeline::run(&args)
}
