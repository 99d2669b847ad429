//! Command-line front end for rewriting local image references.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{
  Layer, Registry, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt,
};

use html_local_src::host::{document_base_uri, vault_root_base_uri};
use html_local_src::markdown::render_markdown_note;
use html_local_src::{
  HtmlFragment, ImageSrcProcessor, Resolution, Resolver, ResolverConfig, StaticWorkspace,
};

#[derive(Debug, Parser)]
#[command(
  name = "html-local-src",
  version,
  about = "Rewrite local image references into sandbox resource URIs"
)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Rewrite every image in an HTML (or markdown) file and print the result.
  Rewrite {
    /// File to read.
    input: PathBuf,
    #[command(flatten)]
    roots: RootArgs,
    /// Treat the input as a markdown note and render it before rewriting.
    #[arg(long)]
    markdown: bool,
    /// Print the rewrite report as JSON on stderr.
    #[arg(long)]
    report: bool,
  },
  /// Resolve a single image source and print the result.
  Resolve {
    /// Image `src` value.
    src: String,
    #[command(flatten)]
    roots: RootArgs,
  },
}

#[derive(Debug, Args)]
struct RootArgs {
  /// Raw resource path of the active document, as returned by the host.
  #[arg(long)]
  document_uri: Option<String>,
  /// Raw resource path of the vault root, as returned by the host.
  #[arg(long)]
  vault_uri: String,
  /// Configuration file; defaults to discovery in the current directory.
  #[arg(long)]
  config: Option<PathBuf>,
}

impl RootArgs {
  fn load_config(&self) -> Result<ResolverConfig> {
    match &self.config {
      Some(path) => ResolverConfig::load_from_path(path)
        .with_context(|| format!("failed to load configuration from {}", path.display())),
      None => Ok(ResolverConfig::discover(Path::new("."))),
    }
  }

  fn workspace(&self) -> StaticWorkspace {
    StaticWorkspace::new(self.document_uri.clone(), self.vault_uri.clone())
  }
}

fn main() -> Result<()> {
  install_tracing();
  let cli = Cli::parse();

  match cli.command {
    Command::Rewrite {
      input,
      roots,
      markdown,
      report,
    } => {
      let config = roots.load_config()?;
      let content = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
      let processor = ImageSrcProcessor::new(roots.workspace(), &config);

      let (html, summary) = if markdown {
        let note = render_markdown_note(&content, &processor);
        (note.html, note.report)
      } else {
        let mut fragment = HtmlFragment::new(content);
        let summary = processor.post_process(&mut fragment);
        (fragment.into_html(), summary)
      };

      print!("{html}");
      if report {
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
      }
    }
    Command::Resolve { src, roots } => {
      let config = roots.load_config()?;
      let Some(document) = roots.document_uri.as_deref() else {
        tracing::debug!("no active document, leaving source unchanged");
        println!("{src}");
        return Ok(());
      };

      let resolver = Resolver::new(config.path_policy);
      let resolution = resolver.resolve(
        Some(src.as_str()),
        &document_base_uri(document),
        &vault_root_base_uri(&roots.vault_uri),
      );
      match resolution {
        Resolution::Resolved(uri) => println!("{uri}"),
        Resolution::Unchanged => println!("{src}"),
      }
    }
  }

  Ok(())
}

fn install_tracing() {
  let rust_log_var = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
  let log_filter = Targets::from_str(&rust_log_var)
    .unwrap_or_else(|_| Targets::new().with_default(tracing::Level::WARN));

  let layer = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(true)
    .without_time();

  Registry::default()
    .with(layer.with_filter(log_filter))
    .init();
}
