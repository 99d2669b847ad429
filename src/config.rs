//! Resolver configuration loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::uri::AbsolutePathPolicy;

/// Configuration file name searched for by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "html-local-src.config.json";

/// Attribute that receives the resolved URI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteTarget {
  /// Write `srcset`, which the renderer prefers over `src`, keeping the authored `src`.
  #[default]
  Srcset,
  /// Overwrite `src`.
  Src,
}

impl RewriteTarget {
  /// HTML attribute name written by this target.
  pub fn attribute_name(self) -> &'static str {
    match self {
      Self::Srcset => "srcset",
      Self::Src => "src",
    }
  }
}

/// Immutable settings shared by every rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
  /// Rules deciding whether a local reference is an absolute path.
  pub path_policy: AbsolutePathPolicy,
  /// Attribute the resolved URI is written to.
  pub rewrite_target: RewriteTarget,
  /// Quiet interval, in milliseconds, before an editor change triggers a re-scan.
  pub debounce_ms: u64,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      path_policy: AbsolutePathPolicy::default(),
      rewrite_target: RewriteTarget::default(),
      debounce_ms: 100,
    }
  }
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
  /// Failed to read the configuration file.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl ResolverConfig {
  /// Look for [`DEFAULT_CONFIG_FILE`] in `dir`.
  ///
  /// A missing or unreadable file yields the defaults, so a rewrite pass can always run.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::load_from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        tracing::warn!("{err}; falling back to default configuration");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file, using defaults when it does not exist.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(ConfigError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
      path: path.to_path_buf(),
      source: err,
    })
  }

  /// Debounce interval as a [`Duration`].
  pub fn debounce_delay(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}
