//! Value types produced while resolving and rewriting image references.

use serde::Serialize;

/// Classification of a single image `src` value, decided in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReference<'a> {
  /// No `src`, or an empty one.
  Empty,
  /// Already a complete URL, assumed to be loadable by the renderer as-is.
  Url(&'a str),
  /// Absolute filesystem-style path, resolved against the vault root.
  AbsolutePath(&'a str),
  /// Path relative to the folder of the active document.
  RelativePath(&'a str),
}

impl ImageReference<'_> {
  /// Returns `true` for references that need to be rewritten.
  pub fn is_local(&self) -> bool {
    matches!(self, Self::AbsolutePath(_) | Self::RelativePath(_))
  }
}

/// Outcome of resolving one image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// Leave the element alone.
  Unchanged,
  /// Sandbox-loadable URI that should replace the reference.
  Resolved(String),
}

impl Resolution {
  /// Return the rewritten URI, if any.
  pub fn into_resolved(self) -> Option<String> {
    match self {
      Self::Unchanged => None,
      Self::Resolved(uri) => Some(uri),
    }
  }

  /// Returns `true` when the reference was left untouched.
  pub fn is_unchanged(&self) -> bool {
    matches!(self, Self::Unchanged)
  }
}

/// Reason a whole rewrite pass was skipped before resolving anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
  /// No document is open, so relative references have nothing to resolve against.
  NoActiveDocument,
  /// The fragment contains no image elements.
  NoImages,
}

/// Summary of a single post-processing pass over a rendered fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteReport {
  /// Number of image elements found in the fragment.
  pub images_found: usize,
  /// Number of elements whose source was rewritten.
  pub rewritten: usize,
  /// Number of elements left untouched (no source, or already a URL).
  pub unchanged: usize,
  /// Set when the pass bailed out before visiting any element.
  pub skipped: Option<SkipReason>,
}

impl RewriteReport {
  pub(crate) fn skipped(images_found: usize, reason: SkipReason) -> Self {
    Self {
      images_found,
      skipped: Some(reason),
      ..Self::default()
    }
  }
}
