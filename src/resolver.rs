//! Resolution of local image references into URIs the rendering sandbox can load.

use crate::models::{ImageReference, Resolution};
use crate::uri::{
  AbsolutePathPolicy, is_absolute_url, join_path, reencode_reference, split_root_uri,
};

/// Pure resolver turning image `src` values into sandbox-loadable resource URIs.
///
/// The resolver holds no state besides its path policy; every call is independent and
/// performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
  policy: AbsolutePathPolicy,
}

impl Resolver {
  /// Create a resolver using the given absolute-path policy.
  pub fn new(policy: AbsolutePathPolicy) -> Self {
    Self { policy }
  }

  /// Policy used to recognise absolute paths.
  pub fn policy(&self) -> AbsolutePathPolicy {
    self.policy
  }

  /// Classify an image `src` value.
  pub fn classify<'a>(&self, src: Option<&'a str>) -> ImageReference<'a> {
    match src {
      None | Some("") => ImageReference::Empty,
      Some(value) if is_absolute_url(value, self.policy) => ImageReference::Url(value),
      Some(value) if self.policy.is_absolute(value) => ImageReference::AbsolutePath(value),
      Some(value) => ImageReference::RelativePath(value),
    }
  }

  /// Resolve `src` against the active document's base URI or the vault root base URI.
  ///
  /// Absolute paths resolve against `vault_root_base_uri`, relative paths against
  /// `document_base_uri`. Empty references and complete URLs come back
  /// [`Resolution::Unchanged`].
  pub fn resolve(
    &self,
    src: Option<&str>,
    document_base_uri: &str,
    vault_root_base_uri: &str,
  ) -> Resolution {
    let (root, local_path) = match self.classify(src) {
      ImageReference::Empty | ImageReference::Url(_) => return Resolution::Unchanged,
      ImageReference::AbsolutePath(path) => (vault_root_base_uri, path),
      ImageReference::RelativePath(path) => (document_base_uri, path),
    };

    let (scheme, root_resource_path) = split_root_uri(root);
    let local_path = self.policy.normalise_separators(local_path);
    let encoded = reencode_reference(&local_path);

    Resolution::Resolved(format!("{scheme}{}", join_path(root_resource_path, &encoded)))
  }
}

/// Resolve `src` with the default [`AbsolutePathPolicy`].
pub fn resolve(
  src: Option<&str>,
  document_base_uri: &str,
  vault_root_base_uri: &str,
) -> Resolution {
  Resolver::default().resolve(src, document_base_uri, vault_root_base_uri)
}

#[cfg(test)]
mod tests {
  use super::*;

  const DOCUMENT: &str = "app://local/vault/Notes";
  const VAULT: &str = "app://local/vault";

  fn resolved(src: &str) -> String {
    resolve(Some(src), DOCUMENT, VAULT)
      .into_resolved()
      .expect("expected a rewritten uri")
  }

  #[test]
  fn leaves_empty_sources_alone() {
    assert_eq!(resolve(None, DOCUMENT, VAULT), Resolution::Unchanged);
    assert_eq!(resolve(Some(""), DOCUMENT, VAULT), Resolution::Unchanged);
  }

  #[test]
  fn leaves_urls_alone_regardless_of_roots() {
    for src in [
      "https://example.com/a.png",
      "app://local/vault/a.png",
      "data:image/png;base64,AAAA",
    ] {
      assert_eq!(resolve(Some(src), DOCUMENT, VAULT), Resolution::Unchanged);
      assert_eq!(resolve(Some(src), "", ""), Resolution::Unchanged);
    }
  }

  #[test]
  fn resolves_relative_paths_against_document_folder() {
    assert_eq!(
      resolved("img/plot 1.png"),
      "app://local/vault/Notes/img/plot%201.png"
    );
    let (scheme, path) = split_root_uri(DOCUMENT);
    assert_eq!(
      resolved("img/plot 1.png"),
      format!("{scheme}{}", join_path(path, &reencode_reference("img/plot 1.png")))
    );
  }

  #[test]
  fn resolves_absolute_paths_against_vault_root() {
    assert_eq!(resolved("/attachments/a.png"), "app://local/vault/attachments/a.png");
  }

  #[test]
  fn parent_segments_climb_out_of_document_folder() {
    assert_eq!(resolved("../shared/a.png"), "app://local/vault/shared/a.png");
  }

  #[test]
  fn already_encoded_references_resolve_identically() {
    for src in ["img/plot 1.png", "图片/示例 图.png", "café au lait.jpg"] {
      let encoded = reencode_reference(src);
      assert_eq!(resolved(&encoded), resolved(src), "{src}");
    }
  }

  #[test]
  fn schemeless_roots_still_join() {
    let result = resolve(Some("a.png"), "vault/Notes", "vault").into_resolved();
    assert_eq!(result.as_deref(), Some("vault/Notes/a.png"));
  }

  #[test]
  fn windows_policy_maps_drive_and_backslash_paths() {
    let resolver = Resolver::new(AbsolutePathPolicy::Windows);
    assert_eq!(resolver.policy(), AbsolutePathPolicy::Windows);
    assert_eq!(
      resolver.resolve(Some("\\img\\a b.png"), DOCUMENT, VAULT),
      Resolution::Resolved("app://local/vault/img/a%20b.png".into())
    );
    assert_eq!(
      resolver.resolve(Some("img\\a.png"), DOCUMENT, VAULT),
      Resolution::Resolved("app://local/vault/Notes/img/a.png".into())
    );
    assert!(resolver.classify(Some("C:\\img\\a.png")).is_local());
  }

  #[test]
  fn posix_policy_keeps_backslashes_literal() {
    assert_eq!(resolved("img\\a.png"), "app://local/vault/Notes/img%5Ca.png");
  }
}
