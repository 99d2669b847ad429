//! Host workspace accessors and the rules for deriving resource roots from them.

/// Access to the raw resource paths the host application hands out.
///
/// Implementations return whatever the host's resource accessor produces; the trimming
/// rules in [`document_base_uri`] and [`vault_root_base_uri`] turn those into base URIs.
pub trait HostWorkspace {
  /// Raw resource path of the currently active document, or `None` when nothing is open.
  fn active_document_resource_path(&self) -> Option<String>;

  /// Raw resource path of the vault root.
  fn vault_resource_path(&self) -> String;
}

impl<T: HostWorkspace + ?Sized> HostWorkspace for &T {
  fn active_document_resource_path(&self) -> Option<String> {
    (**self).active_document_resource_path()
  }

  fn vault_resource_path(&self) -> String {
    (**self).vault_resource_path()
  }
}

/// Derive the base URI of the folder holding a document from its raw resource path.
///
/// Any query string is dropped first, then the last path segment.
pub fn document_base_uri(raw: &str) -> String {
  let without_query = strip_query(raw);
  match without_query.rfind('/') {
    Some(index) => without_query[..index].to_string(),
    None => without_query.to_string(),
  }
}

/// Derive the vault root base URI from the raw resource path of the vault root.
///
/// Everything from the first `?` onward is dropped; the path itself is kept intact.
pub fn vault_root_base_uri(raw: &str) -> String {
  strip_query(raw).to_string()
}

fn strip_query(raw: &str) -> &str {
  raw.split_once('?').map(|(head, _)| head).unwrap_or(raw)
}

/// Base URIs a rewrite pass resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoots {
  /// Base URI of the active document's folder.
  pub document_base_uri: String,
  /// Base URI of the vault root.
  pub vault_root_base_uri: String,
}

impl ResourceRoots {
  /// Read both roots from the host, or `None` when no document is active.
  pub fn from_host<H: HostWorkspace + ?Sized>(host: &H) -> Option<Self> {
    let document = host.active_document_resource_path()?;
    Some(Self {
      document_base_uri: document_base_uri(&document),
      vault_root_base_uri: vault_root_base_uri(&host.vault_resource_path()),
    })
  }
}

/// Host workspace backed by fixed raw resource paths.
#[derive(Debug, Clone, Default)]
pub struct StaticWorkspace {
  /// Raw resource path of the active document.
  pub active_document: Option<String>,
  /// Raw resource path of the vault root.
  pub vault_root: String,
}

impl StaticWorkspace {
  /// Create a workspace from raw accessor results.
  pub fn new(active_document: Option<impl Into<String>>, vault_root: impl Into<String>) -> Self {
    Self {
      active_document: active_document.map(Into::into),
      vault_root: vault_root.into(),
    }
  }
}

impl HostWorkspace for StaticWorkspace {
  fn active_document_resource_path(&self) -> Option<String> {
    self.active_document.clone()
  }

  fn vault_resource_path(&self) -> String {
    self.vault_root.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn document_base_drops_query_and_last_segment() {
    assert_eq!(
      document_base_uri("app://local/vault/Notes/Chapter1?ts=1"),
      "app://local/vault/Notes"
    );
    assert_eq!(
      document_base_uri("app://local/vault/Notes/Chapter1.md?1700000000"),
      "app://local/vault/Notes"
    );
  }

  #[test]
  fn document_base_ignores_slashes_inside_query() {
    assert_eq!(
      document_base_uri("app://local/vault/Note.md?v=a/b"),
      "app://local/vault"
    );
  }

  #[test]
  fn vault_root_drops_only_the_query() {
    assert_eq!(vault_root_base_uri("app://local/vault?auth=xyz"), "app://local/vault");
    assert_eq!(vault_root_base_uri("app://local/vault/?a=1?b=2"), "app://local/vault/");
    assert_eq!(vault_root_base_uri("app://local/vault"), "app://local/vault");
  }

  #[test]
  fn roots_are_absent_without_active_document() {
    let host = StaticWorkspace::new(None::<String>, "app://local/vault?auth=xyz");
    assert_eq!(ResourceRoots::from_host(&host), None);
  }

  #[test]
  fn roots_are_trimmed_from_host_paths() {
    let host = StaticWorkspace::new(
      Some("app://local/vault/Notes/Chapter1?ts=1"),
      "app://local/vault?auth=xyz",
    );
    assert_eq!(
      ResourceRoots::from_host(&host),
      Some(ResourceRoots {
        document_base_uri: "app://local/vault/Notes".into(),
        vault_root_base_uri: "app://local/vault".into(),
      })
    );
  }
}
