use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Platform path semantics used to decide whether a local reference is absolute.
///
/// The policy is configured explicitly rather than detected from the running platform, so
/// a vault renders the same way wherever the rewriter happens to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsolutePathPolicy {
    /// Only a leading `/` marks an absolute path. Backslashes are ordinary characters.
    #[default]
    Posix,
    /// A leading `/` or `\`, or a drive letter such as `C:\` or `C:/`, marks an absolute
    /// path. Backslashes are treated as separators.
    Windows,
}

impl AbsolutePathPolicy {
    /// Returns `true` when `value` is an absolute filesystem-style path under this policy.
    pub fn is_absolute(self, value: &str) -> bool {
        match self {
            Self::Posix => value.starts_with('/'),
            Self::Windows => {
                value.starts_with('/') || value.starts_with('\\') || has_drive_root(value)
            }
        }
    }

    /// Rewrite native separators into `/` so the value can be joined onto a URI path.
    pub fn normalise_separators(self, value: &str) -> String {
        match self {
            Self::Posix => value.to_string(),
            Self::Windows => value.replace('\\', "/"),
        }
    }

    fn recognises_drive_letters(self) -> bool {
        matches!(self, Self::Windows)
    }
}

fn has_drive_root(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'/' | b'\\')
}

fn url_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*:").expect("invalid scheme regex"),
                Regex::new(r"(?i)^//(?:localhost(?:[:/?#]\S*)?$|[^\s./]+\.\S{2,}$)")
                    .expect("invalid protocol-relative regex"),
            ]
        })
        .as_slice()
}

/// Determine whether an image reference is already a complete URL.
///
/// Anything carrying a scheme (`https:`, `app:`, `data:`, ...) counts, as do
/// protocol-relative references to a host name. Under a policy that recognises drive letters a
/// single-letter "scheme" is a drive, so `C:/img.png` is a local path rather than a URL.
pub fn is_absolute_url(value: &str, policy: AbsolutePathPolicy) -> bool {
    if policy.recognises_drive_letters() && looks_like_drive(value) {
        return false;
    }

    url_patterns().iter().any(|pattern| pattern.is_match(value))
}

fn looks_like_drive(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
