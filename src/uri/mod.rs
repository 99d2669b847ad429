//! Helpers for splitting, joining and encoding resource URIs.
//!
//! The responsibilities are split into focused submodules so that classifying references,
//! splitting a root URI into its scheme prefix, joining path segments and re-encoding local
//! references can each be tested on their own. Everything in here is a pure string
//! transformation and never fails.

mod encoding;
mod filters;
mod join;
mod prefix;

pub use encoding::reencode_reference;
pub use filters::{AbsolutePathPolicy, is_absolute_url};
pub use join::join_path;
pub use prefix::{get_uri_prefix, split_root_uri};
