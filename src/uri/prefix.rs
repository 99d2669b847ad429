/// Return the scheme-and-separator prefix of a URI, up to and including the first `//`.
///
/// Inputs without a `//` yield an empty prefix instead of an error so that callers can still
/// join the remainder into a usable, if schemeless, path.
pub fn get_uri_prefix(uri: &str) -> &str {
    match uri.find("//") {
        Some(index) => &uri[..index + 2],
        None => "",
    }
}

/// Split a root URI into its prefix (see [`get_uri_prefix`]) and the resource path after it.
pub fn split_root_uri(uri: &str) -> (&str, &str) {
    let prefix = get_uri_prefix(uri);
    (prefix, &uri[prefix.len()..])
}
