/// Join two path fragments with exactly one `/` between them and normalise the result.
///
/// Repeated separators collapse, `.` segments are dropped and `..` segments consume the
/// previous segment (never climbing above an absolute root). A trailing separator on the
/// joined value is preserved and an empty result becomes `.`.
pub fn join_path(base: &str, tail: &str) -> String {
    let joined = match (base.is_empty(), tail.is_empty()) {
        (true, true) => return ".".to_string(),
        (false, true) => base.to_string(),
        (true, false) => tail.to_string(),
        (false, false) => format!("{base}/{tail}"),
    };

    normalise(&joined)
}

fn normalise(path: &str) -> String {
    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    if absolute {
        if body.is_empty() {
            return "/".to_string();
        }
        let mut result = format!("/{body}");
        if trailing {
            result.push('/');
        }
        return result;
    }

    let mut result = if body.is_empty() {
        ".".to_string()
    } else {
        body
    };
    if trailing {
        result.push('/');
    }
    result
}
