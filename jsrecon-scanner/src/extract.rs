//! Endpoint extraction from raw script or page text.
//!
//! Candidates are quoted strings matching one of three alternatives, tried in
//! order: a scheme-qualified or protocol-relative URL, an absolute path, or a
//! bare filename ending in `.php`, `.json` or `.js`. Every candidate is
//! normalized into an absolute URL before it is returned.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// A normalized absolute URL discovered in script text.
pub type Endpoint = String;

/// Endpoints unique by exact string value. Sorted only when reported.
pub type EndpointSet = HashSet<Endpoint>;

const ENDPOINT_PATTERN: &str = r#"(?:"|')((?:[a-zA-Z]{1,10}://|//)[^"'\\]+|/[^"'\\]+|[a-zA-Z0-9_\-/.]+\.(?:php|json|js))(?:"|')"#;

static ENDPOINT_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(ENDPOINT_PATTERN));

/// Extract every endpoint referenced in `text`, resolved against `base_origin`.
///
/// A pattern failure is logged and yields an empty set.
pub fn extract(text: &str, base_origin: &str) -> EndpointSet {
    let regex = match ENDPOINT_REGEX.as_ref() {
        Ok(regex) => regex,
        Err(e) => {
            warn!("Endpoint pattern error: {}", e);
            return EndpointSet::new();
        }
    };

    let mut found = EndpointSet::new();

    for captures in regex.captures_iter(text) {
        if let Some(candidate) = captures.get(1) {
            let endpoint = normalize(candidate.as_str(), base_origin);
            debug!("Found endpoint: {}", endpoint);
            found.insert(endpoint);
        }
    }

    found
}

/// Turn a raw candidate into an absolute URL.
///
/// Bare filenames are forced onto the origin root, not the path of the script
/// they were found in.
pub fn normalize(candidate: &str, base_origin: &str) -> Endpoint {
    if candidate.starts_with("//") {
        format!("https:{}", candidate)
    } else if candidate.starts_with('/') {
        join_origin(base_origin, candidate)
    } else if !candidate.starts_with("http") {
        join_origin(base_origin, &format!("/{}", candidate))
    } else {
        candidate.to_string()
    }
}

/// Append an absolute `path` to the scheme and authority of `base_origin`.
///
/// Dot segments in the path are resolved and tab, CR and LF are dropped.
/// Nothing is percent-encoded: `/api/${id}` stays as written.
pub fn join_origin(base_origin: &str, path: &str) -> Endpoint {
    let path: String = path
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let split = path.find(['?', '#']).unwrap_or(path.len());
    let (path_part, suffix) = path.split_at(split);

    format!(
        "{}{}{}",
        origin_root(base_origin),
        remove_dot_segments(path_part),
        suffix
    )
}

/// `scheme://authority` of `base_origin`, without any path.
fn origin_root(base_origin: &str) -> &str {
    let authority_start = base_origin.find("://").map(|idx| idx + 3).unwrap_or(0);
    match base_origin[authority_start..].find('/') {
        Some(slash) => &base_origin[..authority_start + slash],
        None => base_origin,
    }
}

/// Resolve `.` and `..` segments of an absolute path. Empty segments are kept.
fn remove_dot_segments(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let mut resolved: Vec<&str> = Vec::with_capacity(segments.len());

    for segment in &segments {
        match *segment {
            ".." => {
                resolved.pop();
            }
            "." => {}
            other => resolved.push(other),
        }
    }
    if matches!(segments.last(), Some(&".") | Some(&"..")) {
        resolved.push("");
    }

    let joined = resolved.join("/");
    if joined.starts_with('/') {
        joined
    } else {
        format!("/{}", joined)
    }
}
