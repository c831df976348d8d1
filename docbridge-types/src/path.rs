//! URL path joining.
//!
//! Service URLs in configuration may be absolute (`https://host/x`) or
//! relative to the host shell's origin (`movia/content`). Joining always
//! produces exactly one slash between segments; resolving against the origin
//! follows the URL standard.

use url::{ParseError, Url};

/// Joins two URL segments with exactly one `/` between them.
///
/// An empty segment on either side returns the other unchanged.
#[must_use]
pub fn join_with_slash(start: &str, end: &str) -> String {
    if start.is_empty() {
        return end.to_string();
    }
    if end.is_empty() {
        return start.to_string();
    }

    match (start.ends_with('/'), end.starts_with('/')) {
        (true, true) => format!("{start}{}", &end[1..]),
        (true, false) | (false, true) => format!("{start}{end}"),
        (false, false) => format!("{start}/{end}"),
    }
}

/// Joins a root URL with any number of path segments.
#[must_use]
pub fn slash<S: AsRef<str>>(root: &str, segments: &[S]) -> String {
    segments
        .iter()
        .fold(root.to_string(), |out, segment| join_with_slash(&out, segment.as_ref()))
}

/// Resolves `link` against `origin` the way a browser resolves a link.
///
/// Absolute and protocol-relative URLs replace the origin, root-relative
/// paths replace its path, and anything else is resolved against its path.
pub fn resolve_url(origin: &str, link: &str) -> Result<String, ParseError> {
    Ok(Url::parse(origin)?.join(link)?.into())
}
