//! Permission path normalization.
//!
//! Insertion and lookup both split paths with [`path_segments`], so a path
//! registered in any spelling is found under every other spelling of it.

/// Tree key shared by all path-template segments.
pub const DYNAMIC_SEGMENT: &str = "*";

/// Non-empty segments of `path`, ignoring any query string or fragment.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Absolute form of a permission path: leading `/`, no trailing or repeated
/// separators, no query string. The empty path becomes `/`.
///
/// Idempotent.
#[must_use]
pub fn absolute_permission_path(path: &str) -> String {
    let mut absolute = String::with_capacity(path.len() + 1);
    for segment in path_segments(path) {
        absolute.push('/');
        absolute.push_str(segment);
    }
    if absolute.is_empty() {
        absolute.push('/');
    }
    absolute
}

/// Tree key for a segment of a registered path.
///
/// Templates (`{id}`, `:id`, `*`) all map to [`DYNAMIC_SEGMENT`].
#[must_use]
pub fn segment_key(segment: &str) -> &str {
    if is_template(segment) {
        DYNAMIC_SEGMENT
    } else {
        segment
    }
}

fn is_template(segment: &str) -> bool {
    segment == DYNAMIC_SEGMENT
        || (segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}'))
        || (segment.len() > 1 && segment.starts_with(':'))
}
