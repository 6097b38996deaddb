//! Process-wide cache of non-secured endpoints.
//!
//! Entries are normalized endpoint paths ending with `/`. On every miss the
//! deployment's configured suffix list is re-tokenized and inserted in full,
//! then the map is consulted again. Secured URIs therefore never become hits
//! and pay the expansion on each request.
//!
//! Entries are never evicted: growth is bounded by the number of suffixes
//! configured across all deployments.

use std::borrow::Cow;

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct NonSecuredEndpointCache {
    entries: DashMap<String, ()>,
}

impl NonSecuredEndpointCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `request_uri` is a non-secured endpoint of the deployment mounted at `context_path`.
    ///
    /// `configured` is the deployment's raw comma-separated suffix list. Empty
    /// tokens are skipped and tokens are not trimmed.
    pub fn is_non_secured(
        &self,
        request_uri: &str,
        context_path: &str,
        configured: Option<&str>,
    ) -> bool {
        let uri = with_trailing_separator(request_uri);
        if self.entries.contains_key(uri.as_ref()) {
            return true;
        }

        let Some(list) = configured.filter(|l| !l.is_empty()) else {
            return false;
        };

        for suffix in list.split(',').filter(|s| !s.is_empty()) {
            let endpoint = with_trailing_separator(&join_context(context_path, suffix)).into_owned();
            self.entries.insert(endpoint, ());
        }
        tracing::debug!(
            context_path,
            cached = self.entries.len(),
            "non-secured endpoints cached"
        );

        self.entries.contains_key(uri.as_ref())
    }

    #[must_use]
    pub fn contains(&self, endpoint: &str) -> bool {
        self.entries.contains_key(endpoint)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn with_trailing_separator(path: &str) -> Cow<'_, str> {
    if path.ends_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    }
}

fn join_context(context_path: &str, suffix: &str) -> String {
    if suffix.starts_with('/') || context_path.ends_with('/') {
        format!("{context_path}{suffix}")
    } else {
        format!("{context_path}/{suffix}")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn populates_all_entries_on_first_miss() {
        let cache = NonSecuredEndpointCache::new();

        assert!(cache.is_non_secured("/app/foo", "/app", Some("foo,bar")));
        assert!(cache.contains("/app/foo/"));
        assert!(cache.contains("/app/bar/"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn grants_only_configured_endpoints() {
        let cache = NonSecuredEndpointCache::new();

        assert!(cache.is_non_secured("/app/foo/", "/app", Some("foo,bar")));
        assert!(cache.is_non_secured("/app/bar/", "/app", Some("foo,bar")));
        assert!(!cache.is_non_secured("/app/baz/", "/app", Some("foo,bar")));
    }

    #[test]
    fn hit_does_not_need_configuration() {
        let cache = NonSecuredEndpointCache::new();
        assert!(cache.is_non_secured("/app/foo", "/app", Some("/foo")));

        assert!(cache.is_non_secured("/app/foo", "/app", None));
    }

    #[test]
    fn every_miss_re_expands_the_list() {
        let cache = NonSecuredEndpointCache::new();

        assert!(!cache.is_non_secured("/app/secure", "/app", Some("foo")));
        assert!(!cache.is_non_secured("/app/secure", "/app", Some("foo,qux")));

        assert!(cache.contains("/app/qux/"));
        assert!(!cache.contains("/app/secure/"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn empty_or_absent_list_is_a_miss() {
        let cache = NonSecuredEndpointCache::new();

        assert!(!cache.is_non_secured("/app/foo", "/app", None));
        assert!(!cache.is_non_secured("/app/foo", "/app", Some("")));
        assert!(cache.is_empty());
    }

    #[test]
    fn empty_tokens_are_skipped_and_entries_not_trimmed() {
        let cache = NonSecuredEndpointCache::new();

        assert!(!cache.is_non_secured("/app/x", "/app", Some(",, /foo,")));
        assert!(cache.contains("/app/ /foo/"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_first_misses_keep_every_entry() {
        let cache = Arc::new(NonSecuredEndpointCache::new());
        let suffixes = (0..64).map(|i| format!("e{i}")).collect::<Vec<_>>().join(",");

        let results: Vec<bool> = std::thread::scope(|s| {
            let handles: Vec<_> = ["/app/e0", "/app/e63"]
                .into_iter()
                .map(|uri| {
                    let cache = Arc::clone(&cache);
                    let suffixes = suffixes.as_str();
                    s.spawn(move || cache.is_non_secured(uri, "/app", Some(suffixes)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results, vec![true, true]);
        assert_eq!(cache.len(), 64);
        assert!((0..64).all(|i| cache.contains(&format!("/app/e{i}/"))));
    }
}
