//! Domain models for the permission registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Method key matching any HTTP method.
pub const ANY_METHOD: &str = "*";

/// A permission declared for a URL pattern and HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Permission {
    /// Display name.
    pub name: String,

    /// URL pattern. Stored in absolute, normalized form once registered.
    pub path: String,

    /// HTTP method; `None` or `*` matches any method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Free-form attributes, opaque to the registry.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Permission {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            method: None,
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Key the permission is indexed under: the upper-cased method, or [`ANY_METHOD`].
    #[must_use]
    pub fn method_key(&self) -> String {
        method_key(self.method.as_deref())
    }
}

/// Normalize an optional HTTP method into an index key.
///
/// Absent, empty and `*` all map to [`ANY_METHOD`].
#[must_use]
pub fn method_key(method: Option<&str>) -> String {
    match method.map(str::trim) {
        None | Some("" | ANY_METHOD) => ANY_METHOD.to_owned(),
        Some(m) => m.to_ascii_uppercase(),
    }
}
