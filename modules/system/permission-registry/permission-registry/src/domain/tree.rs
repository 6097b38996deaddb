//! Path-segment tree of permissions.
//!
//! The tree is persistent: a write clones the spine from the root down to the
//! touched node and publishes the new root atomically. Readers load the root
//! once and never observe a partially linked node. Writers are serialized.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use permission_registry_sdk::{ANY_METHOD, Permission, method_key};

use super::path::{DYNAMIC_SEGMENT, path_segments, segment_key};

#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<String, Arc<Node>>,
    method_permissions: HashMap<String, Arc<Permission>>,
}

pub struct PermissionTree {
    root: ArcSwap<Node>,
    writer: Mutex<()>,
    len: AtomicUsize,
}

impl PermissionTree {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: ArcSwap::from_pointee(Node::default()),
            writer: Mutex::new(()),
            len: AtomicUsize::new(0),
        }
    }

    /// Insert `permission` at its path under its method key.
    ///
    /// The path is expected in absolute form. Returns the permission previously
    /// stored at the same path and method, which is replaced.
    pub fn add_permission(&self, permission: Permission) -> Option<Permission> {
        let keys: Vec<String> = path_segments(&permission.path)
            .map(|s| segment_key(s).to_owned())
            .collect();
        let method = permission.method_key();

        let _writer = self.writer.lock();
        let current = self.root.load_full();
        let (root, previous) =
            with_permission(Some(current.as_ref()), &keys, method, Arc::new(permission));
        self.root.store(Arc::new(root));

        if previous.is_none() {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        previous.map(Arc::unwrap_or_clone)
    }

    /// Permission governing `url` for `http_method`.
    ///
    /// Literal segments are preferred over templates. At the matched node the
    /// method entry is preferred over the any-method entry; without a method
    /// only the any-method entry matches.
    #[must_use]
    pub fn get_permission(&self, url: &str, http_method: Option<&str>) -> Option<Permission> {
        let segments: Vec<&str> = path_segments(url).collect();
        let method = method_key(http_method);
        let root = self.root.load();

        find(&root, &segments, &method).map(|p| p.as_ref().clone())
    }

    /// Number of stored permissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PermissionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PermissionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionTree")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Copy of `node` (or a new node) with `permission` stored below it at `keys`.
fn with_permission(
    node: Option<&Node>,
    keys: &[String],
    method: String,
    permission: Arc<Permission>,
) -> (Node, Option<Arc<Permission>>) {
    let mut updated = node.cloned().unwrap_or_default();
    let previous = match keys.split_first() {
        None => updated.method_permissions.insert(method, permission),
        Some((head, rest)) => {
            let (child, previous) = with_permission(
                updated.children.get(head).map(Arc::as_ref),
                rest,
                method,
                permission,
            );
            updated.children.insert(head.clone(), Arc::new(child));
            previous
        }
    };
    (updated, previous)
}

fn find<'a>(node: &'a Node, segments: &[&str], method: &str) -> Option<&'a Arc<Permission>> {
    let Some((head, rest)) = segments.split_first() else {
        return node
            .method_permissions
            .get(method)
            .or_else(|| node.method_permissions.get(ANY_METHOD));
    };

    node.children
        .get(*head)
        .and_then(|child| find(child, rest, method))
        .or_else(|| {
            node.children
                .get(DYNAMIC_SEGMENT)
                .and_then(|child| find(child, rest, method))
        })
}
