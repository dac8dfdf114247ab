use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::core::TargetId;

struct Entry<T> {
    target: T,
    parent: Option<TargetId>,
}

/// Explicit id -> render target registry supplied by the host.
///
/// Targets are registered with an optional parent so lookups can be scoped to a subtree (for
/// example one mounted page section) without any tree-query mechanism.
pub struct TargetRegistry<T> {
    entries: BTreeMap<TargetId, Entry<T>>,
}

impl<T> Default for TargetRegistry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> fmt::Debug for TargetRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

impl<T> TargetRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level target, returning the one it replaced.
    pub fn register(&mut self, id: TargetId, target: T) -> Option<T> {
        self.insert(id, None, target)
    }

    /// Register a target nested under `parent`.
    pub fn register_child(&mut self, id: TargetId, parent: TargetId, target: T) -> Option<T> {
        self.insert(id, Some(parent), target)
    }

    fn insert(&mut self, id: TargetId, parent: Option<TargetId>, target: T) -> Option<T> {
        self.entries
            .insert(id, Entry { target, parent })
            .map(|e| e.target)
    }

    pub fn unregister(&mut self, id: &TargetId) -> Option<T> {
        self.entries.remove(id).map(|e| e.target)
    }

    pub fn get(&self, id: &TargetId) -> Option<&T> {
        self.entries.get(id).map(|e| &e.target)
    }

    pub fn get_mut(&mut self, id: &TargetId) -> Option<&mut T> {
        self.entries.get_mut(id).map(|e| &mut e.target)
    }

    pub fn contains(&self, id: &TargetId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TargetId> {
        self.entries.keys()
    }

    /// `true` when `id` is `root` or registered somewhere below it.
    pub fn is_within(&self, id: &TargetId, root: &TargetId) -> bool {
        let mut cur = Some(id);
        // Bounded walk: a malformed parent cycle cannot loop forever.
        for _ in 0..=self.entries.len() {
            let Some(c) = cur else {
                return false;
            };
            if c == root {
                return true;
            }
            cur = self.entries.get(c).and_then(|e| e.parent.as_ref());
        }
        false
    }

    /// Resolve `id`, optionally restricted to the subtree at `root`.
    pub fn resolve(&self, id: &TargetId, root: Option<&TargetId>) -> Option<&T> {
        if let Some(root) = root {
            if !self.is_within(id, root) {
                return None;
            }
        }
        self.get(id)
    }

    /// Mutable variant of [`TargetRegistry::resolve`].
    pub fn resolve_mut(&mut self, id: &TargetId, root: Option<&TargetId>) -> Option<&mut T> {
        if let Some(root) = root {
            if !self.is_within(id, root) {
                return None;
            }
        }
        self.get_mut(id)
    }
}
