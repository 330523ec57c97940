//! Tracks identities already dispatched for resolution.

use std::collections::HashSet;

use nugraph_core::identity::PackageIdentity;

/// Identities that have been dispatched (not necessarily completed) during a
/// resolution run. Guards against cycles and repeated fetches of diamond
/// dependencies.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<PackageIdentity>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an identity as visited. Returns `false` if already visited.
    pub fn visit(&mut self, id: &PackageIdentity) -> bool {
        if self.visited.contains(id) {
            return false;
        }
        self.visited.insert(id.clone())
    }

    pub fn contains(&self, id: &PackageIdentity) -> bool {
        self.visited.contains(id)
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
