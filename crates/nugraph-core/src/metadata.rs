//! Per-package descriptive metadata collected during resolution.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::identity::PackageIdentity;

/// Descriptive metadata for one resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub identity: PackageIdentity,
    /// Version as reported by the package's own manifest.
    pub display_version: String,
    pub authors: BTreeSet<String>,
}

impl PackageMetadata {
    pub fn new(
        identity: PackageIdentity,
        display_version: impl Into<String>,
        authors: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            identity,
            display_version: display_version.into(),
            authors: authors.into_iter().collect(),
        }
    }

    /// Fold another sighting of the same package into this one.
    ///
    /// Authors are unioned; the display version of the first sighting is kept.
    pub fn merge(&mut self, other: PackageMetadata) {
        self.authors.extend(other.authors);
    }

    /// Authors joined for display, in sorted order.
    pub fn authors_display(&self) -> String {
        self.authors.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Metadata for every identity that was fetched successfully.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: HashMap<PackageIdentity, PackageMetadata>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert metadata, merging with any existing entry for the same identity.
    pub fn record(&mut self, metadata: PackageMetadata) {
        match self.entries.get_mut(&metadata.identity) {
            Some(existing) => existing.merge(metadata),
            None => {
                self.entries.insert(metadata.identity.clone(), metadata);
            }
        }
    }

    pub fn get(&self, id: &PackageIdentity) -> Option<&PackageMetadata> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &PackageIdentity) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageMetadata> {
        self.entries.values()
    }
}
