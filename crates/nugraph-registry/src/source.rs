//! The metadata source abstraction consumed by the resolver.

use std::fmt;

use async_trait::async_trait;
use nugraph_core::identity::PackageIdentity;
use nugraph_core::metadata::PackageMetadata;
use thiserror::Error;

use crate::nuspec::Nuspec;

/// What a source knows about one package: its metadata and direct dependencies.
#[derive(Debug, Clone)]
pub struct FetchedPackage {
    pub metadata: PackageMetadata,
    /// Direct dependencies in declaration order, without duplicates.
    pub dependencies: Vec<PackageIdentity>,
}

impl FetchedPackage {
    /// Build from a parsed nuspec, keeping the requested identity as the key.
    pub fn from_nuspec(id: &PackageIdentity, nuspec: &Nuspec, framework: Option<&str>) -> Self {
        let display_version = nuspec
            .version
            .clone()
            .unwrap_or_else(|| id.version().to_string());
        Self {
            metadata: PackageMetadata::new(id.clone(), display_version, nuspec.authors.clone()),
            dependencies: nuspec.dependencies_for(framework),
        }
    }
}

/// Why a single package could not be fetched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("package not found")]
    NotFound,

    #[error("network error: {message}")]
    Network { message: String },

    #[error("malformed package metadata: {message}")]
    Parse { message: String },

    #[error("local feed I/O error: {message}")]
    Io { message: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchFailureKind {
        match self {
            FetchError::NotFound => FetchFailureKind::NotFound,
            FetchError::Network { .. } => FetchFailureKind::Network,
            FetchError::Parse { .. } => FetchFailureKind::Parse,
            FetchError::Io { .. } => FetchFailureKind::Io,
        }
    }
}

/// Classification of a fetch failure, kept on unresolved graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchFailureKind {
    NotFound,
    Network,
    Parse,
    Io,
}

impl fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchFailureKind::NotFound => "not found",
            FetchFailureKind::Network => "network error",
            FetchFailureKind::Parse => "malformed manifest",
            FetchFailureKind::Io => "local I/O error",
        })
    }
}

/// A place package manifests come from.
///
/// Implementations own their retry and timeout policy; the resolver treats
/// every error as terminal for that one identity.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Short label for logs, e.g. the feed URL.
    fn describe(&self) -> String;

    async fn fetch(&self, id: &PackageIdentity) -> Result<FetchedPackage, FetchError>;
}
