//! Local feeds: directories of `.nupkg` archives, and nuspec extraction from
//! archives regardless of where they were downloaded from.

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nugraph_core::identity::PackageIdentity;
use nugraph_util::errors::NugraphError;

use crate::nuspec;
use crate::source::{FetchError, FetchedPackage, MetadataSource};
use crate::version;

/// Extract the `.nuspec` manifest stored at the root of a `.nupkg` archive.
pub fn read_nuspec_from_archive<R: Read + Seek>(reader: R) -> miette::Result<String> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| NugraphError::Registry {
        message: format!("Failed to open package archive: {e}"),
    })?;

    let entry_name = archive
        .file_names()
        .find(|name| !name.contains('/') && name.to_ascii_lowercase().ends_with(".nuspec"))
        .map(str::to_string)
        .ok_or_else(|| NugraphError::Registry {
            message: "package archive contains no .nuspec".to_string(),
        })?;

    let mut entry = archive
        .by_name(&entry_name)
        .map_err(|e| NugraphError::Registry {
            message: format!("Failed to read {entry_name}: {e}"),
        })?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| NugraphError::Registry {
            message: format!("Failed to read {entry_name}: {e}"),
        })?;
    Ok(xml)
}

/// Reads packages from a folder of `{id}.{version}.nupkg` files.
#[derive(Debug, Clone)]
pub struct LocalFeedSource {
    dir: PathBuf,
    framework: Option<String>,
}

impl LocalFeedSource {
    pub fn new(dir: &Path, framework: Option<String>) -> miette::Result<Self> {
        if !dir.is_dir() {
            return Err(NugraphError::Config {
                message: format!("local feed {} is not a directory", dir.display()),
            }
            .into());
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            framework,
        })
    }

    /// Find the archive for an identity, matching id and normalized version
    /// case-insensitively.
    fn find_archive(&self, id: &PackageIdentity) -> Result<Option<PathBuf>, FetchError> {
        let wanted = version::fetch_version(id.version())
            .map_err(|message| FetchError::Parse { message })?;
        let prefix = format!("{}.", id.lower_name());

        let entries = std::fs::read_dir(&self.dir).map_err(|e| FetchError::Io {
            message: format!("Failed to list {}: {e}", self.dir.display()),
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let lower = file_name.to_ascii_lowercase();
            let Some(stem) = lower.strip_suffix(".nupkg") else {
                continue;
            };
            let Some(ver) = stem.strip_prefix(&prefix) else {
                continue;
            };
            if version::normalize(ver) == wanted {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl MetadataSource for LocalFeedSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    async fn fetch(&self, id: &PackageIdentity) -> Result<FetchedPackage, FetchError> {
        let Some(path) = self.find_archive(id)? else {
            return Err(FetchError::NotFound);
        };
        tracing::debug!("reading {}", path.display());

        let file = std::fs::File::open(&path).map_err(|e| FetchError::Io {
            message: format!("Failed to open {}: {e}", path.display()),
        })?;
        let xml = read_nuspec_from_archive(file).map_err(|e| FetchError::Parse {
            message: e.to_string(),
        })?;
        let spec = nuspec::parse_nuspec(&xml).map_err(|e| FetchError::Parse {
            message: e.to_string(),
        })?;
        Ok(FetchedPackage::from_nuspec(
            id,
            &spec,
            self.framework.as_deref(),
        ))
    }
}
