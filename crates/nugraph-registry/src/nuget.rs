//! Metadata source backed by a NuGet v3 flat-container feed.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use nugraph_core::config::Config;
use nugraph_core::identity::PackageIdentity;
use reqwest::Client;

use crate::download;
use crate::local::read_nuspec_from_archive;
use crate::nuspec;
use crate::repository::NuGetFeed;
use crate::source::{FetchError, FetchedPackage, MetadataSource};
use crate::version;

/// Fetches `.nuspec` manifests over HTTP, falling back to the `.nupkg`
/// archive when a feed does not serve bare manifests.
pub struct NuGetSource {
    client: Client,
    feed: NuGetFeed,
    retries: u32,
    framework: Option<String>,
}

impl NuGetSource {
    pub fn new(client: Client, feed: NuGetFeed, retries: u32, framework: Option<String>) -> Self {
        Self {
            client,
            feed,
            retries,
            framework,
        }
    }

    /// Build from the run configuration.
    pub fn from_config(config: &Config) -> miette::Result<Self> {
        let client = download::build_client(Duration::from_secs(config.registry.timeout_secs))?;
        Ok(Self::new(
            client,
            NuGetFeed::from_config(&config.registry),
            config.registry.retries,
            config.framework.clone(),
        ))
    }

    async fn fetch_nuspec(&self, lower_id: &str, version: &str) -> Result<String, FetchError> {
        let url = self.feed.nuspec_url(lower_id, version);
        tracing::debug!("GET {url}");
        match download::download_text(&self.client, &self.feed, &url, self.retries).await {
            Ok(Some(xml)) => return Ok(xml),
            Ok(None) => {}
            Err(e) => {
                return Err(FetchError::Network {
                    message: e.to_string(),
                })
            }
        }

        let url = self.feed.nupkg_url(lower_id, version);
        tracing::debug!("nuspec missing, trying archive {url}");
        match download::download_bytes(&self.client, &self.feed, &url, self.retries).await {
            Ok(Some(bytes)) => {
                read_nuspec_from_archive(Cursor::new(bytes)).map_err(|e| FetchError::Parse {
                    message: e.to_string(),
                })
            }
            Ok(None) => Err(FetchError::NotFound),
            Err(e) => Err(FetchError::Network {
                message: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl MetadataSource for NuGetSource {
    fn describe(&self) -> String {
        self.feed.url.clone()
    }

    async fn fetch(&self, id: &PackageIdentity) -> Result<FetchedPackage, FetchError> {
        let version =
            version::fetch_version(id.version()).map_err(|message| FetchError::Parse { message })?;
        let xml = self.fetch_nuspec(&id.lower_name(), &version).await?;
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
