//! NuGet feed abstraction: flat-container URL layout and configuration.

use nugraph_core::config::RegistryConfig;

/// A configured NuGet v3 flat-container feed with optional credentials.
#[derive(Debug, Clone)]
pub struct NuGetFeed {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl NuGetFeed {
    /// Build a feed from the `[registry]` config section.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// Flat-container path for a package version.
    ///
    /// `Newtonsoft.Json` `13.0.1` becomes `newtonsoft.json/13.0.1`; both parts
    /// must already be lowercased and normalized.
    pub fn package_path(lower_id: &str, version: &str) -> String {
        format!("{lower_id}/{version}")
    }

    /// URL to the `.nuspec` manifest of a package version.
    pub fn nuspec_url(&self, lower_id: &str, version: &str) -> String {
        format!(
            "{}/{}/{lower_id}.nuspec",
            self.url,
            Self::package_path(lower_id, version)
        )
    }

    /// URL to the `.nupkg` archive of a package version.
    pub fn nupkg_url(&self, lower_id: &str, version: &str) -> String {
        format!(
            "{}/{}/{lower_id}.{version}.nupkg",
            self.url,
            Self::package_path(lower_id, version)
        )
    }

    /// Whether this feed has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nuspec_url_format() {
        let feed = NuGetFeed::from_config(&RegistryConfig::default());
        assert_eq!(
            feed.nuspec_url("newtonsoft.json", "13.0.1"),
            "https://api.nuget.org/v3-flatcontainer/newtonsoft.json/13.0.1/newtonsoft.json.nuspec"
        );
    }

    #[test]
    fn nupkg_url_format() {
        let feed = NuGetFeed::from_config(&RegistryConfig::default());
        assert!(feed
            .nupkg_url("serilog", "2.10.0")
            .ends_with("/serilog/2.10.0/serilog.2.10.0.nupkg"));
    }

    #[test]
    fn from_config_trims_slash() {
        let config = RegistryConfig {
            url: "https://nuget.example.com/flat/".to_string(),
            username: Some("user".to_string()),
            ..RegistryConfig::default()
        };
        let feed = NuGetFeed::from_config(&config);
        assert_eq!(feed.url, "https://nuget.example.com/flat");
        assert!(feed.has_auth());
    }
}
