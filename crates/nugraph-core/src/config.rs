//! `nugraph.toml` configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use nugraph_util::errors::NugraphError;

use crate::identity::PackageIdentity;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "nugraph.toml";

/// NuGet v3 flat-container base URL.
pub const NUGET_FLAT_CONTAINER_URL: &str = "https://api.nuget.org/v3-flatcontainer";

/// Run configuration loaded from `nugraph.toml`.
///
/// Every field is optional in the file; CLI flags fill in or override values
/// before [`Config::root`] and friends are consulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default, alias = "package_name")]
    pub package: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Rendered image path.
    #[serde(default, alias = "output_path")]
    pub output: Option<PathBuf>,

    /// PlantUML script path; defaults to `output` with a `.puml` extension.
    #[serde(default)]
    pub script: Option<PathBuf>,

    /// Path to `plantuml.jar`.
    #[serde(default, alias = "visualizer_path")]
    pub visualizer_path: Option<PathBuf>,

    #[serde(default)]
    pub java: Option<String>,

    #[serde(default)]
    pub format: Option<ImageFormat>,

    /// Only follow dependency groups for this target framework.
    #[serde(default)]
    pub framework: Option<String>,

    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Registry settings from `[registry]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryConfig {
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Read `.nupkg` archives from this directory instead of the network.
    #[serde(default)]
    pub local_feed: Option<PathBuf>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            local_feed: None,
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

fn default_registry_url() -> String {
    NUGET_FLAT_CONTAINER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

/// Image formats PlantUML can produce for us.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension, also the suffix of PlantUML's `-t` flag.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl Config {
    /// Load a config file. A missing file yields defaults.
    pub fn load(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| NugraphError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a config from TOML text.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            NugraphError::Config {
                message: format!("Failed to parse {CONFIG_FILE_NAME}: {e}"),
            }
            .into()
        })
    }

    /// The validated root identity.
    pub fn root(&self) -> miette::Result<PackageIdentity> {
        let name = self.package.as_deref().ok_or_else(|| NugraphError::Config {
            message: "`package` is not set".to_string(),
        })?;
        let version = self.version.as_deref().ok_or_else(|| NugraphError::Config {
            message: "`version` is not set".to_string(),
        })?;
        PackageIdentity::root(name, version)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(crate::DEFAULT_MAX_DEPTH)
    }

    pub fn format(&self) -> ImageFormat {
        self.format.unwrap_or_default()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("dependencies.{}", self.format().extension())))
    }

    pub fn script_path(&self) -> PathBuf {
        self.script
            .clone()
            .unwrap_or_else(|| self.output_path().with_extension("puml"))
    }

    pub fn java(&self) -> &str {
        self.java.as_deref().unwrap_or("java")
    }

    /// Path to `plantuml.jar`, required only when rendering.
    pub fn visualizer_path(&self) -> miette::Result<&Path> {
        self.visualizer_path.as_deref().ok_or_else(|| {
            NugraphError::Config {
                message: "`visualizer-path` is not set".to_string(),
            }
            .into()
        })
    }
}
