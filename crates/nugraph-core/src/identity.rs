//! Package identity: the `(name, version)` pair keying a package in the graph.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use nugraph_util::errors::NugraphError;

/// A package identity.
///
/// Names compare case-insensitively (NuGet ids are case-insensitive); the
/// version string is compared exactly and may be an opaque range such as
/// `[1.0.0, 2.0.0)`.
#[derive(Debug, Clone, Serialize)]
pub struct PackageIdentity {
    name: String,
    version: String,
}

impl PackageIdentity {
    /// Build an identity, trimming surrounding whitespace from both parts.
    ///
    /// Never fails: dependencies with missing versions are still tracked with
    /// an empty version. Use [`PackageIdentity::root`] to validate user input.
    pub fn new(name: impl AsRef<str>, version: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            version: version.as_ref().trim().to_string(),
        }
    }

    /// Build and validate the identity resolution starts from.
    pub fn root(name: &str, version: &str) -> miette::Result<Self> {
        let id = Self::new(name, version);
        if id.name.is_empty() {
            return Err(NugraphError::InvalidIdentity {
                message: "package name is empty".to_string(),
            }
            .into());
        }
        if id.name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(NugraphError::InvalidIdentity {
                message: format!("package name `{}` contains whitespace", id.name),
            }
            .into());
        }
        Ok(id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Lowercased name, as used in registry URLs and equality.
    pub fn lower_name(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    /// Whether the version is an exact version rather than a range.
    pub fn is_exact(&self) -> bool {
        !self.version.is_empty()
            && !self
                .version
                .contains(|c: char| matches!(c, '[' | ']' | '(' | ')' | ',' | '*'))
    }
}

impl PartialEq for PackageIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name) && self.version == other.version
    }
}

impl Eq for PackageIdentity {}

impl Hash for PackageIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.name.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
        self.version.hash(state);
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.version)
        }
    }
}

/// Parse `Name@Version` or `Name/Version`.
impl FromStr for PackageIdentity {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = s
            .split_once('@')
            .or_else(|| s.split_once('/'))
            .ok_or_else(|| NugraphError::InvalidIdentity {
                message: format!("`{s}` is not of the form Name@Version"),
            })?;
        Self::root(name, version)
    }
}
