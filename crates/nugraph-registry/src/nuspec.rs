//! `.nuspec` parsing: package id, version, authors and dependency groups.

use std::collections::HashSet;

use nugraph_core::identity::PackageIdentity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A parsed `.nuspec` manifest (only the parts the resolver needs).
#[derive(Debug, Clone, Default)]
pub struct Nuspec {
    pub id: Option<String>,
    pub version: Option<String>,
    pub authors: Vec<String>,
    pub dependency_groups: Vec<DependencyGroup>,
}

/// Dependencies declared for one target framework, or for all of them when
/// `target_framework` is `None` (flat `<dependency>` lists and unqualified groups).
#[derive(Debug, Clone, Default)]
pub struct DependencyGroup {
    pub target_framework: Option<String>,
    pub dependencies: Vec<NuspecDependency>,
}

/// A `<dependency id="…" version="…"/>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuspecDependency {
    pub id: String,
    pub version: Option<String>,
}

impl Nuspec {
    /// Direct dependencies as identities, in declaration order, de-duplicated.
    ///
    /// With a `framework` filter only framework-agnostic groups and groups whose
    /// target framework matches (case-insensitively) are followed; without
    /// one, every group contributes.
    pub fn dependencies_for(&self, framework: Option<&str>) -> Vec<PackageIdentity> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for group in &self.dependency_groups {
            let included = match (framework, group.target_framework.as_deref()) {
                (None, _) | (_, None) => true,
                (Some(want), Some(have)) => want.eq_ignore_ascii_case(have),
            };
            if !included {
                continue;
            }
            for dep in &group.dependencies {
                let id = PackageIdentity::new(&dep.id, dep.version.as_deref().unwrap_or(""));
                if seen.insert(id.clone()) {
                    out.push(id);
                }
            }
        }
        out
    }
}

/// Parse nuspec XML into a [`Nuspec`].
///
/// Fails on malformed XML or when the document has no `package>metadata>id`.
pub fn parse_nuspec(xml: &str) -> miette::Result<Nuspec> {
    let xml = xml.trim_start_matches('\u{feff}');
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut spec = Nuspec::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();
    let mut current_group: Option<DependencyGroup> = None;
    let mut flat = DependencyGroup::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = local_name(e);
                path.push(tag);
                text_buf.clear();
                handle_element(e, &path, &mut current_group, &mut flat)?;
            }
            Ok(Event::Empty(ref e)) => {
                path.push(local_name(e));
                handle_element(e, &path, &mut current_group, &mut flat)?;
                if path_context(&path) == "package>metadata>dependencies>group" {
                    if let Some(group) = current_group.take() {
                        spec.dependency_groups.push(group);
                    }
                }
                path.pop();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e
                    .unescape()
                    .map_err(|err| nugraph_util::errors::NugraphError::Registry {
                        message: format!("Bad text in nuspec: {err}"),
                    })?
                    .to_string();
            }
            Ok(Event::End(_)) => {
                match path_context(&path).as_str() {
                    "package>metadata>id" => spec.id = Some(text_buf.trim().to_string()),
                    "package>metadata>version" => {
                        spec.version = Some(text_buf.trim().to_string());
                    }
                    "package>metadata>authors" => {
                        spec.authors = text_buf
                            .split(',')
                            .map(str::trim)
                            .filter(|a| !a.is_empty())
                            .map(str::to_string)
                            .collect();
                    }
                    "package>metadata>dependencies>group" => {
                        if let Some(group) = current_group.take() {
                            spec.dependency_groups.push(group);
                        }
                    }
                    _ => {}
                }
                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(nugraph_util::errors::NugraphError::Registry {
                    message: format!("Failed to parse nuspec XML: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    if !flat.dependencies.is_empty() {
        spec.dependency_groups.insert(0, flat);
    }

    match spec.id.as_deref() {
        Some(id) if !id.is_empty() => Ok(spec),
        _ => Err(nugraph_util::errors::NugraphError::Registry {
            message: "nuspec has no <id>".to_string(),
        }
        .into()),
    }
}

/// Open a `<group>` or record a `<dependency>` at the current path.
fn handle_element(
    e: &BytesStart<'_>,
    path: &[String],
    current_group: &mut Option<DependencyGroup>,
    flat: &mut DependencyGroup,
) -> miette::Result<()> {
    match path_context(path).as_str() {
        "package>metadata>dependencies>group" => {
            *current_group = Some(DependencyGroup {
                target_framework: attribute(e, "targetFramework")?,
                dependencies: Vec::new(),
            });
        }
        "package>metadata>dependencies>group>dependency" => {
            if let Some(dep) = dependency(e)? {
                if let Some(group) = current_group.as_mut() {
                    group.dependencies.push(dep);
                }
            }
        }
        "package>metadata>dependencies>dependency" => {
            if let Some(dep) = dependency(e)? {
                flat.dependencies.push(dep);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Dependencies without an `id` cannot be keyed and are skipped.
fn dependency(e: &BytesStart<'_>) -> miette::Result<Option<NuspecDependency>> {
    let Some(id) = attribute(e, "id")?.filter(|id| !id.is_empty()) else {
        tracing::debug!("skipping <dependency> without id");
        return Ok(None);
    };
    Ok(Some(NuspecDependency {
        id,
        version: attribute(e, "version")?,
    }))
}

fn attribute(e: &BytesStart<'_>, name: &str) -> miette::Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| nugraph_util::errors::NugraphError::Registry {
            message: format!("Bad attribute in nuspec: {err}"),
        })?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| nugraph_util::errors::NugraphError::Registry {
                    message: format!("Bad attribute value in nuspec: {err}"),
                })?;
            return Ok(Some(value.trim().to_string()));
        }
    }
    Ok(None)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn path_context(path: &[String]) -> String {
    path.join(">")
}
