//! PlantUML object-diagram serialization.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use nugraph_core::identity::PackageIdentity;
use nugraph_core::metadata::MetadataTable;
use nugraph_resolver::graph::{DependencyGraph, NodeIndex, NodeStatus};

const ROOT_COLOR: &str = "#LightBlue";
const FRONTIER_COLOR: &str = "#LightGray";
const UNRESOLVED_COLOR: &str = "#Pink";

/// Serialization knobs.
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    /// Emit a `title` line naming the root package.
    pub title: bool,
    /// Lay the diagram out left to right instead of top down.
    pub left_to_right: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            title: true,
            left_to_right: false,
        }
    }
}

/// Serialize a resolved graph as a self-contained PlantUML document.
///
/// Nodes are declared in first-discovery order, followed by one `-->` edge
/// per dependency. Output depends only on the graph and metadata, so the
/// same resolution always produces the same bytes.
pub fn serialize(
    graph: &DependencyGraph,
    metadata: &MetadataTable,
    options: &DiagramOptions,
) -> String {
    let aliases = assign_aliases(graph);
    let mut out = String::from("@startuml\n");

    if options.left_to_right {
        out.push_str("left to right direction\n");
    }
    if options.title {
        if let Some(root) = graph.root() {
            let _ = writeln!(
                out,
                "title Dependencies of {}",
                escape(&graph.node(root).identity.to_string())
            );
        }
    }

    for (idx, node) in graph.nodes() {
        let alias = &aliases[&idx];
        let color = match node.status {
            NodeStatus::Frontier => Some(FRONTIER_COLOR),
            NodeStatus::Unresolved(_) => Some(UNRESOLVED_COLOR),
            _ if graph.root() == Some(idx) => Some(ROOT_COLOR),
            _ => None,
        };
        let _ = write!(
            out,
            "object \"{}\" as {alias}",
            escape(&node.identity.to_string())
        );
        if let Some(color) = color {
            let _ = write!(out, " {color}");
        }
        out.push('\n');

        match metadata.get(&node.identity) {
            Some(meta) => {
                let _ = writeln!(
                    out,
                    "{alias} : version = {}",
                    escape(&meta.display_version)
                );
                if !meta.authors.is_empty() {
                    let _ = writeln!(
                        out,
                        "{alias} : authors = {}",
                        escape(&meta.authors_display())
                    );
                }
            }
            None => {
                let note = node
                    .status
                    .note()
                    .unwrap_or_else(|| "unresolved (unknown)".to_string());
                let _ = writeln!(out, "{alias} : status = {}", escape(&note));
            }
        }
    }

    for (from, to) in graph.edges() {
        let _ = writeln!(out, "{} --> {}", aliases[&from], aliases[&to]);
    }

    out.push_str("@enduml\n");
    out
}

/// Give every node a unique PlantUML identifier built from its identity.
fn assign_aliases(graph: &DependencyGraph) -> HashMap<NodeIndex, String> {
    let mut used = HashSet::new();
    let mut aliases = HashMap::new();
    for (idx, node) in graph.nodes() {
        let base = alias_base(&node.identity);
        let mut alias = base.clone();
        let mut n = 1;
        while used.contains(&alias) {
            n += 1;
            alias = format!("{base}_{n}");
        }
        used.insert(alias.clone());
        aliases.insert(idx, alias);
    }
    aliases
}

/// `Newtonsoft.Json` `13.0.1` → `Newtonsoft_Json_13_0_1`.
fn alias_base(id: &PackageIdentity) -> String {
    let raw = if id.version().is_empty() {
        id.name().to_string()
    } else {
        format!("{}_{}", id.name(), id.version())
    };
    let mut alias: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if alias.starts_with(|c: char| c.is_ascii_digit()) || alias.is_empty() {
        alias.insert(0, '_');
    }
    alias
}

/// Escape characters that are significant inside PlantUML strings and labels.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' | '{' | '}' | '\\' => {
                let _ = write!(out, "<U+{:04X}>", c as u32);
            }
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
