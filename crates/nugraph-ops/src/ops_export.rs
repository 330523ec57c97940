//! Operation: print the resolved graph as JSON or PlantUML text.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use nugraph_core::config::Config;
use nugraph_diagram::plantuml::{self, DiagramOptions};
use nugraph_resolver::graph::NodeStatus;
use nugraph_resolver::resolver::Resolution;
use nugraph_util::errors::NugraphError;

/// Output format for `nugraph export`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Puml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "puml" | "plantuml" => Ok(ExportFormat::Puml),
            other => Err(format!("unknown export format '{other}' (expected json or puml)")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Puml => write!(f, "puml"),
        }
    }
}

#[derive(Serialize)]
struct GraphDocument<'a> {
    root: Option<String>,
    nodes: Vec<NodeDocument<'a>>,
    edges: Vec<EdgeDocument>,
}

#[derive(Serialize)]
struct NodeDocument<'a> {
    id: String,
    name: &'a str,
    version: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<&'a str>,
}

#[derive(Serialize)]
struct EdgeDocument {
    from: String,
    to: String,
}

fn status_label(status: &NodeStatus) -> (&'static str, Option<String>) {
    match status {
        NodeStatus::Pending => ("pending", None),
        NodeStatus::Resolved => ("resolved", None),
        NodeStatus::Frontier => ("frontier", None),
        NodeStatus::Unresolved(kind) => ("unresolved", Some(kind.to_string())),
    }
}

/// Render a resolution as pretty-printed JSON.
///
/// Nodes appear in discovery order; edges refer to nodes by their
/// `name version` display form.
pub fn to_json(resolution: &Resolution) -> miette::Result<String> {
    let graph = &resolution.graph;

    let nodes = graph
        .nodes()
        .map(|(_, node)| {
            let meta = resolution.metadata.get(&node.identity);
            let (status, reason) = status_label(&node.status);
            NodeDocument {
                id: node.identity.to_string(),
                name: node.identity.name(),
                version: node.identity.version(),
                status,
                reason,
                display_version: meta.map(|m| m.display_version.as_str()),
                authors: meta
                    .map(|m| m.authors.iter().map(String::as_str).collect())
                    .unwrap_or_default(),
            }
        })
        .collect();

    let edges = graph
        .edges()
        .into_iter()
        .map(|(from, to)| EdgeDocument {
            from: graph.node(from).identity.to_string(),
            to: graph.node(to).identity.to_string(),
        })
        .collect();

    let doc = GraphDocument {
        root: graph.root().map(|idx| graph.node(idx).identity.to_string()),
        nodes,
        edges,
    };

    serde_json::to_string_pretty(&doc).map_err(|e| {
        NugraphError::Generic {
            message: format!("Failed to serialize graph: {e}"),
        }
        .into()
    })
}

/// Resolve the configured package and print it to stdout.
pub async fn export(config: &Config, format: ExportFormat) -> miette::Result<()> {
    let resolution = crate::resolve_configured(config).await?;
    tracing::info!(
        "exporting {} nodes and {} edges as {format}",
        resolution.graph.len(),
        resolution.graph.edge_count()
    );
    let text = match format {
        ExportFormat::Json => to_json(&resolution)?,
        ExportFormat::Puml => plantuml::serialize(
            &resolution.graph,
            &resolution.metadata,
            &DiagramOptions::default(),
        ),
    };
    println!("{text}");
    Ok(())
}
