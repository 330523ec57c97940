//! Dependency graph construction and traversal.

use std::collections::{HashMap, HashSet};
use std::fmt;

use nugraph_core::identity::PackageIdentity;
use nugraph_registry::source::FetchFailureKind;
pub use petgraph::graph::NodeIndex;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// How far resolution got for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Discovered, resolution still in progress.
    Pending,
    /// Manifest fetched; out-edges are the package's declared dependencies.
    Resolved,
    /// Not expanded because it lies beyond the depth bound.
    Frontier,
    /// Fetch failed; no metadata and no out-edges.
    Unresolved(FetchFailureKind),
}

impl NodeStatus {
    /// Short annotation for unexpanded nodes, `None` for resolved ones.
    pub fn note(&self) -> Option<String> {
        match self {
            NodeStatus::Pending => Some("pending".to_string()),
            NodeStatus::Resolved => None,
            NodeStatus::Frontier => Some("not expanded (depth limit)".to_string()),
            NodeStatus::Unresolved(kind) => Some(format!("unresolved ({kind})")),
        }
    }
}

/// A node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub identity: PackageIdentity,
    pub status: NodeStatus,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status.note() {
            Some(note) => write!(f, "{} [{note}]", self.identity),
            None => write!(f, "{}", self.identity),
        }
    }
}

/// A directed dependency graph keyed by package identity, backed by petgraph.
///
/// Node indices follow first-discovery order, which is also the iteration
/// order of [`DependencyGraph::nodes`]. Nodes are never removed and each
/// `(from, to)` edge exists at most once.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<GraphNode, ()>,
    index: HashMap<PackageIdentity, NodeIndex>,
    root: Option<NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Add or retrieve a node. If the identity already exists, returns the existing index.
    pub fn add_node(&mut self, identity: &PackageIdentity) -> NodeIndex {
        if let Some(&idx) = self.index.get(identity) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            identity: identity.clone(),
            status: NodeStatus::Pending,
        });
        self.index.insert(identity.clone(), idx);
        idx
    }

    /// Set the root node of the graph (the package resolution started from).
    pub fn set_root(&mut self, idx: NodeIndex) {
        self.root = Some(idx);
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Add a dependency edge from `from` to `to` unless it already exists.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn set_status(&mut self, idx: NodeIndex, status: NodeStatus) {
        self.graph[idx].status = status;
    }

    /// Look up a node by identity.
    pub fn find(&self, identity: &PackageIdentity) -> Option<NodeIndex> {
        self.index.get(identity).copied()
    }

    pub fn contains(&self, identity: &PackageIdentity) -> bool {
        self.index.contains_key(identity)
    }

    /// Get the node data for an index.
    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    /// All nodes, root included, in first-discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Direct dependencies of a node, in first-discovery order.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut deps: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect();
        deps.sort();
        deps
    }

    /// Every edge as `(from, to)`, grouped by source in first-discovery order.
    pub fn edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        self.graph
            .node_indices()
            .flat_map(|from| {
                self.dependencies_of(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Print the dependency tree to a string.
    ///
    /// Shared subtrees are printed under each parent; a node already on the
    /// current path is printed once more and not descended into, so cycles
    /// terminate.
    pub fn print_tree(&self) -> String {
        let mut output = String::new();
        let Some(root) = self.root else {
            return output;
        };

        output.push_str(&format!("{}\n", self.graph[root]));

        let mut on_path = HashSet::new();
        on_path.insert(root);

        let deps = self.dependencies_of(root);
        let count = deps.len();
        for (i, idx) in deps.into_iter().enumerate() {
            self.print_subtree(&mut output, idx, "", i == count - 1, &mut on_path);
        }
        output
    }

    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        on_path: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];
        if !on_path.insert(idx) {
            output.push_str(&format!("{prefix}{connector}{node} (cycle)\n"));
            return;
        }
        output.push_str(&format!("{prefix}{connector}{node}\n"));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, child) in deps.into_iter().enumerate() {
            self.print_subtree(output, child, &child_prefix, i == count - 1, on_path);
        }

        on_path.remove(&idx);
    }

    /// Find a path from the root to the first node whose name matches
    /// `target` (case-insensitively, any version).
    pub fn find_path(&self, target: &str) -> Option<Vec<&GraphNode>> {
        let root = self.root?;
        let target = self
            .nodes()
            .find(|(_, n)| n.identity.name().eq_ignore_ascii_case(target))
            .map(|(idx, _)| idx)?;
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        if self.dfs_path(root, target, &mut path, &mut visited) {
            Some(path.iter().map(|&idx| &self.graph[idx]).collect())
        } else {
            None
        }
    }

    fn dfs_path(
        &self,
        current: NodeIndex,
        target: NodeIndex,
        path: &mut Vec<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
    ) -> bool {
        path.push(current);
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            path.pop();
            return false;
        }
        for child in self.dependencies_of(current) {
            if self.dfs_path(child, target, path, visited) {
                return true;
            }
        }
        path.pop();
        false
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
