//! Core resolution algorithm: depth-bounded recursive discovery with
//! mark-before-descend cycle protection and per-package failure absorption.

use nugraph_core::identity::PackageIdentity;
use nugraph_core::metadata::MetadataTable;
use nugraph_registry::source::MetadataSource;
use nugraph_util::errors::NugraphError;

use crate::graph::{DependencyGraph, NodeStatus};
use crate::visited::VisitedSet;

/// The output of dependency resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub graph: DependencyGraph,
    /// Metadata for every identity whose manifest was fetched.
    pub metadata: MetadataTable,
    pub stats: ResolutionStats,
}

/// Counters describing one resolution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Fetches issued to the metadata source.
    pub fetched: usize,
    /// Fetches that failed and were absorbed.
    pub failed: usize,
    /// Nodes left unexpanded by the depth bound.
    pub frontier: usize,
}

/// Mutable state threaded through one resolution run.
struct ResolverContext<'a, S: ?Sized> {
    source: &'a S,
    max_depth: usize,
    graph: DependencyGraph,
    metadata: MetadataTable,
    visited: VisitedSet,
    stats: ResolutionStats,
}

impl<S: MetadataSource + ?Sized> ResolverContext<'_, S> {
    async fn visit(&mut self, id: PackageIdentity, depth: usize) {
        if !self.visited.visit(&id) {
            tracing::trace!("{id} already visited");
            return;
        }
        let idx = self.graph.add_node(&id);

        if depth > self.max_depth {
            tracing::debug!(
                "{id} at depth {depth} exceeds max depth {}, not expanding",
                self.max_depth
            );
            self.graph.set_status(idx, NodeStatus::Frontier);
            self.stats.frontier += 1;
            return;
        }

        tracing::debug!("fetching {id} (depth {depth})");
        self.stats.fetched += 1;
        let fetched = match self.source.fetch(&id).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("could not resolve {id}: {e}");
                self.graph.set_status(idx, NodeStatus::Unresolved(e.kind()));
                self.stats.failed += 1;
                return;
            }
        };

        self.metadata.record(fetched.metadata);
        self.graph.set_status(idx, NodeStatus::Resolved);

        for dep in fetched.dependencies {
            let dep_idx = self.graph.add_node(&dep);
            self.graph.add_edge(idx, dep_idx);
            Box::pin(self.visit(dep, depth + 1)).await;
        }
    }
}

/// Resolve the dependency graph of `root`, expanding packages up to
/// `max_depth` hops from it.
///
/// Packages that cannot be fetched stay in the graph as unresolved leaves,
/// and packages one hop past the bound stay as frontier leaves. The only
/// error is an unusable root identity.
pub async fn resolve<S: MetadataSource + ?Sized>(
    source: &S,
    root: &PackageIdentity,
    max_depth: usize,
) -> miette::Result<Resolution> {
    if root.name().is_empty() {
        return Err(NugraphError::InvalidIdentity {
            message: "root package name is empty".to_string(),
        }
        .into());
    }

    tracing::info!(
        "resolving {root} from {} (max depth {max_depth})",
        source.describe()
    );

    let mut ctx = ResolverContext {
        source,
        max_depth,
        graph: DependencyGraph::new(),
        metadata: MetadataTable::new(),
        visited: VisitedSet::new(),
        stats: ResolutionStats::default(),
    };
    let root_idx = ctx.graph.add_node(root);
    ctx.graph.set_root(root_idx);

    ctx.visit(root.clone(), 0).await;

    tracing::info!(
        "resolved {} packages ({} fetched, {} failed, {} frontier)",
        ctx.graph.len(),
        ctx.stats.fetched,
        ctx.stats.failed,
        ctx.stats.frontier
    );

    Ok(Resolution {
        graph: ctx.graph,
        metadata: ctx.metadata,
        stats: ctx.stats,
    })
}
