pub mod ops_export;
pub mod ops_graph;
pub mod ops_tree;

use nugraph_core::config::Config;
use nugraph_registry::local::LocalFeedSource;
use nugraph_registry::nuget::NuGetSource;
use nugraph_registry::source::MetadataSource;
use nugraph_resolver::resolver::{self, Resolution};
use nugraph_util::progress;

/// Pick the metadata source the configuration asks for: a local `.nupkg`
/// directory when `registry.local-feed` is set, the HTTP feed otherwise.
pub fn build_source(config: &Config) -> miette::Result<Box<dyn MetadataSource>> {
    match &config.registry.local_feed {
        Some(dir) => Ok(Box::new(LocalFeedSource::new(
            dir,
            config.framework.clone(),
        )?)),
        None => Ok(Box::new(NuGetSource::from_config(config)?)),
    }
}

/// Resolve the configured root package with a spinner on stderr.
pub async fn resolve_configured(config: &Config) -> miette::Result<Resolution> {
    let root = config.root()?;
    let source = build_source(config)?;

    tracing::info!("resolving {root} using {}", source.describe());
    let pb = progress::spinner(&format!("Resolving {root}"));
    let result = resolver::resolve(source.as_ref(), &root, config.max_depth()).await;
    pb.finish_and_clear();
    let resolution = result?;

    progress::status(
        "Resolved",
        &format!(
            "{} packages, {} edges",
            resolution.graph.len(),
            resolution.graph.edge_count()
        ),
    );
    if resolution.stats.failed > 0 {
        progress::status_warn(
            "Unresolved",
            &format!("{} packages could not be fetched", resolution.stats.failed),
        );
    }
    Ok(resolution)
}
