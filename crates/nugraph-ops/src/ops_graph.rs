//! Operation: resolve, write the PlantUML script and render the image.

use std::fs;
use std::path::PathBuf;

use nugraph_core::config::Config;
use nugraph_diagram::plantuml::{self, DiagramOptions};
use nugraph_diagram::render::PlantUmlRenderer;
use nugraph_resolver::resolver::ResolutionStats;
use nugraph_util::errors::NugraphError;
use nugraph_util::progress;

/// Options for `nugraph graph`.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Run PlantUML after writing the script.
    pub render: bool,
    pub diagram: DiagramOptions,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            render: true,
            diagram: DiagramOptions::default(),
        }
    }
}

/// What `graph` produced.
#[derive(Debug, Clone)]
pub struct GraphReport {
    pub script: PathBuf,
    pub image: Option<PathBuf>,
    pub stats: ResolutionStats,
}

/// Resolve the configured package and write its dependency diagram.
pub async fn graph(config: &Config, opts: &GraphOptions) -> miette::Result<GraphReport> {
    // Fail on a missing renderer before touching the network.
    let renderer = if opts.render {
        Some(PlantUmlRenderer::from_config(config)?)
    } else {
        None
    };

    let resolution = crate::resolve_configured(config).await?;
    let text = plantuml::serialize(&resolution.graph, &resolution.metadata, &opts.diagram);

    let script = config.script_path();
    if let Some(parent) = script.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(NugraphError::Io)?;
    }
    fs::write(&script, &text).map_err(NugraphError::Io)?;
    tracing::info!("wrote {} ({} bytes)", script.display(), text.len());
    progress::status("Wrote", &script.display().to_string());

    let image = match renderer {
        Some(renderer) => {
            let output = config.output_path();
            tracing::info!("rendering {} to {}", script.display(), output.display());
            progress::status("Rendering", &output.display().to_string());
            Some(renderer.render(&script, &output)?)
        }
        None => {
            tracing::info!("rendering disabled, leaving {}", script.display());
            progress::status_info("Skipped", "rendering (--no-render)");
            None
        }
    };

    Ok(GraphReport {
        script,
        image,
        stats: resolution.stats,
    })
}
