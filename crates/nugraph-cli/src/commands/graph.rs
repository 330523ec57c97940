//! Handler for `nugraph graph`.

use miette::Result;

use nugraph_core::config::Config;
use nugraph_diagram::plantuml::DiagramOptions;
use nugraph_ops::ops_graph::{self, GraphOptions};
use nugraph_util::progress;

pub async fn exec(
    config: &Config,
    left_to_right: bool,
    no_title: bool,
    no_render: bool,
) -> Result<()> {
    let opts = GraphOptions {
        render: !no_render,
        diagram: DiagramOptions {
            title: !no_title,
            left_to_right,
        },
    };

    let report = ops_graph::graph(config, &opts).await?;
    match report.image {
        Some(image) => progress::status("Finished", &image.display().to_string()),
        None => progress::status("Finished", &report.script.display().to_string()),
    }
    Ok(())
}
