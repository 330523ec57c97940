//! Operation: display the dependency tree.

use nugraph_core::config::Config;

/// Options for `nugraph tree`.
#[derive(Debug, Default)]
pub struct TreeOptions {
    /// Show the path from the root to this package instead of the full tree.
    pub why: Option<String>,
}

/// Print the resolved dependency tree for the configured package.
pub async fn tree(config: &Config, opts: &TreeOptions) -> miette::Result<()> {
    let resolution = crate::resolve_configured(config).await?;

    if let Some(ref target) = opts.why {
        match resolution.graph.find_path(target) {
            Some(path) => {
                println!("Path to {target}:");
                for (i, node) in path.iter().enumerate() {
                    let indent = "  ".repeat(i);
                    println!("{indent}{node}");
                }
            }
            None => println!("Package '{target}' not found in the graph."),
        }
        return Ok(());
    }

    print!("{}", resolution.graph.print_tree());
    Ok(())
}
