//! Command dispatch and handler modules.

mod export;
mod graph;
mod tree;

use miette::Result;
use nugraph_core::config::Config;

use crate::cli::{Cli, Command, SourceArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Graph {
            source,
            output,
            script,
            plantuml,
            java,
            format,
            left_to_right,
            no_title,
            no_render,
        } => {
            let mut config = load_config(&source)?;
            config.output = output.or(config.output);
            config.script = script.or(config.script);
            config.visualizer_path = plantuml.or(config.visualizer_path);
            config.java = java.or(config.java);
            config.format = format.or(config.format);
            graph::exec(&config, left_to_right, no_title, no_render).await
        }
        Command::Tree { source, why } => tree::exec(&load_config(&source)?, why).await,
        Command::Export { source, format } => export::exec(&load_config(&source)?, format).await,
    }
}

/// Read the config file and let the command-line flags override it.
fn load_config(args: &SourceArgs) -> Result<Config> {
    let mut config = Config::load(&args.config)?;
    if let Some(ref package) = args.package {
        config.package = Some(package.clone());
    }
    if let Some(ref version) = args.pkg_version {
        config.version = Some(version.clone());
    }
    if let Some(depth) = args.depth {
        config.max_depth = Some(depth);
    }
    if let Some(ref framework) = args.framework {
        config.framework = Some(framework.clone());
    }
    if let Some(ref dir) = args.local_feed {
        config.registry.local_feed = Some(dir.clone());
    }
    if let Some(ref url) = args.registry {
        config.registry.url = url.clone();
    }
    tracing::debug!(
        package = ?config.package,
        version = ?config.version,
        max_depth = config.max_depth(),
        "effective configuration"
    );
    Ok(config)
}
