//! CLI argument definitions for nugraph.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nugraph_core::config::{ImageFormat, CONFIG_FILE_NAME};
use nugraph_ops::ops_export::ExportFormat;

#[derive(Parser, Debug)]
#[command(
    name = "nugraph",
    version,
    about = "Draw the dependency graph of a NuGet package",
    long_about = "nugraph resolves the transitive dependencies of a NuGet package up to a \
                  bounded depth and renders them as a PlantUML object diagram."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Flags shared by every command that resolves a package.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Config file to read
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,
    /// Root package id
    #[arg(short, long)]
    pub package: Option<String>,
    /// Root package version (exact or a range such as "[1.0, 2.0)")
    #[arg(long = "version", value_name = "VERSION")]
    pub pkg_version: Option<String>,
    /// Maximum dependency depth below the root
    #[arg(short, long)]
    pub depth: Option<usize>,
    /// Only follow dependency groups for this target framework
    #[arg(long)]
    pub framework: Option<String>,
    /// Read packages from a directory of .nupkg files instead of the registry
    #[arg(long)]
    pub local_feed: Option<PathBuf>,
    /// NuGet v3 flat-container base URL
    #[arg(long)]
    pub registry: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve dependencies, write a PlantUML script and render it
    Graph {
        #[command(flatten)]
        source: SourceArgs,
        /// Image file to produce
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Where to write the PlantUML script
        #[arg(long)]
        script: Option<PathBuf>,
        /// Path to plantuml.jar
        #[arg(long)]
        plantuml: Option<PathBuf>,
        /// Java executable used to run PlantUML
        #[arg(long)]
        java: Option<String>,
        /// Image format: png or svg
        #[arg(long, value_parser = parse_image_format)]
        format: Option<ImageFormat>,
        /// Lay the diagram out left to right
        #[arg(long)]
        left_to_right: bool,
        /// Omit the diagram title
        #[arg(long)]
        no_title: bool,
        /// Only write the script, do not run PlantUML
        #[arg(long)]
        no_render: bool,
    },

    /// Print the resolved dependency tree
    Tree {
        #[command(flatten)]
        source: SourceArgs,
        /// Explain why a package is included
        #[arg(long)]
        why: Option<String>,
    },

    /// Print the resolved graph as JSON or PlantUML text
    Export {
        #[command(flatten)]
        source: SourceArgs,
        /// Output format: json or puml
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },
}

fn parse_image_format(s: &str) -> Result<ImageFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "png" => Ok(ImageFormat::Png),
        "svg" => Ok(ImageFormat::Svg),
        other => Err(format!("unknown image format '{other}' (expected png or svg)")),
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
