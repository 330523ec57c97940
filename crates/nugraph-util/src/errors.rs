use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all nugraph operations.
#[derive(Debug, Error, Diagnostic)]
pub enum NugraphError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed configuration (e.g. nugraph.toml).
    #[error("Config error: {message}")]
    #[diagnostic(help("Check nugraph.toml or the command-line flags"))]
    Config { message: String },

    /// A package identity could not be parsed or normalized.
    #[error("Invalid package identity: {message}")]
    #[diagnostic(help("Use the form `Name@Version`, e.g. `Newtonsoft.Json@13.0.1`"))]
    InvalidIdentity { message: String },

    /// Network request or download failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Registry responded with something we could not use.
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// The diagram renderer could not be run or exited unsuccessfully.
    #[error("Render failed: {message}")]
    #[diagnostic(help("Check `visualizer-path` and that `java` is on PATH"))]
    Render { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
