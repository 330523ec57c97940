//! Running PlantUML to turn a `.puml` script into an image.

use std::fs;
use std::path::{Path, PathBuf};

use nugraph_core::config::{Config, ImageFormat};
use nugraph_util::errors::NugraphError;
use nugraph_util::process::CommandBuilder;

/// Invokes `java -jar plantuml.jar` out of process.
#[derive(Debug, Clone)]
pub struct PlantUmlRenderer {
    java: String,
    jar: PathBuf,
    format: ImageFormat,
}

impl PlantUmlRenderer {
    pub fn new(java: impl Into<String>, jar: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            java: java.into(),
            jar: jar.into(),
            format,
        }
    }

    pub fn from_config(config: &Config) -> miette::Result<Self> {
        Ok(Self::new(
            config.java(),
            config.visualizer_path()?,
            config.format(),
        ))
    }

    /// The PlantUML command line for a script and an output directory.
    pub fn command(&self, script: &Path, output_dir: &Path) -> CommandBuilder {
        CommandBuilder::new(&self.java)
            .arg("-jar")
            .arg(&self.jar)
            .arg(format!("-t{}", self.format.extension()))
            .args([script, Path::new("-o"), output_dir])
    }

    /// Render `script` and place the image at `output`.
    ///
    /// PlantUML names images after the script, so the produced file is moved
    /// to `output` when the names differ.
    pub fn render(&self, script: &Path, output: &Path) -> miette::Result<PathBuf> {
        if !self.jar.is_file() {
            return Err(NugraphError::Render {
                message: format!("PlantUML jar not found at {}", self.jar.display()),
            }
            .into());
        }

        let output = std::path::absolute(output).map_err(NugraphError::Io)?;
        let output_dir = output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&output_dir).map_err(NugraphError::Io)?;

        let cmd = self.command(script, &output_dir);
        let result = cmd.exec().map_err(|e| NugraphError::Render {
            message: format!("failed to launch `{}`: {e}", cmd.display()),
        })?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(NugraphError::Render {
                message: format!(
                    "`{}` exited with {}: {}",
                    cmd.display(),
                    result.status,
                    stderr.trim()
                ),
            }
            .into());
        }

        let stem = script
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let produced = output_dir.join(format!("{stem}.{}", self.format.extension()));
        if produced != output {
            if !produced.is_file() {
                return Err(NugraphError::Render {
                    message: format!("renderer did not produce {}", produced.display()),
                }
                .into());
            }
            fs::rename(&produced, &output).map_err(NugraphError::Io)?;
        }
        tracing::info!("rendered {}", output.display());
        Ok(output)
    }
}
