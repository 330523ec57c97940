//! Launching external tools (the PlantUML renderer).

use std::ffi::{OsStr, OsString};
use std::process::{Command, Output};

use crate::errors::NugraphError;

/// A program and its arguments, built up before running.
///
/// Arguments are kept as OS strings so file paths reach the child unchanged.
pub struct CommandBuilder {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandBuilder {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// The command line as it would be typed, for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion, capturing stdout and stderr.
    ///
    /// Only a failure to launch is an error; the exit status is left to the
    /// caller.
    pub fn exec(&self) -> Result<Output, NugraphError> {
        tracing::debug!("running {}", self.display());
        Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(NugraphError::from)
    }
}
