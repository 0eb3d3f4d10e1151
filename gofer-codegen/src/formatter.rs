//! External formatting pass run over written files.

use std::{
    io::ErrorKind,
    path::PathBuf,
    process::{Command, Stdio},
};

use crate::{
    config::FormatterConfig,
    error::{Error, Result},
};

/// A tool that normalizes files after they have been written.
pub trait ExternalFormatter {
    /// Name used in messages.
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Format `paths` in place.
    fn format(&self, paths: &[PathBuf]) -> Result<()>;

    /// What the user can do when the tool is not available.
    fn remediation(&self) -> String;
}

/// Runs a command line tool with the written paths appended to its
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
    install_hint: String,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            install_hint: String::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn install_hint(mut self, hint: impl Into<String>) -> Self {
        self.install_hint = hint.into();
        self
    }

    /// `goimports -w`.
    pub fn goimports() -> Self {
        Self::from_config(&FormatterConfig::default())
    }

    pub fn from_config(config: &FormatterConfig) -> Self {
        Self::new(&config.command)
            .args(&config.args)
            .install_hint(&config.install_hint)
    }
}

impl ExternalFormatter for CommandFormatter {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        // Probing with `-h` only checks that the program can be spawned.
        let probe = Command::new(&self.program)
            .arg("-h")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match probe {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(program = %self.program, error = %err, "formatter probe failed");
                false
            }
        }
    }

    fn format(&self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(paths)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => Error::formatter_unavailable(&self.program, self.remediation()),
                _ => Box::new(Error::FormatterFailed {
                    tool: self.program.clone(),
                    status: "spawn failure".to_string(),
                    stderr: err.to_string(),
                }),
            })?;

        if !output.status.success() {
            return Err(Box::new(Error::FormatterFailed {
                tool: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }));
        }

        tracing::debug!(program = %self.program, files = paths.len(), "ran formatter");
        Ok(())
    }

    fn remediation(&self) -> String {
        if self.install_hint.is_empty() {
            format!("install {} and make sure it is on PATH", self.program)
        } else {
            format!("install it with `{}`", self.install_hint)
        }
    }
}
