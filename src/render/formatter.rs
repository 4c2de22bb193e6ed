//! Post-render source formatting.
//!
//! Rendered code is piped through `goimports` (or `gofmt` when goimports is
//! not installed) before it is written. A formatter failure fails the whole
//! file so nothing half-formatted reaches disk.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::errors::{MisuraError, Result};

pub trait SourceFormatter {
    /// Formatted text for `source`, which will be written to `path`.
    fn format(&self, path: &Path, source: &str) -> Result<String>;
}

/// Leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl SourceFormatter for NoopFormatter {
    fn format(&self, _path: &Path, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

const PREFERRED_TOOLS: [&str; 2] = ["goimports", "gofmt"];

/// Runs an external formatter that reads stdin and prints to stdout.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// First of goimports or gofmt found on `PATH`.
    pub fn discover() -> Result<Self> {
        for tool in PREFERRED_TOOLS {
            if let Ok(program) = which::which(tool) {
                debug!("formatting with {}", program.display());
                return Ok(Self::new(program, Vec::new()));
            }
        }
        Err(MisuraError::Format {
            path: PathBuf::new(),
            message: format!(
                "none of {} found on PATH; pass --fmt=false to skip formatting",
                PREFERRED_TOOLS.join(", ")
            ),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn is_goimports(&self) -> bool {
        self.program
            .file_stem()
            .is_some_and(|stem| stem == PREFERRED_TOOLS[0])
    }

    fn command_for(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        // goimports resolves sibling packages relative to the output's directory.
        if self.is_goimports() {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                command.arg("-srcdir").arg(dir);
            }
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl SourceFormatter for CommandFormatter {
    fn format(&self, path: &Path, source: &str) -> Result<String> {
        let failed = |message: String| MisuraError::Format {
            path: path.to_path_buf(),
            message,
        };

        let mut child = self
            .command_for(path)
            .spawn()
            .map_err(|e| failed(format!("cannot start {}: {}", self.program.display(), e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| failed(format!("cannot write to formatter: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| failed(format!("formatter did not finish: {}", e)))?;

        if !output.status.success() {
            return Err(failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| failed(format!("invalid UTF-8 output: {}", e)))
    }
}
