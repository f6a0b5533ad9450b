//! Where edit scripts come from: the system `diff`, or imara-diff in process.

use std::path::Path;
use std::process::Command;

use imara_diff::{diff, intern::InternedInput, Algorithm};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::sink::EdScriptSink;
use crate::source::{LineSequence, LineSlice};

/// One side of the comparison as seen by a script source.
#[derive(Debug, Clone, Copy)]
pub struct DiffInput<'a> {
    pub path: &'a Path,
    pub lines: &'a LineSequence,
}

pub trait ScriptSource {
    /// Produces the normal-format diff of `old` against `new`, one entry per
    /// output line. Producing no script at all is an error.
    fn edit_script(&self, old: DiffInput<'_>, new: DiffInput<'_>) -> Result<Vec<String>>;
}

/// Runs an external `diff`-compatible program on the two paths.
#[derive(Debug, Clone)]
pub struct ExternalDiff {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ExternalDiff {
    fn default() -> Self {
        ExternalDiff {
            program: "diff".to_string(),
            args: Vec::new(),
        }
    }
}

impl ExternalDiff {
    pub fn new(program: impl Into<String>) -> Self {
        ExternalDiff {
            program: program.into(),
            args: Vec::new(),
        }
    }

    fn failure(&self, message: impl Into<String>) -> ReportError {
        ReportError::ExternalToolFailure {
            program: self.program.clone(),
            message: message.into(),
        }
    }
}

impl ScriptSource for ExternalDiff {
    fn edit_script(&self, old: DiffInput<'_>, new: DiffInput<'_>) -> Result<Vec<String>> {
        debug!(program = %self.program, old = %old.path.display(), new = %new.path.display(), "running line diff");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(old.path)
            .arg(new.path)
            .output()
            .map_err(|e| self.failure(format!("could not start: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let script: Vec<String> = stdout.lines().map(str::to_string).collect();

        // diff(1): 0 = same, 1 = different, anything else = trouble.
        match output.status.code() {
            Some(0 | 1) if !script.is_empty() => Ok(script),
            Some(0 | 1) => Err(self.failure("produced no output")),
            Some(code) => Err(self.failure(format!(
                "exited with status {code}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
            None => Err(self.failure("terminated by a signal")),
        }
    }
}

/// Histogram diff through imara-diff, printed in normal format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDiff;

impl BuiltinDiff {
    pub fn script(&self, old: &LineSequence, new: &LineSequence) -> Vec<String> {
        let input = InternedInput::new(LineSlice(old.lines()), LineSlice(new.lines()));
        let sink = EdScriptSink::new(old.lines(), new.lines());
        diff(Algorithm::Histogram, &input, sink)
    }
}

impl ScriptSource for BuiltinDiff {
    fn edit_script(&self, old: DiffInput<'_>, new: DiffInput<'_>) -> Result<Vec<String>> {
        let script = self.script(old.lines, new.lines);
        if script.is_empty() {
            return Err(ReportError::ExternalToolFailure {
                program: "builtin".to_string(),
                message: "produced no output".to_string(),
            });
        }
        Ok(script)
    }
}
