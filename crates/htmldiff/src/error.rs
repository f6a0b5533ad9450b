use std::path::PathBuf;

use thiserror::Error;

/// Which of the two compared files an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Old => f.write_str("old"),
            Side::New => f.write_str("new"),
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("[HTMLDIFF_001] malformed edit command '{line}'. Suggestion: feed normal (not unified or context) diff output.")]
    MalformedOperation { line: String },

    #[error("[HTMLDIFF_002] unknown edit operation '{op}' in '{line}'. Suggestion: only 'a', 'd' and 'c' commands are understood.")]
    UnknownOperation { op: char, line: String },

    #[error("[HTMLDIFF_003] {side} file ended early: needed {wanted} line(s) after line {consumed}, {available} available. Suggestion: regenerate the diff against the same files.")]
    PrematureEof {
        side: Side,
        consumed: usize,
        wanted: usize,
        available: usize,
    },

    #[error("[HTMLDIFF_004] edit script truncated after '{command}': expected {expected} content line(s), {remaining} left. Suggestion: regenerate the diff.")]
    TruncatedScript {
        command: String,
        expected: usize,
        remaining: usize,
    },

    #[error("[HTMLDIFF_005] highlight colors must be distinct, '{color}' is used for both {first} and {second}.")]
    DuplicateHighlightColors {
        color: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("[HTMLDIFF_006] line-diff tool '{program}' failed: {message}")]
    ExternalToolFailure { program: String, message: String },

    #[error("[HTMLDIFF_007] cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[HTMLDIFF_008] {kind} highlight color '{color}' contains a character not allowed in a style attribute. Suggestion: use a CSS color name or #rrggbb.")]
    InvalidHighlightColor { kind: &'static str, color: String },
}

impl ReportError {
    /// True when the edit script and the file contents disagree.
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            ReportError::PrematureEof { .. } | ReportError::TruncatedScript { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
