use std::{
    fs,
    iter::Map,
    path::Path,
    slice::Iter,
};

use imara_diff::intern::TokenSource;

use crate::error::{ReportError, Result};

/// The lines of one compared file. Never mutated once loaded; reads go
/// through a [`Cursor`](crate::cursor::Cursor).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    pub fn new(lines: Vec<String>) -> Self {
        LineSequence { lines }
    }

    /// Splits `text` into lines (`\n` or `\r\n`) and expands tabs to stops
    /// every `tab_size` columns. A `tab_size` of 0 keeps tabs as they are.
    pub fn from_text(text: &str, tab_size: usize) -> Self {
        let lines = text
            .lines()
            .map(|line| expand_tabs(line, tab_size))
            .collect();
        LineSequence { lines }
    }

    /// Reads a file, replacing invalid UTF-8 rather than failing on it.
    pub fn read(path: &Path, tab_size: usize) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes), tab_size))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        LineSequence::new(lines)
    }
}

pub fn expand_tabs(line: &str, tab_size: usize) -> String {
    if tab_size == 0 || !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + tab_size);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = tab_size - column % tab_size;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

/// Line tokens for imara-diff.
#[derive(Debug, Clone, Copy)]
pub struct LineSlice<'a>(pub &'a [String]);

impl<'a> TokenSource for LineSlice<'a> {
    type Token = &'a str;
    type Tokenizer = Map<Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn tokenize(&self) -> Self::Tokenizer {
        self.0.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }

    fn estimate_tokens(&self) -> u32 {
        self.0.len() as u32
    }
}
