//! Normal ("ed-style") diff scripts: `3c3,4`, `4d3`, `2a3,4` followed by the
//! `<` / `---` / `>` content lines each command owns.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ReportError, Result};

static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)(?:,(\d+))?([A-Za-z])(\d+)(?:,(\d+))?$").expect("command regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Delete,
    Change,
}

impl OpKind {
    pub const ALL: [OpKind; 3] = [OpKind::Add, OpKind::Delete, OpKind::Change];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a' => Some(OpKind::Add),
            'd' => Some(OpKind::Delete),
            'c' => Some(OpKind::Change),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            OpKind::Add => 'a',
            OpKind::Delete => 'd',
            OpKind::Change => 'c',
        }
    }

    /// Caption used for rendered blocks and summary rows.
    pub fn label(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Delete => "delete",
            OpKind::Change => "change",
        }
    }
}

/// 1-based inclusive line range. For insertion points `start == end` names
/// the line after which the other side's lines go (0 = before the first line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        LineRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{},{}", self.start, self.end)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOperation {
    pub kind: OpKind,
    pub src: LineRange,
    pub dst: LineRange,
}

impl EditOperation {
    pub fn new(kind: OpKind, src: LineRange, dst: LineRange) -> Self {
        EditOperation { kind, src, dst }
    }

    /// Parses one command line such as `5,7c8,9`.
    pub fn parse(line: &str) -> Result<Self> {
        let text = line.trim_end();
        let caps = COMMAND_RE
            .captures(text)
            .ok_or_else(|| ReportError::MalformedOperation {
                line: text.to_string(),
            })?;

        let number = |idx: usize| -> Result<Option<usize>> {
            match caps.get(idx) {
                None => Ok(None),
                Some(m) => m.as_str().parse::<usize>().map(Some).map_err(|_| {
                    ReportError::MalformedOperation {
                        line: text.to_string(),
                    }
                }),
            }
        };

        let letter = caps[3].chars().next().unwrap_or_default();
        let kind = OpKind::from_letter(letter).ok_or_else(|| ReportError::UnknownOperation {
            op: letter,
            line: text.to_string(),
        })?;

        let src_start = number(1)?.unwrap_or_default();
        let src_end = number(2)?.unwrap_or(src_start);
        let dst_start = number(4)?.unwrap_or_default();
        let dst_end = number(5)?.unwrap_or(dst_start);

        if src_end < src_start || dst_end < dst_start {
            return Err(ReportError::MalformedOperation {
                line: text.to_string(),
            });
        }

        Ok(EditOperation {
            kind,
            src: LineRange::new(src_start, src_end),
            dst: LineRange::new(dst_start, dst_end),
        })
    }

    /// Lines attributed to this operation in the summary.
    pub fn affected_lines(&self) -> usize {
        match self.kind {
            OpKind::Add => self.dst.len(),
            OpKind::Delete | OpKind::Change => self.src.len(),
        }
    }

    /// Literal content lines following the command in the script.
    pub fn content_lines(&self) -> usize {
        match self.kind {
            OpKind::Add => self.dst.len(),
            OpKind::Delete => self.src.len(),
            OpKind::Change => self.src.len() + self.dst.len() + 1,
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.src, self.kind.letter(), self.dst)
    }
}

/// Walks raw script lines and yields the operations, skipping the content
/// lines each command owns. Stops after the first error.
pub struct EditScript<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> EditScript<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        EditScript { lines, pos: 0 }
    }

    fn is_marker(line: &str) -> bool {
        // "\ No newline at end of file"
        line.starts_with('\\')
    }

    fn skip_content(&mut self, op: &EditOperation, command: &str) -> Result<()> {
        let expected = op.content_lines();
        let mut seen = 0;
        while seen < expected {
            let Some(line) = self.lines.get(self.pos) else {
                return Err(ReportError::TruncatedScript {
                    command: command.to_string(),
                    expected,
                    remaining: seen,
                });
            };
            self.pos += 1;
            if !Self::is_marker(line) {
                seen += 1;
            }
        }
        while self.lines.get(self.pos).is_some_and(|l| Self::is_marker(l)) {
            self.pos += 1;
        }
        Ok(())
    }
}

impl<'a> Iterator for EditScript<'a> {
    type Item = Result<EditOperation>;

    fn next(&mut self) -> Option<Self::Item> {
        // Markers are only legal after content, so one here is malformed.
        let lines = self.lines;
        let command = lines.get(self.pos)?;
        self.pos += 1;

        let result = EditOperation::parse(command)
            .and_then(|op| self.skip_content(&op, command).map(|()| op));
        if result.is_err() {
            self.pos = lines.len();
        }
        Some(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn parses_all_four_shapes() {
        let op = EditOperation::parse("3c3,4").unwrap();
        assert_eq!(op.kind, OpKind::Change);
        assert_eq!(op.src, LineRange::new(3, 3));
        assert_eq!(op.dst, LineRange::new(3, 4));

        let op = EditOperation::parse("4d3").unwrap();
        assert_eq!(op.kind, OpKind::Delete);
        assert_eq!(op.src, LineRange::new(4, 4));
        assert_eq!(op.dst, LineRange::new(3, 3));

        let op = EditOperation::parse("5,7a9").unwrap();
        assert_eq!(op.src, LineRange::new(5, 7));
        assert_eq!(op.dst, LineRange::new(9, 9));

        let op = EditOperation::parse("10,12c20,21").unwrap();
        assert_eq!(op.src, LineRange::new(10, 12));
        assert_eq!(op.dst, LineRange::new(20, 21));
    }

    #[test]
    fn rejects_garbage_and_unknown_letters() {
        for bad in ["", "3", "c3", "3c", "1,c2", "< hello", "---", "3,1c4"] {
            assert!(
                matches!(
                    EditOperation::parse(bad),
                    Err(ReportError::MalformedOperation { .. })
                ),
                "{bad:?} should be malformed"
            );
        }
        match EditOperation::parse("3x4") {
            Err(ReportError::UnknownOperation { op, .. }) => assert_eq!(op, 'x'),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn counts_follow_kind() {
        let add = EditOperation::parse("2a3,4").unwrap();
        assert_eq!(add.affected_lines(), 2);
        assert_eq!(add.content_lines(), 2);

        let change = EditOperation::parse("3c3,4").unwrap();
        assert_eq!(change.affected_lines(), 1);
        assert_eq!(change.content_lines(), 4);

        let delete = EditOperation::parse("1,3d0").unwrap();
        assert_eq!(delete.affected_lines(), 3);
        assert_eq!(delete.content_lines(), 3);
    }

    #[test]
    fn display_round_trips_command_text() {
        for text in ["3c3,4", "4d3", "0a1,2", "5,9c5"] {
            assert_eq!(EditOperation::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn script_skips_content_lines() {
        let script = lines("2a3,4\n> x\n> y\n4d5\n< gone\n6c8\n< old\n---\n> new\n");
        let ops: Vec<_> = EditScript::new(&script)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].kind, OpKind::Add);
        assert_eq!(ops[1].kind, OpKind::Delete);
        assert_eq!(ops[2].kind, OpKind::Change);
    }

    #[test]
    fn script_tolerates_no_newline_markers() {
        let script = lines("1c1\n< a\n\\ No newline at end of file\n---\n> b\n\\ No newline at end of file\n");
        let ops: Vec<_> = EditScript::new(&script)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(ops, vec![EditOperation::parse("1c1").unwrap()]);
    }

    #[test]
    fn blank_line_in_command_position_is_malformed() {
        let script = lines("1d0\n< a\n\n2d0\n< b\n");
        let mut iter = EditScript::new(&script);
        assert_eq!(iter.next().unwrap().unwrap(), EditOperation::parse("1d0").unwrap());
        match iter.next() {
            Some(Err(ReportError::MalformedOperation { line })) => assert_eq!(line, ""),
            other => panic!("unexpected {other:?}"),
        }
        assert!(iter.next().is_none());
    }

    #[test]
    fn leading_marker_is_malformed() {
        let script = lines("\\ No newline at end of file\n1c1\n< a\n---\n> b\n");
        let err = EditScript::new(&script).next().unwrap().unwrap_err();
        assert!(matches!(err, ReportError::MalformedOperation { .. }));
    }

    #[test]
    fn truncated_script_is_reported_once() {
        let script = lines("3c3,4\n< old\n---\n> new\n");
        let mut iter = EditScript::new(&script);
        match iter.next() {
            Some(Err(ReportError::TruncatedScript {
                expected, remaining, ..
            })) => {
                assert_eq!(expected, 4);
                assert_eq!(remaining, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(iter.next().is_none());
    }
}
