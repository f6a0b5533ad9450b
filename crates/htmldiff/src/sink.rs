use imara_diff::sink::Sink;
use std::ops::Range;

use crate::script::{EditOperation, LineRange, OpKind};

/// Turns imara-diff hunks into normal-format script lines, content lines
/// included, the way `diff` prints them.
#[derive(Debug)]
pub struct EdScriptSink<'a> {
    old: &'a [String],
    new: &'a [String],
    script: Vec<String>,
}

impl<'a> EdScriptSink<'a> {
    pub fn new(old: &'a [String], new: &'a [String]) -> Self {
        EdScriptSink {
            old,
            new,
            script: Vec::new(),
        }
    }
}

fn operation(before: &Range<u32>, after: &Range<u32>) -> EditOperation {
    let (b_start, b_end) = (before.start as usize, before.end as usize);
    let (a_start, a_end) = (after.start as usize, after.end as usize);
    if before.is_empty() {
        EditOperation::new(
            OpKind::Add,
            LineRange::new(b_start, b_start),
            LineRange::new(a_start + 1, a_end),
        )
    } else if after.is_empty() {
        EditOperation::new(
            OpKind::Delete,
            LineRange::new(b_start + 1, b_end),
            LineRange::new(a_start, a_start),
        )
    } else {
        EditOperation::new(
            OpKind::Change,
            LineRange::new(b_start + 1, b_end),
            LineRange::new(a_start + 1, a_end),
        )
    }
}

impl<'a> Sink for EdScriptSink<'a> {
    type Out = Vec<String>;

    fn process_change(&mut self, before: Range<u32>, after: Range<u32>) {
        let op = operation(&before, &after);
        self.script.push(op.to_string());

        let removed = &self.old[before.start as usize..before.end as usize];
        let added = &self.new[after.start as usize..after.end as usize];
        self.script.extend(removed.iter().map(|line| format!("< {line}")));
        if op.kind == OpKind::Change {
            self.script.push("---".to_string());
        }
        self.script.extend(added.iter().map(|line| format!("> {line}")));
    }

    fn finish(self) -> Self::Out {
        self.script
    }
}
