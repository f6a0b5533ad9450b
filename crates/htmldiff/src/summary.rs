use crate::script::{EditOperation, OpKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCount {
    pub operations: usize,
    pub lines: usize,
}

impl KindCount {
    fn add(&mut self, lines: usize) {
        self.operations += 1;
        self.lines += lines;
    }
}

/// Running operation and affected-line totals per edit kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    add: KindCount,
    delete: KindCount,
    change: KindCount,
}

impl Summary {
    pub fn record(&mut self, op: &EditOperation) {
        let lines = op.affected_lines();
        match op.kind {
            OpKind::Add => self.add.add(lines),
            OpKind::Delete => self.delete.add(lines),
            OpKind::Change => self.change.add(lines),
        }
    }

    pub fn get(&self, kind: OpKind) -> KindCount {
        match kind {
            OpKind::Add => self.add,
            OpKind::Delete => self.delete,
            OpKind::Change => self.change,
        }
    }

    pub fn total(&self) -> KindCount {
        KindCount {
            operations: self.add.operations + self.delete.operations + self.change.operations,
            lines: self.add.lines + self.delete.lines + self.change.lines,
        }
    }
}
