use crate::error::{ReportError, Result, Side};

/// Read position into one file's lines. `consumed` only ever grows.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    side: Side,
    lines: &'a [String],
    consumed: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(side: Side, lines: &'a [String]) -> Self {
        Cursor {
            side,
            lines,
            consumed: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of lines read so far, which is also the 1-based number of the
    /// last line read.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.consumed
    }

    /// Reads every line before line number `limit`, leaving `limit` itself
    /// unread. Returns nothing when the cursor is already there or past it.
    pub fn drain_until(&mut self, limit: usize) -> &'a [String] {
        let stop = limit.saturating_sub(1).min(self.lines.len());
        if stop <= self.consumed {
            return &[];
        }
        let run = &self.lines[self.consumed..stop];
        self.consumed = stop;
        run
    }

    /// Reads exactly `n` lines. Running out means the script and the file
    /// disagree.
    pub fn take_exactly(&mut self, n: usize) -> Result<&'a [String]> {
        if n > self.remaining() {
            return Err(ReportError::PrematureEof {
                side: self.side,
                consumed: self.consumed,
                wanted: n,
                available: self.remaining(),
            });
        }
        let run = &self.lines[self.consumed..self.consumed + n];
        self.consumed += n;
        Ok(run)
    }

    /// Reads whatever is left.
    pub fn drain_rest(&mut self) -> &'a [String] {
        let run = &self.lines[self.consumed..];
        self.consumed = self.lines.len();
        run
    }
}
