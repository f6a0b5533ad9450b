//! Replays an edit script against both files and collects the two columns
//! of rendered blocks.

use tracing::{debug, info, warn};

use crate::config::ReportConfig;
use crate::cursor::Cursor;
use crate::error::{ReportError, Result, Side};
use crate::render::{Decoration, RenderedBlock, Renderer};
use crate::script::{EditOperation, EditScript, LineRange, OpKind};
use crate::source::LineSequence;
use crate::summary::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ProcessingOperation,
    DrainingLeftovers,
    Done,
}

/// One visual table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub old: RenderedBlock,
    pub new: RenderedBlock,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub old_blocks: Vec<RenderedBlock>,
    pub new_blocks: Vec<RenderedBlock>,
    pub operations: Vec<EditOperation>,
    pub summary: Summary,
}

impl Report {
    /// Pairs the two columns, padding the shorter one with empty cells.
    pub fn rows(&self) -> Vec<ReportRow> {
        let len = self.old_blocks.len().max(self.new_blocks.len());
        (0..len)
            .map(|i| ReportRow {
                old: self
                    .old_blocks
                    .get(i)
                    .cloned()
                    .unwrap_or_else(RenderedBlock::placeholder),
                new: self
                    .new_blocks
                    .get(i)
                    .cloned()
                    .unwrap_or_else(RenderedBlock::placeholder),
            })
            .collect()
    }

    pub fn has_differences(&self) -> bool {
        !self.operations.is_empty()
    }
}

#[derive(Debug)]
struct SideState<'a> {
    cursor: Cursor<'a>,
    /// Line-number counter handed to the renderer.
    position: usize,
}

impl<'a> SideState<'a> {
    fn new(side: Side, lines: &'a [String]) -> Self {
        SideState {
            cursor: Cursor::new(side, lines),
            position: 0,
        }
    }

    /// How many lines of `range` are still unread. A range starting at or
    /// before the cursor overlaps the previous operation; only its unread
    /// tail is taken.
    fn pending(&self, range: LineRange) -> usize {
        let consumed = self.cursor.consumed();
        if consumed >= range.start {
            warn!(
                consumed,
                start = range.start,
                end = range.end,
                "edit range overlaps lines already shown"
            );
            range.end.saturating_sub(consumed)
        } else {
            range.len()
        }
    }

    /// Fails unless every line up to and including `line` has been read.
    fn require_through(&self, line: usize) -> Result<()> {
        let consumed = self.cursor.consumed();
        if consumed < line {
            return Err(ReportError::PrematureEof {
                side: self.cursor.side(),
                consumed,
                wanted: line - consumed,
                available: self.cursor.remaining(),
            });
        }
        Ok(())
    }
}

/// Mutable bookkeeping threaded through the replay loop.
#[derive(Debug)]
pub struct ReportState<'a> {
    phase: Phase,
    old: SideState<'a>,
    new: SideState<'a>,
    report: Report,
}

pub struct Assembler<'a> {
    config: &'a ReportConfig,
    renderer: Renderer,
    state: ReportState<'a>,
}

impl<'a> Assembler<'a> {
    /// Validates `config` before any line is read.
    pub fn new(config: &'a ReportConfig, old: &'a [String], new: &'a [String]) -> Result<Self> {
        config.validate()?;
        Ok(Assembler {
            config,
            renderer: Renderer::for_files(config, old.len(), new.len()),
            state: ReportState {
                phase: Phase::Idle,
                old: SideState::new(Side::Old, old),
                new: SideState::new(Side::New, new),
                report: Report::default(),
            },
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Lines read so far from (old, new).
    pub fn consumed(&self) -> (usize, usize) {
        (
            self.state.old.cursor.consumed(),
            self.state.new.cursor.consumed(),
        )
    }

    pub fn report(&self) -> &Report {
        &self.state.report
    }

    pub fn apply(&mut self, op: &EditOperation) -> Result<()> {
        self.state.phase = Phase::ProcessingOperation;

        // Insertion points name a line that is itself unchanged, so the
        // unchanged run on that side extends one line further.
        let old_limit = match op.kind {
            OpKind::Add => op.src.start + 1,
            OpKind::Delete | OpKind::Change => op.src.start,
        };
        let new_limit = match op.kind {
            OpKind::Delete => op.dst.start + 1,
            OpKind::Add | OpKind::Change => op.dst.start,
        };
        let old_run = self.state.old.cursor.drain_until(old_limit);
        let new_run = self.state.new.cursor.drain_until(new_limit);
        match op.kind {
            OpKind::Add => self.state.old.require_through(op.src.start)?,
            OpKind::Delete => self.state.new.require_through(op.dst.start)?,
            OpKind::Change => {}
        }
        self.emit_unchanged(old_run, new_run);

        let color = self.config.colors.for_kind(op.kind);

        let old_count = match op.kind {
            OpKind::Add => 0,
            OpKind::Delete | OpKind::Change => self.state.old.pending(op.src),
        };
        let old_lines = self.state.old.cursor.take_exactly(old_count)?;
        let old_block = self.renderer.render(
            old_lines,
            &mut self.state.old.position,
            Decoration::edit(op.kind, color),
        );

        let new_block = match op.kind {
            OpKind::Delete => RenderedBlock::placeholder(),
            OpKind::Add | OpKind::Change => {
                let new_count = self.state.new.pending(op.dst);
                let new_lines = self.state.new.cursor.take_exactly(new_count)?;
                self.renderer.render(
                    new_lines,
                    &mut self.state.new.position,
                    Decoration::edit(op.kind, color),
                )
            }
        };

        let report = &mut self.state.report;
        report.old_blocks.push(old_block);
        report.new_blocks.push(new_block);
        report.operations.push(*op);
        report.summary.record(op);

        let (consumed_old, consumed_new) = self.consumed();
        debug!(op = %op, consumed_old, consumed_new, "applied edit operation");

        self.state.phase = Phase::Idle;
        Ok(())
    }

    /// Renders the lines left after the last operation and hands back the
    /// finished report.
    pub fn finish(mut self) -> Report {
        self.state.phase = Phase::DrainingLeftovers;
        let old_run = self.state.old.cursor.drain_rest();
        let new_run = self.state.new.cursor.drain_rest();
        self.emit_unchanged(old_run, new_run);
        self.state.phase = Phase::Done;

        let report = self.state.report;
        let total = report.summary.total();
        info!(
            operations = total.operations,
            lines = total.lines,
            rows = report.old_blocks.len().max(report.new_blocks.len()),
            "report assembled"
        );
        report
    }

    fn emit_unchanged(&mut self, old_run: &[String], new_run: &[String]) {
        if old_run.is_empty() && new_run.is_empty() {
            return;
        }
        if self.config.updates_only {
            // Still counted so later line numbers stay right.
            self.state.old.position += old_run.len();
            self.state.new.position += new_run.len();
            return;
        }
        let old_block =
            self.renderer
                .render(old_run, &mut self.state.old.position, Decoration::unchanged());
        let new_block =
            self.renderer
                .render(new_run, &mut self.state.new.position, Decoration::unchanged());
        self.state.report.old_blocks.push(old_block);
        self.state.report.new_blocks.push(new_block);
    }
}

/// Builds the full report for two files and the raw lines of their
/// normal-format diff.
pub fn assemble(
    config: &ReportConfig,
    old: &LineSequence,
    new: &LineSequence,
    script: &[String],
) -> Result<Report> {
    let mut assembler = Assembler::new(config, old.lines(), new.lines())?;
    if script.iter().all(|line| line.trim().is_empty()) {
        return Err(ReportError::ExternalToolFailure {
            program: "edit script".to_string(),
            message: "no edit operations to render".to_string(),
        });
    }
    for op in EditScript::new(script) {
        assembler.apply(&op?)?;
    }
    Ok(assembler.finish())
}
