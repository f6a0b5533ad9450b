use crate::Cli;
use anyhow::{Context, Result};
use htmldiff::{
    assemble, write_page, BuiltinDiff, DiffInput, ExternalDiff, FileLabel, HighlightColors,
    LineSequence, NumberingMode, PageMeta, ReportConfig, ScriptSource,
};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;

pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = build_config(cli)?;
    config.validate()?;

    let old = LineSequence::read(&cli.old, config.tab_size)
        .with_context(|| format!("Failed to read old file: {}", cli.old.display()))?;
    let new = LineSequence::read(&cli.new, config.tab_size)
        .with_context(|| format!("Failed to read new file: {}", cli.new.display()))?;

    let source: Box<dyn ScriptSource> = if cli.builtin {
        Box::new(BuiltinDiff)
    } else {
        Box::new(ExternalDiff {
            program: cli.diff_program.clone(),
            args: cli.diff_args.clone(),
        })
    };
    let script = source
        .edit_script(
            DiffInput {
                path: &cli.old,
                lines: &old,
            },
            DiffInput {
                path: &cli.new,
                lines: &new,
            },
        )
        .context("Failed to compute the line diff")?;

    let report = assemble(&config, &old, &new, &script).context("Failed to build the report")?;

    let meta = PageMeta {
        title: cli.title.clone(),
        old: FileLabel::from_path(&cli.old),
        new: FileLabel::from_path(&cli.new),
    };
    let mut page = Vec::new();
    write_page(&mut page, &report, &meta)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &page)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!(path = %path.display(), bytes = page.len(), "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&page)?;
            handle.flush()?;
        }
    }

    if report.has_differences() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::from(0))
    }
}

fn build_config(cli: &Cli) -> Result<ReportConfig> {
    let numbering = if cli.line_numbers {
        NumberingMode::Absolute
    } else if cli.bracket_numbers {
        NumberingMode::Bracketed
    } else {
        NumberingMode::Off
    };

    let mut builder = ReportConfig::builder();
    builder
        .numbering(numbering)
        .updates_only(cli.only_changes)
        .escape_html(!cli.raw_html)
        .tab_size(cli.tab_size)
        .colors(HighlightColors {
            add: cli.add_color.clone(),
            delete: cli.delete_color.clone(),
            change: cli.change_color.clone(),
        });
    if let Some(limit) = cli.truncate {
        builder.truncate(limit);
    }
    Ok(builder.build()?)
}
