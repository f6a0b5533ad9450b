//! Wraps an assembled [`Report`] in a standalone HTML document.

use std::io::{self, Write};
use std::path::Path;

use crate::report::Report;
use crate::script::OpKind;

const STYLE: &str = "\
body { font-family: sans-serif; }
table.diff { border-collapse: collapse; width: 100%; }
table.diff td { vertical-align: top; border: 1px solid #ccc; padding: 0 4px; width: 50%; }
table.diff th { background: #eee; border: 1px solid #ccc; }
table.diff pre { margin: 0; font-family: monospace; }
table.summary { border-collapse: collapse; margin-top: 1em; }
table.summary td, table.summary th { border: 1px solid #ccc; padding: 2px 8px; text-align: right; }
";

/// Header information for one compared file.
#[derive(Debug, Clone, Default)]
pub struct FileLabel {
    pub name: String,
    pub size: Option<u64>,
}

impl FileLabel {
    pub fn from_path(path: &Path) -> Self {
        FileLabel {
            name: path.display().to_string(),
            size: std::fs::metadata(path).ok().map(|m| m.len()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub old: FileLabel,
    pub new: FileLabel,
}

// Page chrome is fully escaped; cell text was already handled by the renderer.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn header_cell<W: Write>(w: &mut W, label: &FileLabel) -> io::Result<()> {
    match label.size {
        Some(size) => writeln!(
            w,
            "<th title=\"{} bytes\">{}</th>",
            size,
            escape(&label.name)
        ),
        None => writeln!(w, "<th>{}</th>", escape(&label.name)),
    }
}

pub fn write_page<W: Write>(w: &mut W, report: &Report, meta: &PageMeta) -> io::Result<()> {
    let title = meta
        .title
        .clone()
        .unwrap_or_else(|| format!("{} vs. {}", meta.old.name, meta.new.name));

    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, "<html>\n<head>\n<meta charset=\"utf-8\">")?;
    writeln!(w, "<title>{}</title>", escape(&title))?;
    writeln!(w, "<style>\n{STYLE}</style>\n</head>\n<body>")?;
    writeln!(w, "<h1>{}</h1>", escape(&title))?;

    writeln!(w, "<table class=\"diff\">\n<tr>")?;
    header_cell(w, &meta.old)?;
    header_cell(w, &meta.new)?;
    writeln!(w, "</tr>")?;
    for row in report.rows() {
        writeln!(
            w,
            "<tr><td><pre>{}</pre></td><td><pre>{}</pre></td></tr>",
            row.old.text, row.new.text
        )?;
    }
    writeln!(w, "</table>")?;

    write_summary(w, report)?;
    writeln!(w, "</body>\n</html>")?;
    Ok(())
}

fn write_summary<W: Write>(w: &mut W, report: &Report) -> io::Result<()> {
    writeln!(w, "<table class=\"summary\">")?;
    writeln!(w, "<tr><th></th><th>operations</th><th>lines</th></tr>")?;
    for kind in OpKind::ALL {
        let count = report.summary.get(kind);
        writeln!(
            w,
            "<tr><th>{}</th><td>{}</td><td>{}</td></tr>",
            kind.label(),
            count.operations,
            count.lines
        )?;
    }
    let total = report.summary.total();
    writeln!(
        w,
        "<tr><th>total</th><td>{}</td><td>{}</td></tr>",
        total.operations, total.lines
    )?;
    writeln!(w, "</table>")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::assemble;
    use crate::source::LineSequence;

    #[test]
    fn page_has_one_row_per_block_pair_and_summary() {
        let old = LineSequence::from_text("a\nb\nc\n", 0);
        let new = LineSequence::from_text("a\nc\n", 0);
        let script: Vec<String> = vec!["2d1".into(), "< b".into()];
        let report = assemble(&ReportConfig::default(), &old, &new, &script).unwrap();

        let meta = PageMeta {
            title: None,
            old: FileLabel {
                name: "old<1>.txt".into(),
                size: Some(6),
            },
            new: FileLabel {
                name: "new.txt".into(),
                size: None,
            },
        };
        let mut out = Vec::new();
        write_page(&mut out, &report, &meta).unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains("<title>old&lt;1&gt;.txt vs. new.txt</title>"));
        assert!(html.contains("<th title=\"6 bytes\">old&lt;1&gt;.txt</th>"));
        assert_eq!(html.matches("<tr><td>").count(), 3);
        assert!(html.contains("<tr><th>delete</th><td>1</td><td>1</td></tr>"));
        assert!(html.contains("<tr><th>total</th><td>1</td><td>1</td></tr>"));
    }
}
