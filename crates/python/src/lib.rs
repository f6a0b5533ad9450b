use pyo3::{exceptions::PyValueError, prelude::*};

use htmldiff::{
    assemble, write_page, BuiltinDiff, FileLabel, HighlightColors, LineSequence, NumberingMode,
    OpKind, PageMeta, Report, ReportConfig,
};

fn numbering_mode(name: Option<&str>) -> PyResult<NumberingMode> {
    match name {
        None | Some("off") => Ok(NumberingMode::Off),
        Some("absolute") => Ok(NumberingMode::Absolute),
        Some("bracketed") => Ok(NumberingMode::Bracketed),
        Some(other) => Err(PyValueError::new_err(format!(
            "numbering must be 'off', 'absolute' or 'bracketed', got '{other}'"
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_report(
    old_text: &str,
    new_text: &str,
    numbering: Option<&str>,
    only_changes: bool,
    truncate: Option<usize>,
    escape_html: bool,
    tab_size: usize,
    colors: Option<(String, String, String)>,
) -> PyResult<Report> {
    let mut builder = ReportConfig::builder();
    builder
        .numbering(numbering_mode(numbering)?)
        .updates_only(only_changes)
        .escape_html(escape_html)
        .tab_size(tab_size);
    if let Some(limit) = truncate {
        builder.truncate(limit);
    }
    if let Some((add, delete, change)) = colors {
        builder.colors(HighlightColors { add, delete, change });
    }
    let config = builder
        .build()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let old = LineSequence::from_text(old_text, config.tab_size);
    let new = LineSequence::from_text(new_text, config.tab_size);
    let script = BuiltinDiff.script(&old, &new);
    assemble(&config, &old, &new, &script).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Renders a side-by-side HTML page comparing two texts.
///
/// Args:
///     old_text (str): The base text.
///     new_text (str): The changed text.
///     numbering (str | None): 'off', 'absolute' or 'bracketed'.
///     colors (tuple[str, str, str] | None): add, delete and change highlights.
#[pyfunction]
#[pyo3(signature = (old_text, new_text, numbering=None, only_changes=false, truncate=None, escape_html=true, tab_size=8, colors=None, old_name="old", new_name="new"))]
#[allow(clippy::too_many_arguments)]
fn render_html(
    old_text: &str,
    new_text: &str,
    numbering: Option<&str>,
    only_changes: bool,
    truncate: Option<usize>,
    escape_html: bool,
    tab_size: usize,
    colors: Option<(String, String, String)>,
    old_name: &str,
    new_name: &str,
) -> PyResult<String> {
    let report = build_report(
        old_text,
        new_text,
        numbering,
        only_changes,
        truncate,
        escape_html,
        tab_size,
        colors,
    )?;
    let meta = PageMeta {
        title: None,
        old: FileLabel {
            name: old_name.to_string(),
            size: Some(old_text.len() as u64),
        },
        new: FileLabel {
            name: new_name.to_string(),
            size: Some(new_text.len() as u64),
        },
    };
    let mut page = Vec::new();
    write_page(&mut page, &report, &meta)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    String::from_utf8(page).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Per-kind `(name, operations, lines)` rows for add, delete, change
/// and a final total row.
#[pyfunction]
#[pyo3(signature = (old_text, new_text))]
fn summarize(old_text: &str, new_text: &str) -> PyResult<Vec<(String, usize, usize)>> {
    let report = build_report(old_text, new_text, None, true, None, true, 0, None)?;
    let mut rows: Vec<(String, usize, usize)> = OpKind::ALL
        .iter()
        .map(|kind| {
            let count = report.summary.get(*kind);
            (kind.label().to_string(), count.operations, count.lines)
        })
        .collect();
    let total = report.summary.total();
    rows.push(("total".to_string(), total.operations, total.lines));
    Ok(rows)
}

/// Python module definition
// this name must be same as package name
#[pymodule]
fn htmldiff_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(render_html, m)?)?;
    m.add_function(wrap_pyfunction!(summarize, m)?)?;
    Ok(())
}
