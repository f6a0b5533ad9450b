use std::borrow::Cow;

use crate::config::{NumberingMode, ReportConfig};
use crate::script::OpKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    /// Lines untouched by any edit.
    Unchanged,
    /// One side of an edit operation.
    Edit(OpKind),
    /// Blank cell keeping the two columns aligned.
    Placeholder,
}

/// One table cell worth of formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub role: BlockRole,
    pub text: String,
    /// Source lines shown in the block.
    pub line_count: usize,
}

impl RenderedBlock {
    pub fn placeholder() -> Self {
        RenderedBlock {
            role: BlockRole::Placeholder,
            text: String::new(),
            line_count: 0,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.role == BlockRole::Placeholder
    }
}

/// Per-call decoration: caption label and highlight color.
#[derive(Debug, Clone, Copy)]
pub struct Decoration<'a> {
    pub role: BlockRole,
    pub label: Option<&'a str>,
    pub color: Option<&'a str>,
}

impl<'a> Decoration<'a> {
    pub fn unchanged() -> Self {
        Decoration {
            role: BlockRole::Unchanged,
            label: None,
            color: None,
        }
    }

    pub fn edit(kind: OpKind, color: &'a str) -> Self {
        Decoration {
            role: BlockRole::Edit(kind),
            label: Some(kind.label()),
            color: Some(color),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    numbering: NumberingMode,
    number_width: usize,
    truncate: Option<usize>,
    escape_html: bool,
}

impl Renderer {
    pub fn new(config: &ReportConfig, number_width: usize) -> Self {
        Renderer {
            numbering: config.numbering,
            number_width: number_width.max(1),
            truncate: config.truncate,
            escape_html: config.escape_html,
        }
    }

    /// Sizes the number column for the longer of the two files.
    pub fn for_files(config: &ReportConfig, old_len: usize, new_len: usize) -> Self {
        let width = old_len.max(new_len).to_string().len();
        Self::new(config, width)
    }

    /// Renders `lines` as one block. `position` is the number of lines of
    /// this file already accounted for and is advanced by `lines.len()`.
    /// An empty run yields a placeholder so every call produces one cell.
    pub fn render(
        &self,
        lines: &[String],
        position: &mut usize,
        decoration: Decoration<'_>,
    ) -> RenderedBlock {
        if lines.is_empty() {
            return RenderedBlock::placeholder();
        }

        let mut rendered = Vec::with_capacity(lines.len() + 1);
        let mut widest = 0;
        for line in lines {
            *position += 1;
            let prefix = self.number_prefix(*position);
            let content = self.truncated(line);
            let formatted = format!("{prefix}{}", self.escaped(&content));
            widest = widest.max(prefix.chars().count() + content.chars().count());
            rendered.push(formatted);
        }

        if let Some(label) = decoration.label.filter(|l| !l.is_empty()) {
            let caption = format!("== {label} ==");
            let width = widest.max(caption.len());
            rendered.insert(0, format!("{caption:^width$}").trim_end().to_string());
        }

        let mut text = rendered.join("\n");
        if let Some(color) = decoration.color.filter(|c| !c.trim().is_empty()) {
            text = format!("<span style=\"background-color: {}\">{text}</span>", color.trim());
        }

        RenderedBlock {
            role: decoration.role,
            text,
            line_count: lines.len(),
        }
    }

    fn number_prefix(&self, number: usize) -> String {
        let width = self.number_width;
        match self.numbering {
            NumberingMode::Off => String::new(),
            NumberingMode::Absolute => format!("{number:>width$} "),
            NumberingMode::Bracketed => format!("[{number:>width$}] "),
        }
    }

    fn truncated<'l>(&self, line: &'l str) -> Cow<'l, str> {
        match self.truncate {
            Some(limit) if line.chars().count() > limit => {
                Cow::Owned(line.chars().take(limit).collect())
            }
            _ => Cow::Borrowed(line),
        }
    }

    // Only '<' is replaced; '&' and '>' pass through untouched.
    fn escaped<'l>(&self, content: &'l str) -> Cow<'l, str> {
        if self.escape_html && content.contains('<') {
            Cow::Owned(content.replace('<', "&lt;"))
        } else {
            Cow::Borrowed(content)
        }
    }
}
