use derive_builder::Builder;

use crate::error::{ReportError, Result};
use crate::script::OpKind;

/// How lines are numbered in rendered blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberingMode {
    #[default]
    Off,
    /// `  12 text`
    Absolute,
    /// `[  12] text`
    Bracketed,
}

/// Background colors for the three edit kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightColors {
    pub add: String,
    pub delete: String,
    pub change: String,
}

impl Default for HighlightColors {
    fn default() -> Self {
        HighlightColors {
            add: "#ccffcc".to_string(),
            delete: "#ffcccc".to_string(),
            change: "#ffffaa".to_string(),
        }
    }
}

impl HighlightColors {
    pub fn for_kind(&self, kind: OpKind) -> &str {
        match kind {
            OpKind::Add => &self.add,
            OpKind::Delete => &self.delete,
            OpKind::Change => &self.change,
        }
    }

    /// Colors are compared trimmed and case-insensitively, so `#FFF` and
    /// `#fff` count as the same color. Each color is written into a quoted
    /// `style` attribute and must not contain `"`, `<` or `>`.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("add", &self.add),
            ("delete", &self.delete),
            ("change", &self.change),
        ];
        for (kind, color) in &named {
            if color.contains(['"', '<', '>']) {
                return Err(ReportError::InvalidHighlightColor {
                    kind: *kind,
                    color: color.to_string(),
                });
            }
        }
        for (i, (first, a)) in named.iter().enumerate() {
            for (second, b) in &named[i + 1..] {
                if a.trim().eq_ignore_ascii_case(b.trim()) {
                    return Err(ReportError::DuplicateHighlightColors {
                        color: a.trim().to_string(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct ReportConfig {
    pub numbering: NumberingMode,
    /// Render only edit blocks; unchanged runs are read but not shown.
    pub updates_only: bool,
    /// Maximum characters of line content kept per line.
    #[builder(setter(strip_option))]
    pub truncate: Option<usize>,
    /// Replace `<` with `&lt;` in line content.
    pub escape_html: bool,
    pub colors: HighlightColors,
    pub tab_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            numbering: NumberingMode::Off,
            updates_only: false,
            truncate: None,
            escape_html: true,
            colors: HighlightColors::default(),
            tab_size: 8,
        }
    }
}

impl ReportConfig {
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.colors.validate()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let config = ReportConfig::builder()
            .numbering(NumberingMode::Bracketed)
            .truncate(40)
            .build()
            .unwrap();
        assert_eq!(config.numbering, NumberingMode::Bracketed);
        assert_eq!(config.truncate, Some(40));
        assert!(config.escape_html);
        assert_eq!(config.tab_size, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn duplicate_colors_are_rejected() {
        let colors = HighlightColors {
            add: "#ABCDEF".into(),
            delete: "red".into(),
            change: " #abcdef ".into(),
        };
        match colors.validate() {
            Err(ReportError::DuplicateHighlightColors { first, second, .. }) => {
                assert_eq!(first, "add");
                assert_eq!(second, "change");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn colors_cannot_escape_the_style_attribute() {
        for bad in ["red\" onmouseover=\"x", "red<script>", "#fff>"] {
            let colors = HighlightColors {
                delete: bad.into(),
                ..HighlightColors::default()
            };
            match colors.validate() {
                Err(ReportError::InvalidHighlightColor { kind, color }) => {
                    assert_eq!(kind, "delete");
                    assert_eq!(color, bad);
                }
                other => panic!("unexpected {other:?} for {bad:?}"),
            }
        }
        let named = HighlightColors {
            add: "lightgreen".into(),
            delete: "rgb(255, 200, 200)".into(),
            change: "#ffa".into(),
        };
        assert!(named.validate().is_ok());
    }

    #[test]
    fn color_lookup_by_kind() {
        let colors = HighlightColors::default();
        assert_eq!(colors.for_kind(OpKind::Delete), "#ffcccc");
        assert_ne!(colors.for_kind(OpKind::Add), colors.for_kind(OpKind::Change));
    }
}
