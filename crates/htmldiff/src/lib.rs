//! Side-by-side HTML reports rebuilt from normal-format (`3c3,4`) diff
//! scripts and the two files they describe.

pub mod config;
pub mod cursor;
pub mod error;
pub mod page;
pub mod render;
pub mod report;
pub mod script;
pub mod sink;
pub mod source;
pub mod summary;
pub mod tool;

pub use config::{HighlightColors, NumberingMode, ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result, Side};
pub use page::{write_page, FileLabel, PageMeta};
pub use render::{BlockRole, RenderedBlock, Renderer};
pub use report::{assemble, Assembler, Phase, Report, ReportRow};
pub use script::{EditOperation, EditScript, LineRange, OpKind};
pub use source::LineSequence;
pub use summary::{KindCount, Summary};
pub use tool::{BuiltinDiff, DiffInput, ExternalDiff, ScriptSource};
