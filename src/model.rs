//! Data model for a scan run — one record per module, one entry per index line.

use std::path::{Path, PathBuf};

/// A Python source file read in full before scanning.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Module name: the file name with its `.py` extension stripped.
    pub fn module_name(&self) -> String {
        derive_module_name(&self.path)
    }
}

/// Everything the scanner learns about one source file.
#[derive(Debug, Default)]
pub struct ModuleRecord {
    pub name: String,
    /// `__version__` value, quotes stripped
    pub version: Option<String>,
    /// `__order__` value; `None` means a synthetic order is assigned at index time
    pub order: Option<i64>,
    pub events: Vec<MarkupEvent>,
}

/// Heading nesting level, keyed by the comment marker that fences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `#` fence
    Section,
    /// `##` fence
    Subsection,
}

impl HeadingLevel {
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::Section => "#",
            HeadingLevel::Subsection => "##",
        }
    }

    /// reStructuredText underline character for this level.
    pub fn underline(self) -> char {
        match self {
            HeadingLevel::Section => '-',
            HeadingLevel::Subsection => '~',
        }
    }
}

/// A single piece of markup detected on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Heading { level: HeadingLevel, text: String },
    Function { name: String },
    Class { name: String },
    Data { name: String },
}

/// What survives of a module once its document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub order: Option<i64>,
}

impl From<&ModuleRecord> for IndexEntry {
    fn from(record: &ModuleRecord) -> Self {
        Self {
            name: record.name.clone(),
            order: record.order,
        }
    }
}

/// Derive the module name from a source path.
/// "pkg/util.py" → "util", "setup" → "setup"
pub fn derive_module_name(path: &Path) -> String {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    filename
        .strip_suffix(".py")
        .unwrap_or(&filename)
        .to_string()
}

/// Title shown for a module: its name without leading or trailing underscores.
/// Falls back to the raw name when nothing else is left.
pub fn display_title(name: &str) -> &str {
    let trimmed = name.trim_matches('_');
    if trimmed.is_empty() {
        name
    } else {
        trimmed
    }
}
