//! Run configuration, built once from the command line and passed down.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the staged output workspace below the build root.
pub const WORKSPACE_DIR: &str = "source";

/// Sphinx configuration file preserved across runs.
pub const CONFIG_ARTIFACT: &str = "conf.py";

/// Extension of scanned source files.
pub const SOURCE_EXTENSION: &str = "py";

/// Command run in the build root once all documents are written.
pub const DEFAULT_BUILD_COMMAND: &str = "make html";

/// Text placed between the index title and its toctree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preamble {
    Text(String),
    File(PathBuf),
}

impl Preamble {
    /// Pick a preamble from the two CLI forms. Literal text wins over a file.
    pub fn choose(text: Option<String>, file: Option<PathBuf>) -> Option<Self> {
        text.map(Preamble::Text).or(file.map(Preamble::File))
    }

    /// Resolve to the text that goes into the index.
    pub fn load(&self) -> Result<String> {
        match self {
            Preamble::Text(text) => Ok(text.clone()),
            Preamble::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read preamble file: {}", path.display())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for source files. `None` means the build root's parent.
    pub source_dir: Option<PathBuf>,
    pub build_root: PathBuf,
    pub preamble: Option<Preamble>,
    /// `None` skips the external build.
    pub build_command: Option<Vec<String>>,
}

impl Config {
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: None,
            build_root: build_root.into(),
            preamble: None,
            build_command: Some(split_command(DEFAULT_BUILD_COMMAND)),
        }
    }

    /// Effective source directory.
    pub fn source_dir(&self) -> PathBuf {
        match self.source_dir {
            Some(ref dir) => dir.clone(),
            None => self
                .build_root
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.build_root.join("..")),
        }
    }

    pub fn workspace(&self) -> PathBuf {
        self.build_root.join(WORKSPACE_DIR)
    }
}

/// Split a command line on whitespace. No quoting rules.
pub fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}
