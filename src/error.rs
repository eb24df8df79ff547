//! Fatal authoring and setup errors. Each one aborts the whole run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid __order__ value `{value}` in {}:{line}: expected an integer", path.display())]
    InvalidOrder {
        path: PathBuf,
        /// 1-based
        line: usize,
        value: String,
    },

    #[error(
        "conf.py not found in {} or {}",
        workspace.display(),
        build_root.display()
    )]
    MissingConfigArtifact {
        workspace: PathBuf,
        build_root: PathBuf,
    },

    #[error("{} would overwrite the generated index page; rename the module", path.display())]
    ReservedModuleName { path: PathBuf },
}
