//! Orchestrator: stage → scan every module → index → external build.
//!
//! Files are processed strictly one after another. A failure in any file
//! aborts the run; module documents already written stay where they are and
//! no index is produced.

use crate::config::{Config, SOURCE_EXTENSION};
use crate::error::ScanError;
use crate::model::{derive_module_name, IndexEntry, SourceFile};
use crate::render::{self, DOC_EXTENSION};
use crate::scanner;
use crate::stage::{self, Filesystem};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub modules: Vec<IndexEntry>,
    pub index_path: PathBuf,
}

/// Run the whole pipeline with `config`.
pub fn run(config: &Config, filesystem: &dyn Filesystem) -> Result<RunSummary> {
    let workspace = config.workspace();
    stage::stage_workspace(filesystem, &config.build_root, &workspace)?;

    let source_dir = config.source_dir();
    let sources = discover_sources(&source_dir)?;
    info!(dir = %source_dir.display(), count = sources.len(), "scanning sources");

    let mut modules = Vec::with_capacity(sources.len());
    for path in &sources {
        modules.push(generate_module(filesystem, path, &workspace)?);
    }

    let preamble = config.preamble.as_ref().map(|p| p.load()).transpose()?;
    let title = index_title(&source_dir);
    let index = render::index::render(&title, preamble.as_deref(), &modules);
    let index_path = workspace.join(format!("{}.{}", render::index::INDEX_NAME, DOC_EXTENSION));
    filesystem.write(&index_path, &index)?;
    info!(path = %index_path.display(), modules = modules.len(), "wrote index");

    if let Some(ref command) = config.build_command {
        invoke_build(command, &config.build_root);
    }

    Ok(RunSummary {
        modules,
        index_path,
    })
}

/// Scan one source file and write its document into `workspace`.
///
/// A module named like the index page is rejected before anything is written.
fn generate_module(
    filesystem: &dyn Filesystem,
    path: &Path,
    workspace: &Path,
) -> Result<IndexEntry> {
    if derive_module_name(path) == render::index::INDEX_NAME {
        return Err(ScanError::ReservedModuleName {
            path: path.to_path_buf(),
        }
        .into());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let source = SourceFile::new(path, &content);
    let record = scanner::scan(&source)?;

    let out_path = workspace.join(format!("{}.{}", record.name, DOC_EXTENSION));
    filesystem.write(&out_path, &render::module::render(&record))?;
    debug!(
        source = %path.display(),
        events = record.events.len(),
        order = ?record.order,
        "wrote module document"
    );

    Ok(IndexEntry::from(&record))
}

/// Source files directly inside `dir`, sorted by path.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("source directory not found: {}", dir.display());
    }
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        SOURCE_EXTENSION
    );
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    // Sort for deterministic tie-breaking in the index
    files.sort();
    Ok(files)
}

/// Index title: the last component of the source directory.
pub fn index_title(source_dir: &Path) -> String {
    let resolved = fs::canonicalize(source_dir).unwrap_or_else(|_| source_dir.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| resolved.to_string_lossy().to_string())
}

/// Run the build command in `build_root` and wait for it.
///
/// Its outcome is logged only; the run succeeds either way.
fn invoke_build(command: &[String], build_root: &Path) {
    let Some((program, args)) = command.split_first() else {
        warn!("empty build command, skipping build");
        return;
    };
    info!(command = %command.join(" "), dir = %build_root.display(), "running build");
    match Command::new(program).args(args).current_dir(build_root).status() {
        Ok(status) if status.success() => debug!(%status, "build finished"),
        Ok(status) => warn!(%status, "build command exited unsuccessfully"),
        Err(e) => warn!(error = %e, program = %program, "failed to start build command"),
    }
}
