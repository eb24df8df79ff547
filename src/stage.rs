//! Output workspace staging.
//!
//! Each run regenerates `<build_root>/source` from scratch. The one file kept
//! across runs is the Sphinx `conf.py`:
//!
//! 1. a `conf.py` inside the workspace is saved to the build root;
//! 2. otherwise a `conf.py` already in the build root is used;
//! 3. otherwise staging fails.
//!
//! The workspace is then removed, recreated empty, and `conf.py` copied back.
//! Manual edits to anything else in the workspace are lost.

use crate::config::CONFIG_ARTIFACT;
use crate::error::ScanError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Filesystem operations for the output side of a run: staging and
/// document writes. Source discovery and reads go to the real disk.
pub trait Filesystem {
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// The real filesystem.
pub struct OsFs;

impl Filesystem for OsFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)
            .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove {}", path.display()))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Prepare `workspace` for a fresh run, preserving `conf.py` via `build_root`.
///
/// Returns the path of the preserved artifact inside the new workspace.
pub fn stage_workspace(fs: &dyn Filesystem, build_root: &Path, workspace: &Path) -> Result<PathBuf> {
    let staged = workspace.join(CONFIG_ARTIFACT);
    let saved = build_root.join(CONFIG_ARTIFACT);

    if fs.is_file(&staged) {
        debug!(from = %staged.display(), to = %saved.display(), "saving config artifact");
        fs.copy(&staged, &saved)?;
    } else if !fs.is_file(&saved) {
        return Err(ScanError::MissingConfigArtifact {
            workspace: workspace.to_path_buf(),
            build_root: build_root.to_path_buf(),
        }
        .into());
    }

    if fs.is_dir(workspace) {
        fs.remove_dir_all(workspace)?;
    }
    fs.create_dir_all(workspace)?;
    fs.copy(&saved, &staged)?;

    info!(workspace = %workspace.display(), "staged output workspace");
    Ok(staged)
}

#[cfg(test)]
pub mod fake {
    use super::Filesystem;
    use anyhow::{Context, Result};
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::{Path, PathBuf};

    /// In-memory filesystem: files map to contents, directories are tracked
    /// explicitly.
    #[derive(Default)]
    pub struct FakeFs {
        files: RefCell<BTreeMap<PathBuf, String>>,
        dirs: RefCell<BTreeSet<PathBuf>>,
    }

    impl FakeFs {
        pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
            let path = path.as_ref().to_path_buf();
            if let Some(parent) = path.parent() {
                self.dirs.borrow_mut().insert(parent.to_path_buf());
            }
            self.files.borrow_mut().insert(path, contents.to_string());
            self
        }

        pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.borrow().get(path.as_ref()).cloned()
        }
    }

    impl Filesystem for FakeFs {
        fn is_file(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.borrow().contains(path)
        }

        fn copy(&self, from: &Path, to: &Path) -> Result<()> {
            let contents = self
                .files
                .borrow()
                .get(from)
                .cloned()
                .with_context(|| format!("no such file: {}", from.display()))?;
            self.files.borrow_mut().insert(to.to_path_buf(), contents);
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> Result<()> {
            self.files.borrow_mut().retain(|p, _| !p.starts_with(path));
            self.dirs.borrow_mut().retain(|p| !p.starts_with(path));
            Ok(())
        }

        fn create_dir_all(&self, path: &Path) -> Result<()> {
            self.dirs.borrow_mut().insert(path.to_path_buf());
            Ok(())
        }

        fn write(&self, path: &Path, contents: &str) -> Result<()> {
            let parent = path.parent().unwrap_or(Path::new(""));
            anyhow::ensure!(
                self.dirs.borrow().contains(parent),
                "no such directory: {}",
                parent.display()
            );
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }
}
