//! Best-effort filesystem mutations used by directives.
//!
//! None of these abort a compilation. Recursive deletion in particular keeps
//! going past entries it cannot remove and hands the failures back in a
//! [`DeleteReport`].

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// One entry a recursive delete could not remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFailure {
  pub path: PathBuf,
  pub message: String,
}

impl fmt::Display for DeleteFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "failed to delete {}: {}", self.path.display(), self.message)
  }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct DeleteReport {
  pub files_removed: usize,
  pub dirs_removed: usize,
  pub failures: Vec<DeleteFailure>,
}

impl DeleteReport {
  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
  }

  fn record(mut self, path: &Path, is_dir: bool, result: io::Result<()>) -> Self {
    match result {
      Ok(()) => {
        debug!(path = %path.display(), "removed");
        if is_dir {
          self.dirs_removed += 1;
        } else {
          self.files_removed += 1;
        }
      }
      Err(e) => self.fail(path, e.to_string()),
    }
    self
  }

  fn fail(&mut self, path: &Path, message: String) {
    debug!(path = %path.display(), error = %message, "failed to delete, continuing");
    self.failures.push(DeleteFailure {
      path: path.to_path_buf(),
      message,
    });
  }
}

/// Create `path` and any missing ancestors. Succeeds if it already exists.
pub fn create_dir(path: &Path) -> io::Result<()> {
  fs::create_dir_all(path)?;
  debug!(path = %path.display(), "created directory");
  Ok(())
}

/// Delete everything under `path`, files before subdirectories, deepest
/// first. With `delete_self` the directory itself goes last; otherwise it is
/// left in place, empty.
///
/// Individual failures are collected rather than returned early.
pub fn delete_recursive(path: &Path, delete_self: bool) -> DeleteReport {
  let min_depth = if delete_self { 0 } else { 1 };

  WalkDir::new(path)
    .min_depth(min_depth)
    .contents_first(true)
    .sort_by(files_then_dirs)
    .into_iter()
    .fold(DeleteReport::default(), |mut report, entry| match entry {
      Ok(entry) => {
        let is_dir = entry.file_type().is_dir();
        let result = if is_dir {
          fs::remove_dir(entry.path())
        } else {
          fs::remove_file(entry.path())
        };
        report.record(entry.path(), is_dir, result)
      }
      Err(e) => {
        let failed = e.path().unwrap_or(path).to_path_buf();
        report.fail(&failed, e.to_string());
        report
      }
    })
}

/// Delete a single file. Returns `Ok(false)` when there was nothing to delete.
pub fn delete_file(path: &Path) -> io::Result<bool> {
  if !path.is_file() {
    return Ok(false);
  }
  fs::remove_file(path)?;
  debug!(path = %path.display(), "deleted file");
  Ok(true)
}

fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
  let a_dir = a.file_type().is_dir();
  let b_dir = b.file_type().is_dir();
  a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
}
