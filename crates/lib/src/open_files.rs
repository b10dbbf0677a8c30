//! The stack of output files receiving content.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Open output files, most recently opened last.
///
/// Content always goes to the top entry only. Nothing requires the stack to
/// be balanced when a compilation ends.
#[derive(Debug, Default)]
pub struct OpenFiles {
  stack: Vec<PathBuf>,
}

impl OpenFiles {
  pub fn new() -> Self {
    Self::default()
  }

  /// Make sure `path` exists as a file, creating it (and its parent
  /// directories) empty if needed, then push it.
  ///
  /// Existing content is kept; writes append.
  pub fn open(&mut self, path: &Path) -> io::Result<()> {
    if !path.is_file() {
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
      }
      OpenOptions::new().create(true).append(true).open(path)?;
    }
    self.stack.push(path.to_path_buf());
    Ok(())
  }

  /// Pop the current output file. `None` if nothing was open.
  pub fn close(&mut self) -> Option<PathBuf> {
    self.stack.pop()
  }

  /// The file content is currently written to.
  pub fn current(&self) -> Option<&Path> {
    self.stack.last().map(PathBuf::as_path)
  }

  pub fn depth(&self) -> usize {
    self.stack.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stack.is_empty()
  }

  /// Append `content` (trailing whitespace trimmed) plus a newline to the
  /// current file.
  ///
  /// Returns `Ok(false)` when the write was dropped: nothing is open, or the
  /// current file has disappeared since it was opened.
  pub fn write(&self, content: &str) -> io::Result<bool> {
    let Some(path) = self.current() else {
      return Ok(false);
    };
    if !path.is_file() {
      debug!(path = %path.display(), "open file no longer exists, dropping content");
      return Ok(false);
    }

    let mut file = OpenOptions::new().append(true).open(path)?;
    writeln!(file, "{}", content.trim_end())?;
    Ok(true)
  }

  /// Everything still open, bottom of the stack first.
  pub fn into_paths(self) -> Vec<PathBuf> {
    self.stack
  }
}
