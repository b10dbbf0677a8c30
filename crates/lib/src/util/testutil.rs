//! Test utilities for mcfc-lib.
//!
//! A [`Sandbox`] is a throwaway output root with a [`Context`] rooted at it.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::context::Context;

pub struct Sandbox {
  _temp: TempDir,
  root: PathBuf,
}

impl Sandbox {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    // Canonical so comparisons hold on platforms where the temp dir is a symlink.
    let root = dunce::canonicalize(temp.path()).unwrap();
    Self { _temp: temp, root }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// A fresh context with both the working location and root at the sandbox.
  pub fn context(&self) -> Context {
    Context::new(self.root.clone(), Some(self.root.clone()))
  }

  /// Write a file relative to the sandbox, creating parents.
  pub fn write(&self, relative_path: &str, content: &str) {
    let path = self.root.join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  /// Read a file relative to the sandbox.
  pub fn read(&self, relative_path: &str) -> String {
    let path = self.root.join(relative_path);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
  }
}

/// Join source lines the way a file on disk would hold them.
pub fn source(lines: &[&str]) -> String {
  lines.join("\n")
}
