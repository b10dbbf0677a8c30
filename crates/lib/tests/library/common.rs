//! Shared helpers for library integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use mcfc_lib::{CompileOptions, CompileResult, compile};
use tempfile::TempDir;

/// A scratch directory holding a source file and its output.
pub struct Workspace {
  pub temp: TempDir,
}

impl Workspace {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Canonical path of the scratch directory.
  pub fn dir(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.dir().join(relative)
  }

  pub fn write(&self, relative: &str, content: &str) -> PathBuf {
    let path = self.path(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
  }

  pub fn read(&self, relative: &str) -> String {
    fs::read_to_string(self.path(relative)).unwrap()
  }

  /// Write `lines` to `pack.mcf` and compile it into the scratch directory.
  pub fn compile_lines(&self, lines: &[&str]) -> CompileResult {
    let source = self.write("pack.mcf", &lines.join("\n"));
    compile(&CompileOptions::new(source)).unwrap()
  }
}

pub fn json(path: &Path) -> serde_json::Value {
  serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
