//! Shared test helpers for CLI integration tests.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;
use zip::ZipArchive;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the source file and
/// everything the compiler writes.
pub struct TestEnv {
  pub temp: TempDir,
  pub source_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file.
  ///
  /// Copies the fixture content to a temporary `pack.mcf` file.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    std::fs::write(&env.source_path, fixture_content(name)).unwrap();
    env
  }

  /// Create from inline source lines.
  pub fn from_lines(lines: &[&str]) -> Self {
    let env = Self::empty();
    std::fs::write(&env.source_path, lines.join("\n")).unwrap();
    env
  }

  /// Create an empty test environment.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let source_path = temp.path().join("pack.mcf");
    Self { temp, source_path }
  }

  /// The canonical temp directory, which is where output lands by default.
  pub fn dir(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Read a file relative to the temp directory.
  pub fn read_file(&self, relative_path: &str) -> String {
    let path = self.temp.path().join(relative_path);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
  }

  /// Get a pre-configured Command for the mcfc binary.
  ///
  /// Runs inside the temp directory with `RUST_LOG` cleared so the default
  /// filter applies.
  pub fn mcfc_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("mcfc");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// Sorted entry names of a zip archive.
pub fn zip_entries(archive: &Path) -> Vec<String> {
  let zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
  let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
  names.sort();
  names
}

/// Content of one zip entry.
pub fn zip_entry(archive: &Path, name: &str) -> String {
  let mut zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
  let mut entry = zip.by_name(name).unwrap();
  let mut content = String::new();
  entry.read_to_string(&mut content).unwrap();
  content
}
