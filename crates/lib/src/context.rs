//! Per-compilation state.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::consts::LOG_TARGET;
use crate::open_files::OpenFiles;
use crate::resolve::{Anchors, Resolution, ResolveFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
  /// A directive could not run and did nothing.
  Skipped,
  /// Part of an otherwise completed operation failed.
  Suppressed,
  /// Output of the `log` directive.
  Log,
}

/// A message produced while compiling, tied to the source line that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub line: usize,
  pub kind: DiagnosticKind,
  pub message: String,
}

/// Mutable state for compiling one source file.
///
/// `root` and `home` are plain path values, not handles: deleting the
/// directory they name leaves them stale, and users re-check them.
#[derive(Debug)]
pub struct Context {
  cwd: PathBuf,
  root: Option<PathBuf>,
  home: Option<PathBuf>,
  namespace: String,
  files: OpenFiles,
  diagnostics: Vec<Diagnostic>,
  line: usize,
}

impl Context {
  pub fn new(cwd: PathBuf, root: Option<PathBuf>) -> Self {
    Self {
      cwd,
      root,
      home: None,
      namespace: String::new(),
      files: OpenFiles::new(),
      diagnostics: Vec::new(),
      line: 0,
    }
  }

  pub fn cwd(&self) -> &Path {
    &self.cwd
  }

  pub fn root(&self) -> Option<&Path> {
    self.root.as_deref()
  }

  pub fn home(&self) -> Option<&Path> {
    self.home.as_deref()
  }

  /// Namespace of the last `init`, empty before that.
  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  pub fn files(&self) -> &OpenFiles {
    &self.files
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  /// Source line currently being processed, 1-based.
  pub fn line(&self) -> usize {
    self.line
  }

  pub fn anchors(&self) -> Anchors<'_> {
    Anchors {
      cwd: &self.cwd,
      root: self.root.as_deref(),
      home: self.home.as_deref(),
    }
  }

  pub fn resolve(&self, raw: &str, flags: ResolveFlags) -> Resolution {
    self.anchors().resolve(raw, flags)
  }

  /// Consume the context, returning its diagnostics and any files left open.
  pub fn finish(self) -> (Vec<Diagnostic>, Vec<PathBuf>) {
    (self.diagnostics, self.files.into_paths())
  }

  pub(crate) fn set_line(&mut self, line: usize) {
    self.line = line;
  }

  pub(crate) fn set_cwd(&mut self, cwd: PathBuf) {
    debug!(line = self.line, cwd = %cwd.display(), "working location changed");
    self.cwd = cwd;
  }

  pub(crate) fn set_root(&mut self, root: PathBuf) {
    debug!(line = self.line, root = %root.display(), "root set");
    self.root = Some(root);
  }

  pub(crate) fn set_home(&mut self, home: PathBuf) {
    debug!(line = self.line, home = %home.display(), "home set");
    self.home = Some(home);
  }

  pub(crate) fn set_namespace(&mut self, namespace: String) {
    self.namespace = namespace;
  }

  pub(crate) fn files_mut(&mut self) -> &mut OpenFiles {
    &mut self.files
  }

  /// Record a directive that did nothing.
  pub(crate) fn skip(&mut self, message: impl Into<String>) {
    let message = message.into();
    debug!(line = self.line, "{message}");
    self.push(DiagnosticKind::Skipped, message);
  }

  /// Record a partial failure that did not stop the directive.
  pub(crate) fn suppress(&mut self, message: impl Into<String>) {
    let message = message.into();
    warn!(line = self.line, "{message}");
    self.push(DiagnosticKind::Suppressed, message);
  }

  /// Emit a `log` directive message. Always visible.
  pub(crate) fn log(&mut self, message: impl Into<String>) {
    let message = message.into();
    info!(target: LOG_TARGET, line = self.line, "{message}");
    self.push(DiagnosticKind::Log, message);
  }

  fn push(&mut self, kind: DiagnosticKind, message: String) {
    self.diagnostics.push(Diagnostic {
      line: self.line,
      kind,
      message,
    });
  }
}
