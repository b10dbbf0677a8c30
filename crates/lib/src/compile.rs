//! Compile source files into datapack trees.
//!
//! This is the host boundary: given a source file and an output root, read
//! the source, interpret it against a fresh [`Context`], and optionally
//! package the result. Only an unreadable source, an unusable output root or
//! a failed packaging step is fatal.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::UTF8_BOM;
use crate::context::{Context, Diagnostic, DiagnosticKind};
use crate::interpret;
use crate::package::{self, PackageError};

#[derive(Debug, Error)]
pub enum CompileError {
  #[error("failed to read source file {}: {source}", path.display())]
  ReadSource { path: PathBuf, source: std::io::Error },

  #[error("failed to prepare output root {}: {source}", path.display())]
  OutputRoot { path: PathBuf, source: std::io::Error },

  #[error("failed to package {}: {source}", dir.display())]
  Package { dir: PathBuf, source: PackageError },
}

/// Options for compiling one source file.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
  /// The source file to read
  pub source: PathBuf,
  /// Where output goes; defaults to the source file's directory
  pub output_root: Option<PathBuf>,
  /// Zip the datapack once the source is consumed
  pub package: bool,
  /// Archive location; implies `package`. Defaults to `<root>.zip` beside the root
  pub archive: Option<PathBuf>,
}

impl CompileOptions {
  pub fn new(source: impl Into<PathBuf>) -> Self {
    Self {
      source: source.into(),
      ..Self::default()
    }
  }

  fn wants_package(&self) -> bool {
    self.package || self.archive.is_some()
  }
}

/// What one compilation left behind.
#[derive(Debug, Clone, Serialize)]
pub struct CompileResult {
  pub source: PathBuf,
  pub output_root: PathBuf,
  /// The root reference when the source ended (the datapack after `init`)
  pub root: Option<PathBuf>,
  pub lines: usize,
  pub diagnostics: Vec<Diagnostic>,
  /// Output files never closed; not an error
  pub unclosed: Vec<PathBuf>,
  pub archive: Option<PathBuf>,
}

impl CompileResult {
  pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
    self.diagnostics.iter().filter(move |d| d.kind == kind)
  }
}

/// Outcome of compiling several sources in order.
#[derive(Debug)]
pub struct BatchOutcome {
  pub compiled: Vec<CompileResult>,
  /// The fatal error that stopped the batch, if any
  pub error: Option<CompileError>,
}

impl BatchOutcome {
  /// Number of sources that were opened and compiled.
  pub fn files_opened(&self) -> usize {
    self.compiled.len()
  }
}

/// Compile a single source file.
///
/// # Errors
///
/// Returns an error if the source cannot be read, the output root cannot be
/// created, or packaging was requested and failed. Directive failures are
/// never errors; they are returned as diagnostics.
pub fn compile(options: &CompileOptions) -> Result<CompileResult, CompileError> {
  let bytes = fs::read(&options.source).map_err(|e| CompileError::ReadSource {
    path: options.source.clone(),
    source: e,
  })?;
  let (text, invalid_line) = decode_source(&bytes);

  let output_root = prepare_output_root(options)?;
  info!(source = %options.source.display(), output = %output_root.display(), "compiling");

  let mut ctx = Context::new(output_root.clone(), Some(output_root.clone()));
  if let Some(line) = invalid_line {
    ctx.set_line(line);
    ctx.skip("source is not valid UTF-8, invalid bytes were replaced");
  }
  interpret::run(&mut ctx, &text);

  let root = ctx.root().map(Path::to_path_buf);
  let lines = ctx.line();
  let (diagnostics, unclosed) = ctx.finish();
  if !unclosed.is_empty() {
    debug!(count = unclosed.len(), "files left open at end of source");
  }

  let archive = if options.wants_package() {
    let dir = root.clone().unwrap_or_else(|| output_root.clone());
    Some(package_root(&dir, options.archive.as_deref())?)
  } else {
    None
  };

  Ok(CompileResult {
    source: options.source.clone(),
    output_root,
    root,
    lines,
    diagnostics,
    unclosed,
    archive,
  })
}

/// Compile sources one after another, each with its own context.
///
/// Stops at the first fatal error; everything compiled before it stays on
/// disk and is reported.
pub fn compile_all(sources: &[CompileOptions]) -> BatchOutcome {
  let mut compiled = Vec::with_capacity(sources.len());
  for options in sources {
    match compile(options) {
      Ok(result) => compiled.push(result),
      Err(e) => {
        return BatchOutcome {
          compiled,
          error: Some(e),
        };
      }
    }
  }
  BatchOutcome { compiled, error: None }
}

/// Decode source bytes leniently and drop a leading byte order mark.
///
/// Invalid sequences become U+FFFD; the second value is the first line that
/// needed a replacement.
fn decode_source(bytes: &[u8]) -> (String, Option<usize>) {
  let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
  match String::from_utf8_lossy(bytes) {
    Cow::Borrowed(text) => (text.to_string(), None),
    Cow::Owned(text) => {
      let line = text
        .lines()
        .position(|l| l.contains(char::REPLACEMENT_CHARACTER))
        .map(|index| index + 1);
      (text, line)
    }
  }
}

fn prepare_output_root(options: &CompileOptions) -> Result<PathBuf, CompileError> {
  let requested = match &options.output_root {
    Some(root) => root.clone(),
    None => options
      .source
      .parent()
      .filter(|p| !p.as_os_str().is_empty())
      .map(Path::to_path_buf)
      .unwrap_or_else(|| PathBuf::from(".")),
  };

  fs::create_dir_all(&requested).map_err(|e| CompileError::OutputRoot {
    path: requested.clone(),
    source: e,
  })?;
  dunce::canonicalize(&requested).map_err(|e| CompileError::OutputRoot {
    path: requested,
    source: e,
  })
}

fn package_root(dir: &Path, archive: Option<&Path>) -> Result<PathBuf, CompileError> {
  let wrap = |e| CompileError::Package {
    dir: dir.to_path_buf(),
    source: e,
  };
  let archive = match archive {
    Some(path) => path.to_path_buf(),
    None => package::default_archive_path(dir).map_err(wrap)?,
  };
  package::package_dir(dir, &archive).map_err(wrap)?;
  Ok(archive)
}
