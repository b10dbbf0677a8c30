//! Directive path resolution.
//!
//! Every path argument in a source file goes through [`Anchors::resolve`],
//! which applies the shorthand markers and the datapack boundary check:
//!
//! - `~/x` - relative to the home reference (the active namespace directory)
//! - `/x` - relative to the root reference (the datapack top level)
//! - `x` - relative to the current working location
//!
//! Backslashes are accepted as separators, so `\x` is a root reference too.
//! Resolution is lexical: `..` segments are folded without touching the
//! filesystem, and existence is probed only once the final path is known.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Characters that are never accepted in a path argument.
pub const RESERVED_CHARS: [char; 6] = ['*', '"', '<', '>', '|', '?'];

const HOME_MARKER: char = '~';
const SEPARATOR: char = '/';

/// Why a path argument was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPath {
  #[error("path is empty")]
  Empty,

  #[error("reserved character '{0}' in path")]
  ReservedChar(char),

  #[error("misplaced drive qualifier ':' in path")]
  Qualifier,

  #[error("home is not set")]
  HomeUnset,

  #[error("home directory no longer exists: {}", .0.display())]
  HomeMissing(PathBuf),

  #[error("root is not set")]
  RootUnset,

  #[error("root directory no longer exists: {}", .0.display())]
  RootMissing(PathBuf),

  #[error("{} is outside the datapack root", .0.display())]
  OutsideRoot(PathBuf),
}

/// Outcome of resolving a path argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// Malformed, anchored on an unset reference, or outside the root.
  Invalid(InvalidPath),
  /// Well-formed, but nothing of the requested kind exists there yet.
  Absent(PathBuf),
  /// Well-formed and present.
  Present(PathBuf),
}

impl Resolution {
  /// The resolved path, unless the argument was invalid.
  pub fn path(&self) -> Option<&Path> {
    match self {
      Resolution::Invalid(_) => None,
      Resolution::Absent(path) | Resolution::Present(path) => Some(path),
    }
  }

  pub fn is_present(&self) -> bool {
    matches!(self, Resolution::Present(_))
  }
}

/// How a path argument should be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveFlags {
  /// Probe for a file instead of a directory, and apply the boundary check
  /// to the file's parent directory.
  pub as_file: bool,
  /// Skip the boundary check.
  pub allow_outside_root: bool,
}

impl ResolveFlags {
  pub const DIR: ResolveFlags = ResolveFlags {
    as_file: false,
    allow_outside_root: false,
  };

  pub const FILE: ResolveFlags = ResolveFlags {
    as_file: true,
    allow_outside_root: false,
  };

  pub fn outside_root(self) -> Self {
    Self {
      allow_outside_root: true,
      ..self
    }
  }
}

/// The reference points a path argument can be anchored on.
#[derive(Debug, Clone, Copy)]
pub struct Anchors<'a> {
  pub cwd: &'a Path,
  pub root: Option<&'a Path>,
  pub home: Option<&'a Path>,
}

impl Anchors<'_> {
  /// Resolve a raw directive argument to an absolute path.
  pub fn resolve(&self, raw: &str, flags: ResolveFlags) -> Resolution {
    match self.locate(raw, flags) {
      Ok(path) => probe(path, flags.as_file),
      Err(reason) => Resolution::Invalid(reason),
    }
  }

  fn locate(&self, raw: &str, flags: ResolveFlags) -> Result<PathBuf, InvalidPath> {
    let arg = raw.trim().replace('\\', "/");
    check_characters(&arg)?;

    let joined = if let Some(rest) = arg.strip_prefix(HOME_MARKER) {
      let home = self.home.ok_or(InvalidPath::HomeUnset)?;
      if !home.is_dir() {
        return Err(InvalidPath::HomeMissing(home.to_path_buf()));
      }
      home.join(rest.trim_start_matches(SEPARATOR))
    } else if let Some(rest) = arg.strip_prefix(SEPARATOR) {
      let root = self.root.ok_or(InvalidPath::RootUnset)?;
      if !root.is_dir() {
        return Err(InvalidPath::RootMissing(root.to_path_buf()));
      }
      root.join(rest.trim_start_matches(SEPARATOR))
    } else {
      self.cwd.join(&arg)
    };

    let path = normalize(&joined);
    if !flags.allow_outside_root {
      self.check_boundary(&path, flags.as_file)?;
    }
    Ok(path)
  }

  fn check_boundary(&self, path: &Path, as_file: bool) -> Result<(), InvalidPath> {
    let root = normalize(self.root.ok_or(InvalidPath::RootUnset)?);
    let dir = if as_file { path.parent().unwrap_or(path) } else { path };
    if dir.starts_with(&root) {
      Ok(())
    } else {
      Err(InvalidPath::OutsideRoot(path.to_path_buf()))
    }
  }
}

/// Reject empty arguments, reserved characters and stray drive qualifiers.
///
/// A colon is only accepted as a drive prefix followed by a separator
/// (`C:/...`).
fn check_characters(arg: &str) -> Result<(), InvalidPath> {
  if arg.is_empty() {
    return Err(InvalidPath::Empty);
  }
  if let Some(c) = arg.chars().find(|c| RESERVED_CHARS.contains(c)) {
    return Err(InvalidPath::ReservedChar(c));
  }

  let bytes = arg.as_bytes();
  let has_drive = bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/';
  let colons = arg.matches(':').count();
  if colons > usize::from(has_drive) {
    return Err(InvalidPath::Qualifier);
  }
  Ok(())
}

/// Fold `.` and `..` segments without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::ParentDir => {
        normalized.pop();
      }
      Component::CurDir => {}
      _ => normalized.push(component),
    }
  }
  normalized
}

fn probe(path: PathBuf, as_file: bool) -> Resolution {
  let exists = if as_file { path.is_file() } else { path.is_dir() };
  if exists {
    Resolution::Present(path)
  } else {
    Resolution::Absent(path)
  }
}
