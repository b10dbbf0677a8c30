//! Package a finished datapack directory into a zip archive.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::consts::ARCHIVE_EXTENSION;

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  #[error("cannot derive an archive name for {}", .0.display())]
  NoArchiveName(PathBuf),

  #[error("failed to create archive {}: {source}", path.display())]
  CreateArchive { path: PathBuf, source: io::Error },

  #[error("failed to walk {}: {source}", path.display())]
  Walk { path: PathBuf, source: walkdir::Error },

  #[error("failed to read {}: {source}", path.display())]
  ReadEntry { path: PathBuf, source: io::Error },

  #[error("failed to write archive entry {name}: {source}")]
  Zip { name: String, source: zip::result::ZipError },
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PackageResult {
  pub archive: PathBuf,
  pub files: usize,
  pub dirs: usize,
}

/// `<parent>/<dirname>.zip`, next to the directory being packaged.
pub fn default_archive_path(dir: &Path) -> Result<PathBuf, PackageError> {
  let name = dir
    .file_name()
    .ok_or_else(|| PackageError::NoArchiveName(dir.to_path_buf()))?;
  let parent = dir
    .parent()
    .ok_or_else(|| PackageError::NoArchiveName(dir.to_path_buf()))?;

  let mut file_name = name.to_os_string();
  file_name.push(".");
  file_name.push(ARCHIVE_EXTENSION);
  Ok(parent.join(file_name))
}

/// Write every file and directory below `dir` into a new zip at `archive`,
/// replacing anything already there.
///
/// Entry names are relative to `dir` and use `/`. Entries are added in
/// sorted order so the same tree always produces the same archive. If
/// `archive` itself lies inside `dir` it is left out.
pub fn package_dir(dir: &Path, archive: &Path) -> Result<PackageResult, PackageError> {
  if !dir.is_dir() {
    return Err(PackageError::NotADirectory(dir.to_path_buf()));
  }

  if let Some(parent) = archive.parent() {
    fs::create_dir_all(parent).map_err(|e| PackageError::CreateArchive {
      path: archive.to_path_buf(),
      source: e,
    })?;
  }
  let file = File::create(archive).map_err(|e| PackageError::CreateArchive {
    path: archive.to_path_buf(),
    source: e,
  })?;
  // Compare against the real location so an archive inside `dir` is skipped.
  let archive_real = dunce::canonicalize(archive).unwrap_or_else(|_| archive.to_path_buf());

  let mut zip = ZipWriter::new(BufWriter::new(file));
  let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
  let mut result = PackageResult {
    archive: archive.to_path_buf(),
    files: 0,
    dirs: 0,
  };

  for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|e| PackageError::Walk {
      path: dir.to_path_buf(),
      source: e,
    })?;
    let path = entry.path();
    if dunce::canonicalize(path).is_ok_and(|p| p == archive_real) {
      continue;
    }

    let name = entry_name(dir, path);
    if entry.file_type().is_dir() {
      zip
        .add_directory(name.clone(), options)
        .map_err(|e| PackageError::Zip { name, source: e })?;
      result.dirs += 1;
    } else {
      zip
        .start_file(name.clone(), options)
        .map_err(|e| PackageError::Zip {
          name: name.clone(),
          source: e,
        })?;
      let mut reader = BufReader::new(File::open(path).map_err(|e| PackageError::ReadEntry {
        path: path.to_path_buf(),
        source: e,
      })?);
      io::copy(&mut reader, &mut zip).map_err(|e| PackageError::ReadEntry {
        path: path.to_path_buf(),
        source: e,
      })?;
      debug!(entry = %name, "archived");
      result.files += 1;
    }
  }

  zip.finish().map_err(|e| PackageError::Zip {
    name: archive.display().to_string(),
    source: e,
  })?;

  info!(archive = %archive.display(), files = result.files, "datapack packaged");
  Ok(result)
}

fn entry_name(dir: &Path, path: &Path) -> String {
  let relative = path.strip_prefix(dir).unwrap_or(path);
  relative
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}
