//! Implementation of the `mcfc pack` command.

use std::path::Path;

use anyhow::{Context, Result};

use mcfc_lib::package::{default_archive_path, package_dir};

use crate::output::{OutputFormat, format_mapping, print_json, print_stat, print_success};

/// Zip an existing datapack directory.
///
/// The archive defaults to `<dir>.zip` next to the directory and replaces any
/// file already there.
pub fn cmd_pack(dir: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
  let archive = match output {
    Some(path) => path.to_path_buf(),
    None => default_archive_path(dir)?,
  };

  let result = package_dir(dir, &archive).with_context(|| format!("Failed to package {}", dir.display()))?;

  if format.is_json() {
    return print_json(&result);
  }

  print_success(&format!("Packaged {}", format_mapping(dir, &result.archive)));
  print_stat("Files", &result.files.to_string());
  print_stat("Directories", &result.dirs.to_string());
  Ok(())
}
