//! Initialize a datapack skeleton at the current working location.
//!
//! This is the logic behind the `init` directive. It lays out:
//! - `pack.mcmeta` with the pack format and description
//! - `data/minecraft/tags/functions/{tick,load}.json` pointing at
//!   `<namespace>:tick` and `<namespace>:load`
//! - `data/<namespace>/functions/`
//!
//! and then re-points the context: root at the datapack, home at
//! `data/<namespace>`, working location at its `functions` directory.
//! Re-running it rewrites the descriptor and tags but leaves existing
//! namespace content alone.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::{DATA_DIR, DEFAULT_DESCRIPTION, DEFAULT_PACK_FORMAT, FUNCTION_TAGS_DIR, FUNCTIONS_DIR, PACK_META_FILE};
use crate::context::Context;
use crate::fsops;

pub use templates::{FunctionTag, PackMeta, PackSection, to_json};

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("invalid namespace '{0}': use lowercase letters, digits, '_', '-' or '.'")]
  InvalidNamespace(String),

  #[error("invalid pack format '{0}': expected a non-negative integer")]
  InvalidPackFormat(String),

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("failed to serialize {file}: {source}")]
  Serialize {
    file: &'static str,
    source: serde_json::Error,
  },
}

/// Options for initializing a datapack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
  pub namespace: String,
  pub pack_format: u32,
  pub description: String,
}

impl InitOptions {
  /// Validate raw directive arguments, filling in defaults.
  pub fn from_args(namespace: &str, pack_format: Option<&str>, description: Option<&str>) -> Result<Self, InitError> {
    if !is_valid_namespace(namespace) {
      return Err(InitError::InvalidNamespace(namespace.to_string()));
    }

    let pack_format = match pack_format {
      Some(raw) => raw
        .parse::<u32>()
        .map_err(|_| InitError::InvalidPackFormat(raw.to_string()))?,
      None => DEFAULT_PACK_FORMAT,
    };

    Ok(Self {
      namespace: namespace.to_string(),
      pack_format,
      description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
    })
  }
}

/// Result of a successful initialization.
#[derive(Debug)]
pub struct InitResult {
  /// The datapack root (the working location `init` ran in)
  pub root: PathBuf,
  /// Path to the written pack.mcmeta
  pub pack_meta: PathBuf,
  /// Path to the written tick.json tag
  pub tick_tag: PathBuf,
  /// Path to the written load.json tag
  pub load_tag: PathBuf,
  /// `data/<namespace>`, the new home
  pub home: PathBuf,
  /// `data/<namespace>/functions`, the new working location
  pub functions_dir: PathBuf,
}

/// Namespaces are limited to `[a-z0-9_.-]+`.
pub fn is_valid_namespace(namespace: &str) -> bool {
  !namespace.is_empty()
    && namespace
      .chars()
      .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.'))
}

/// Build the skeleton in the context's working location and re-point the
/// context at it.
///
/// The context is only updated once every file has been written.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file cannot be
/// written. Files written before the failure stay on disk.
pub fn init(ctx: &mut Context, options: &InitOptions) -> Result<InitResult, InitError> {
  let root = ctx.cwd().to_path_buf();
  let tags_dir = FUNCTION_TAGS_DIR.iter().fold(root.clone(), |dir, part| dir.join(part));
  let home = root.join(DATA_DIR).join(&options.namespace);
  let functions_dir = home.join(FUNCTIONS_DIR);

  for dir in [&tags_dir, &functions_dir] {
    fsops::create_dir(dir).map_err(|e| InitError::CreateDir {
      path: dir.clone(),
      source: e,
    })?;
  }

  let meta = PackMeta {
    pack: PackSection {
      pack_format: options.pack_format,
      description: options.description.clone(),
    },
  };
  let pack_meta = root.join(PACK_META_FILE);
  write_json(&pack_meta, PACK_META_FILE, &meta)?;

  let tick_tag = tags_dir.join("tick.json");
  write_json(&tick_tag, "tick.json", &FunctionTag::single(&options.namespace, "tick"))?;

  let load_tag = tags_dir.join("load.json");
  write_json(&load_tag, "load.json", &FunctionTag::single(&options.namespace, "load"))?;

  ctx.set_root(root.clone());
  ctx.set_namespace(options.namespace.clone());
  ctx.set_home(home.clone());
  ctx.set_cwd(functions_dir.clone());

  debug!(namespace = %options.namespace, root = %root.display(), "datapack initialized");

  Ok(InitResult {
    root,
    pack_meta,
    tick_tag,
    load_tag,
    home,
    functions_dir,
  })
}

fn write_json<T: serde::Serialize>(path: &Path, file: &'static str, value: &T) -> Result<(), InitError> {
  let bytes = to_json(value).map_err(|e| InitError::Serialize { file, source: e })?;
  fs::write(path, bytes).map_err(|e| InitError::WriteFile {
    path: path.to_path_buf(),
    source: e,
  })
}
