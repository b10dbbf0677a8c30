//! File models for the datapack skeleton.

use serde::{Deserialize, Serialize};

/// `pack.mcmeta`: `{ "pack": { "pack_format": N, "description": "..." } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackMeta {
  pub pack: PackSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSection {
  pub pack_format: u32,
  pub description: String,
}

/// A function tag such as `minecraft:tick`, listing the functions it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionTag {
  pub values: Vec<String>,
}

impl FunctionTag {
  pub fn single(namespace: &str, function: &str) -> Self {
    Self {
      values: vec![format!("{namespace}:{function}")],
    }
  }
}

/// Pretty JSON with four-space indentation and a trailing newline.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
  let mut buf = Vec::new();
  let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
  let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
  value.serialize(&mut serializer)?;
  buf.push(b'\n');
  Ok(buf)
}
