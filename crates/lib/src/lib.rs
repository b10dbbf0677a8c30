//! mcfc-lib: the datapack function compiler core.
//!
//! A source file is read line by line. Directive lines (`#> name args...`)
//! navigate and mutate an output tree, everything else is appended to the
//! currently open output file:
//! - `resolve`: turns directive arguments into absolute, boundary-checked paths
//! - `fsops`: best-effort directory creation and deletion
//! - `open_files`: the stack of output files receiving content
//! - `interpret`: per-line dispatch against a `Context`
//! - `init`: the datapack skeleton (`pack.mcmeta`, function tags)
//! - `package`: zips a finished datapack
//! - `compile`: the host entry point tying it all together

pub mod compile;
pub mod consts;
pub mod context;
pub mod directive;
pub mod fsops;
pub mod init;
pub mod interpret;
pub mod open_files;
pub mod package;
pub mod resolve;

#[cfg(test)]
mod util;

pub use compile::{CompileError, CompileOptions, CompileResult, compile, compile_all};
pub use context::{Context, Diagnostic, DiagnosticKind};
pub use resolve::{InvalidPath, Resolution};
