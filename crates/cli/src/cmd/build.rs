//! Implementation of the `mcfc build` command.
//!
//! Compiles each source file in order, each against a fresh context, and
//! optionally zips the resulting datapack.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use mcfc_lib::compile::{CompileOptions, CompileResult, compile_all};
use mcfc_lib::DiagnosticKind;

use crate::output::{
  OutputFormat, format_duration, format_mapping, print_info, print_json, print_stat, print_success, print_warning,
};

/// Arguments of `mcfc build`, already parsed.
pub struct BuildArgs {
  pub files: Vec<PathBuf>,
  pub output: Option<PathBuf>,
  pub zip: bool,
  pub archive: Option<PathBuf>,
  pub verbose: bool,
  pub format: OutputFormat,
}

#[derive(Serialize)]
struct BuildReport<'a> {
  files_opened: usize,
  results: &'a [CompileResult],
  error: Option<String>,
}

/// Execute the build command.
///
/// Sources are processed one at a time. The first source that cannot be read
/// aborts the run; output already produced by earlier sources stays.
///
/// # Errors
///
/// Returns an error on a fatal compile failure, or when `--archive` is given
/// together with more than one source.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
  if args.archive.is_some() && args.files.len() > 1 {
    bail!("--archive can only be used with a single source file");
  }

  let sources: Vec<CompileOptions> = args
    .files
    .iter()
    .map(|file| CompileOptions {
      output_root: args.output.clone(),
      package: args.zip,
      archive: args.archive.clone(),
      ..CompileOptions::new(file)
    })
    .collect();

  debug!(sources = sources.len(), zip = args.zip, "starting build");
  let started = Instant::now();
  let outcome = compile_all(&sources);
  let elapsed = started.elapsed();

  if args.format.is_json() {
    print_json(&BuildReport {
      files_opened: outcome.files_opened(),
      results: &outcome.compiled,
      error: outcome.error.as_ref().map(|e| e.to_string()),
    })?;
  } else {
    for result in &outcome.compiled {
      print_result(result, args.verbose);
    }
    if outcome.files_opened() > 0 {
      println!();
      print_success(&format!(
        "Compiled {} file(s) in {}",
        outcome.files_opened(),
        format_duration(elapsed)
      ));
    }
  }

  match outcome.error {
    Some(e) => Err(e).context("compilation aborted"),
    None => Ok(()),
  }
}

fn print_result(result: &CompileResult, verbose: bool) {
  let datapack = result.root.as_deref().unwrap_or(&result.output_root);
  print_info(&format_mapping(&result.source, datapack));
  print_stat("Lines", &result.lines.to_string());

  if let Some(archive) = &result.archive {
    print_stat("Archive", &archive.display().to_string());
  }
  if !result.unclosed.is_empty() {
    print_stat("Left open", &result.unclosed.len().to_string());
  }

  // Each diagnostic already went through tracing; only summarize what the
  // current filter hides.
  let skipped = result.diagnostics_of(DiagnosticKind::Skipped).count();
  if skipped > 0 && !verbose {
    print_warning(&format!(
      "{} directive(s) skipped in {}, rerun with --verbose for details",
      skipped,
      result.source.display()
    ));
  }
}
