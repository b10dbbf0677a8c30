//! Multi-source runs and packaging.

use std::fs::File;

use mcfc_lib::{CompileError, CompileOptions, compile_all};
use zip::ZipArchive;

use super::common::Workspace;

#[test]
fn sources_run_in_order_with_separate_state() {
  let ws = Workspace::new();
  let first = ws.write("a.mcf", "#> init first\n#> open main.mcfunction\nsay a\n");
  let second = ws.write("b.mcf", "#> home\nsay b\n");

  let outcome = compile_all(&[CompileOptions::new(first), CompileOptions::new(second)]);

  assert!(outcome.error.is_none());
  assert_eq!(outcome.files_opened(), 2);
  assert_eq!(ws.read("data/first/functions/main.mcfunction"), "say a\n");
  assert_eq!(outcome.compiled[1].diagnostics.len(), 1);
}

#[test]
fn unreadable_source_aborts_remaining_sources() {
  let ws = Workspace::new();
  let first = ws.write("a.mcf", "#> mkdir from_a\n");
  let last = ws.write("c.mcf", "#> mkdir from_c\n");

  let outcome = compile_all(&[
    CompileOptions::new(first),
    CompileOptions::new(ws.path("b.mcf")),
    CompileOptions::new(last),
  ]);

  assert_eq!(outcome.files_opened(), 1);
  assert!(matches!(outcome.error, Some(CompileError::ReadSource { .. })));
  assert!(ws.path("from_a").is_dir());
  assert!(!ws.path("from_c").exists());
}

#[test]
fn archive_option_packages_the_datapack() {
  let ws = Workspace::new();
  let source = ws.write("pack.mcf", "#> init ns\n#> open tick.mcfunction\nsay tick\n#> close\n");
  let archive = ws.path("dist/ns.zip");

  let outcome = compile_all(&[CompileOptions {
    output_root: Some(ws.path("build")),
    archive: Some(archive.clone()),
    ..CompileOptions::new(source)
  }]);

  assert!(outcome.error.is_none());
  assert_eq!(outcome.compiled[0].archive, Some(archive.clone()));
  let zip = ZipArchive::new(File::open(&archive).unwrap()).unwrap();
  let mut names: Vec<&str> = zip.file_names().collect();
  names.sort();
  assert!(names.contains(&"pack.mcmeta"));
  assert!(names.contains(&"data/ns/functions/tick.mcfunction"));
  assert!(names.contains(&"data/minecraft/tags/functions/load.json"));
}
