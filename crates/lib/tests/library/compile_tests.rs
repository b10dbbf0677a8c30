//! Whole-source compilation scenarios.

use mcfc_lib::DiagnosticKind;

use super::common::{Workspace, json};

#[test]
fn init_open_write_close() {
  let ws = Workspace::new();

  let result = ws.compile_lines(&[
    "#> init ns 4 \"desc\"",
    "#> open out.mcfunction",
    "say one",
    "say two",
    "#> close",
  ]);

  assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
  assert!(result.unclosed.is_empty());

  let meta = json(&ws.path("pack.mcmeta"));
  assert_eq!(meta["pack"]["pack_format"], 4);
  assert_eq!(meta["pack"]["description"], "desc");
  assert_eq!(
    json(&ws.path("data/minecraft/tags/functions/tick.json"))["values"],
    serde_json::json!(["ns:tick"])
  );
  assert_eq!(
    json(&ws.path("data/minecraft/tags/functions/load.json"))["values"],
    serde_json::json!(["ns:load"])
  );
  assert_eq!(ws.read("data/ns/functions/out.mcfunction"), "say one\nsay two\n");
}

#[test]
fn strip_marker_lines_are_written_without_marker() {
  let ws = Workspace::new();

  ws.compile_lines(&["#> open data.json", "{", "##  \"foo\": 1", "}"]);

  assert_eq!(ws.read("data.json"), "{\n\"foo\": 1\n}\n");
}

#[test]
fn unknown_directive_is_written_as_content() {
  let ws = Workspace::new();

  let result = ws.compile_lines(&["#> open out.txt", "#> frobnicate now"]);

  assert!(result.diagnostics.is_empty());
  assert_eq!(ws.read("out.txt"), "#> frobnicate now\n");
}

#[test]
fn nested_files_receive_only_their_own_lines() {
  let ws = Workspace::new();

  ws.compile_lines(&[
    "#> open outer.txt",
    "outer 1",
    "#> open inner.txt",
    "inner",
    "#> close",
    "outer 2",
    "#> close",
    "dropped",
  ]);

  assert_eq!(ws.read("outer.txt"), "outer 1\nouter 2\n");
  assert_eq!(ws.read("inner.txt"), "inner\n");
}

#[test]
fn home_and_root_relative_paths() {
  let ws = Workspace::new();

  let result = ws.compile_lines(&[
    "#> init ns",
    "#> open ~/functions/a.mcfunction",
    "a",
    "#> close",
    "#> open \\notes.txt",
    "note",
    "#> close",
    "#> open /data/ns/functions/b.mcfunction",
    "b",
  ]);

  assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
  assert_eq!(ws.read("data/ns/functions/a.mcfunction"), "a\n");
  assert_eq!(ws.read("notes.txt"), "note\n");
  assert_eq!(ws.read("data/ns/functions/b.mcfunction"), "b\n");
}

#[test]
fn recoverable_failures_are_collected_with_lines() {
  let ws = Workspace::new();

  let result = ws.compile_lines(&[
    "#> cd nonexistent",
    "",
    "#> close",
    "#> log halfway",
    "#> rmdir missing",
    "#> init",
    "#> log",
  ]);

  let skipped: Vec<usize> = result.diagnostics_of(DiagnosticKind::Skipped).map(|d| d.line).collect();
  assert_eq!(skipped, vec![1, 3, 5, 6, 7]);
  let logs: Vec<&str> = result
    .diagnostics_of(DiagnosticKind::Log)
    .map(|d| d.message.as_str())
    .collect();
  assert_eq!(logs, vec!["halfway"]);
  assert_eq!(result.root, Some(ws.dir()));
}

#[test]
fn rmdir_and_clear() {
  let ws = Workspace::new();
  ws.write("gone/a.txt", "a");
  ws.write("gone/sub/b.txt", "b");
  ws.write("emptied/c.txt", "c");
  ws.write("emptied/sub/d.txt", "d");

  let result = ws.compile_lines(&["#> rmdir gone", "#> clear emptied"]);

  assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
  assert!(!ws.path("gone").exists());
  assert!(ws.path("emptied").is_dir());
  assert_eq!(std::fs::read_dir(ws.path("emptied")).unwrap().count(), 0);
}

#[test]
fn deleted_home_is_reported_not_followed() {
  let ws = Workspace::new();

  let result = ws.compile_lines(&["#> init ns", "#> root", "#> rmdir data/ns", "#> home"]);

  assert_eq!(result.diagnostics.len(), 1);
  assert!(result.diagnostics[0].message.contains("home directory no longer exists"));
  assert_eq!(result.diagnostics[0].line, 4);
}

#[test]
fn paths_cannot_leave_the_output_root() {
  let ws = Workspace::new();
  let out = ws.path("out");

  let source = ws.write("pack.mcf", "#> open ../escape.txt\nescaped\n#> mkdir ../../far");
  let result = mcfc_lib::compile(&mcfc_lib::CompileOptions {
    output_root: Some(out.clone()),
    ..mcfc_lib::CompileOptions::new(source)
  })
  .unwrap();

  assert_eq!(result.diagnostics_of(DiagnosticKind::Skipped).count(), 2);
  assert!(!ws.path("escape.txt").exists());
  assert!(out.is_dir());
}
