//! Pack command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, zip_entries, zip_entry};

#[test]
fn pack_existing_directory() {
  let env = TestEnv::empty();
  env.write_file("mypack/pack.mcmeta", "{}\n");
  env.write_file("mypack/data/ns/functions/main.mcfunction", "say hi\n");

  env
    .mcfc_cmd()
    .args(["pack", "mypack"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Packaged"))
    .stdout(predicate::str::contains("Files: 2"));

  let archive = env.dir().join("mypack.zip");
  assert_eq!(
    zip_entries(&archive),
    vec![
      "data/",
      "data/ns/",
      "data/ns/functions/",
      "data/ns/functions/main.mcfunction",
      "pack.mcmeta",
    ]
  );
  assert_eq!(zip_entry(&archive, "data/ns/functions/main.mcfunction"), "say hi\n");
}

#[test]
fn pack_to_explicit_output() {
  let env = TestEnv::empty();
  env.write_file("mypack/pack.mcmeta", "{}\n");

  env
    .mcfc_cmd()
    .args(["pack", "mypack", "-o", "release/out.zip"])
    .assert()
    .success();

  assert_eq!(zip_entries(&env.dir().join("release/out.zip")), vec!["pack.mcmeta"]);
}

#[test]
fn pack_json_output() {
  let env = TestEnv::empty();
  env.write_file("mypack/pack.mcmeta", "{}\n");

  let output = env.mcfc_cmd().args(["--format", "json", "pack", "mypack"]).output().unwrap();

  assert!(output.status.success());
  let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(result["files"], 1);
  assert_eq!(result["dirs"], 0);
}
