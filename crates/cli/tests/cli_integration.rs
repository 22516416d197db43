//! CLI integration tests for the `sectiongen` binary.
//!
//! Every generating test works on a temp copy of the fixture project under
//! `fixtures/about-project`, never on the fixture itself. The API key
//! variable is always removed so no test reaches the network.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TYPES: &str = "src/types/owner-site/components/about.ts";
const DISPATCHER: &str = "src/components/site-owners/about/about-component.tsx";
const PICKER: &str = "src/components/site-owners/about/about-styles-dialog.tsx";
const FACTORY: &str = "src/components/site-owners/builder/builder-layout.tsx";
const COMPONENTS_DIR: &str = "src/components/site-owners/about";

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `sectiongen` binary with no API key.
fn sectiongen() -> Command {
    let mut cmd = cargo_bin_cmd!("sectiongen");
    cmd.current_dir(workspace_root());
    cmd.env_remove("GEMINI_API_KEY");
    cmd
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir(&workspace_root().join("fixtures/about-project"), tmp.path());
    tmp
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn registry_snapshot(root: &Path) -> Vec<String> {
    [TYPES, DISPATCHER, PICKER, FACTORY]
        .iter()
        .map(|rel| read(root, rel))
        .collect()
}

fn component_files(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root.join(COMPONENTS_DIR))
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

const STATS_SCHEMA: &str = r#"{
  "componentName": "about-stats-focus",
  "displayName": "Stats Focus",
  "description": "Numbers first",
  "fields": [
    {"name": "title", "type": "string", "required": true, "default": "About Us"},
    {"name": "stats", "type": "AboutUsStat[]", "required": false}
  ],
  "layoutType": "card-grid",
  "hasImage": false,
  "hasStats": true
}"#;

fn write_schema(dir: &Path) -> PathBuf {
    let path = dir.join("stats.json");
    fs::write(&path, STATS_SCHEMA).unwrap();
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    sectiongen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("page-section variants"));
}

#[test]
fn version_exits_0() {
    sectiongen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sectiongen"));
}

#[test]
fn generate_without_prompt_or_schema_is_a_usage_error() {
    sectiongen().arg("generate").assert().failure();
}

// ──────────────────────────────────────────────
// 2. Generate
// ──────────────────────────────────────────────

#[test]
fn offline_generate_uses_fallback_and_registers_everywhere() {
    let project = project();
    let root = project.path();
    let before = component_files(root);

    let assert = sectiongen()
        .args(["generate", "minimal about section with just text", "--offline"])
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("about-custom-"))
        .stdout(predicate::str::contains("(Custom About Us, fallback)"))
        .stdout(predicate::str::contains("Next steps:"))
        .stdout(predicate::str::contains(
            "Add preview image: public/images/site-owners/about/about-custom-",
        ));
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("warning: fallback schema used"));

    let after = component_files(root);
    assert_eq!(after.len(), before.len() + 1);
    let new_file = after
        .iter()
        .find(|f| !before.contains(f))
        .expect("new component file");
    let slug = new_file.trim_end_matches(".tsx");
    assert!(slug.starts_with("about-custom-"));

    let case = format!("case \"{}\":", slug);
    assert_eq!(read(root, DISPATCHER).matches(&case).count(), 1);
    assert_eq!(read(root, FACTORY).matches(&case).count(), 1);
    assert!(read(root, PICKER).contains(&format!("id: \"{}\" as const", slug)));
    assert!(read(root, TYPES).contains(&format!("template: \"{}\";", slug)));
}

#[test]
fn missing_api_key_falls_back_without_network() {
    let project = project();
    let output = sectiongen()
        .args(["--output", "json", "generate", "team focused section"])
        .arg("--root")
        .arg(project.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["origin"], "fallback");
    assert!(json["fallback_reason"]
        .as_str()
        .unwrap()
        .contains("GEMINI_API_KEY"));
}

#[test]
fn schema_file_is_applied_with_json_report() {
    let project = project();
    let root = project.path();
    let schema = write_schema(root);

    let output = sectiongen()
        .args(["--output", "json", "generate", "--schema"])
        .arg(&schema)
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["origin"], "supplied");
    assert_eq!(json["component_name"], "about-stats-focus");
    assert_eq!(json["layout"], "card-grid");
    assert_eq!(json["files"].as_array().unwrap().len(), 5);
    assert_eq!(json["steps"].as_array().unwrap().len(), 7);
    assert!(json["error"].is_null());

    let module = read(root, &format!("{}/about-stats-focus.tsx", COMPONENTS_DIR));
    assert!(!module.contains("EditableImage"));
    assert!(read(root, FACTORY).contains("defaultAboutStatsFocusData"));
}

#[test]
fn dry_run_leaves_project_untouched() {
    let project = project();
    let root = project.path();
    let schema = write_schema(root);
    let before = registry_snapshot(root);
    let files_before = component_files(root);

    sectiongen()
        .args(["generate", "--dry-run", "--schema"])
        .arg(&schema)
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry run] about-stats-focus"))
        .stdout(predicate::str::contains("Would write 5 file(s)"));

    assert_eq!(registry_snapshot(root), before);
    assert_eq!(component_files(root), files_before);
}

#[test]
fn repeated_slug_is_rejected() {
    let project = project();
    let root = project.path();
    let schema = write_schema(root);

    sectiongen()
        .args(["generate", "--schema"])
        .arg(&schema)
        .arg("--root")
        .arg(root)
        .assert()
        .success();
    let after_first = registry_snapshot(root);

    sectiongen()
        .args(["generate", "--schema"])
        .arg(&schema)
        .arg("--root")
        .arg(root)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "component name 'about-stats-focus' is already registered",
        ));
    assert_eq!(registry_snapshot(root), after_first);
}

#[test]
fn project_without_registries_fails_at_type_registry() {
    let empty = TempDir::new().unwrap();
    sectiongen()
        .args(["generate", "anything", "--offline"])
        .arg("--root")
        .arg(empty.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("[!!] update type registry"))
        .stderr(predicate::str::contains("type registry not found"));
}

#[test]
fn malformed_schema_file_exits_1() {
    let project = project();
    let bad = project.path().join("bad.json");
    fs::write(&bad, "{\"componentName\": \"about-x\"}").unwrap();
    sectiongen()
        .args(["generate", "--schema"])
        .arg(&bad)
        .arg("--root")
        .arg(project.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("malformed schema JSON"));
}

#[test]
fn config_file_in_root_sets_fallback_prefix() {
    let project = project();
    let root = project.path();
    fs::write(
        root.join("sectiongen.toml"),
        "[section]\nslug_prefix = \"about-team\"\n",
    )
    .unwrap();

    sectiongen()
        .args(["generate", "team section", "--offline"])
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("about-team-custom-"));
}

#[test]
fn missing_explicit_config_exits_1() {
    let project = project();
    sectiongen()
        .args(["generate", "x", "--offline", "--config", "no-such.toml"])
        .arg("--root")
        .arg(project.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read config"));
}

// ──────────────────────────────────────────────
// 3. Interactive
// ──────────────────────────────────────────────

#[test]
fn interactive_rejects_empty_input_and_runs_once() {
    let project = project();
    let root = project.path();
    let before = component_files(root).len();

    sectiongen()
        .args(["interactive", "--offline"])
        .arg("--root")
        .arg(root)
        .write_stdin("\nminimal text section\nn\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("please enter a description"))
        .stdout(predicate::str::contains("Generate another? (y/n)"))
        .stdout(predicate::str::contains("Generated 1 section(s)."));

    assert_eq!(component_files(root).len(), before + 1);
}

#[test]
fn interactive_quit_generates_nothing() {
    let project = project();
    let root = project.path();
    let before = registry_snapshot(root);

    sectiongen()
        .args(["interactive", "--offline"])
        .arg("--root")
        .arg(root)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 0 section(s)."));

    assert_eq!(registry_snapshot(root), before);
}

#[test]
fn interactive_can_generate_twice() {
    let project = project();
    let root = project.path();
    let before = component_files(root).len();

    sectiongen()
        .args(["interactive", "--offline"])
        .arg("--root")
        .arg(root)
        .write_stdin("first section\ny\nsecond section\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 section(s)."));

    assert_eq!(component_files(root).len(), before + 2);
}

#[test]
fn interactive_failure_asks_for_a_new_description() {
    let empty = TempDir::new().unwrap();

    sectiongen()
        .args(["interactive", "--offline"])
        .arg("--root")
        .arg(empty.path())
        .write_stdin("first section\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("type registry not found"))
        .stdout(predicate::str::contains("Generation failed, try another description."))
        .stdout(predicate::str::contains("Generate another?").not())
        .stdout(predicate::str::contains("Generated 0 section(s)."));
}

// ──────────────────────────────────────────────
// 4. Check
// ──────────────────────────────────────────────

#[test]
fn check_reports_balanced_fixture() {
    sectiongen()
        .args(["check", &format!("fixtures/about-project/{}", DISPATCHER)])
        .assert()
        .success()
        .stdout(predicate::str::contains("balanced"));
}

#[test]
fn check_warns_but_exits_0_on_unbalanced_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.tsx");
    fs::write(&file, "export function X() {\n  return (<div />;\n").unwrap();

    sectiongen()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "warning: unbalanced braces: 1 opening vs 0 closing",
        ))
        .stdout(predicate::str::contains(
            "warning: unbalanced parentheses: 2 opening vs 1 closing",
        ));
}

#[test]
fn check_json_lists_each_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.ts");
    let bad = dir.path().join("bad.ts");
    fs::write(&good, "const a = { b: f(1) };\n").unwrap();
    fs::write(&bad, "const a = { b: f(1) ;\n").unwrap();

    let output = sectiongen()
        .args(["--output", "json", "check"])
        .arg(&good)
        .arg(&bad)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["balanced"], true);
    assert_eq!(entries[1]["balanced"], false);
    assert_eq!(entries[1]["braces"], serde_json::json!([1, 0]));
}

#[test]
fn check_missing_file_exits_1() {
    sectiongen()
        .args(["check", "does/not/exist.tsx"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
}
