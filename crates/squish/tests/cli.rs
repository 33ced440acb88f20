//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("SQUISH_LOG_DIR", std::env::temp_dir().join("squish-test-logs"));
    cmd
}

/// A corpus directory with one chat log and one file that must be ignored.
fn corpus_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let mut text = String::new();
    for _ in 0..6 {
        text.push_str("Good morning team :wave:\n");
        text.push_str("I don't know <@U01SL713VH8>\n");
        text.push_str("the robot is ready\n");
    }
    fs::create_dir_all(tmp.path().join("chat")).unwrap();
    fs::write(tmp.path().join("chat/general.txt"), text).unwrap();
    fs::write(tmp.path().join("notes.md"), "ignored ignored ignored\n".repeat(10)).unwrap();
    tmp
}

fn read_yaml(path: &Path) -> BTreeMap<String, String> {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("suggest"));
}

#[test]
fn long_help_lists_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SQUISH_LOG_DIR"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"]["top_k"].is_u64());
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

#[test]
fn color_invalid_value_rejected() {
    cmd().args(["--color", "sometimes", "info"]).assert().failure();
}

#[test]
fn log_level_flag_accepted() {
    cmd().args(["--log-level", "debug", "info"]).assert().success();
}

#[test]
fn log_level_invalid_value_rejected() {
    cmd()
        .args(["--log-level", "loud", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// Suggest Command
// =============================================================================

#[test]
fn suggest_writes_yaml_with_presets_and_new_shortcuts() {
    let corpus = corpus_dir();
    let out = TempDir::new().unwrap();
    let output = out.path().join("nested/shortcuts.yaml");

    cmd()
        .args([
            "suggest",
            "--data-dir",
            corpus.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("good morning team"))
        .stdout(predicate::str::contains("ignored").not());

    let shortcuts = read_yaml(&output);
    assert_eq!(shortcuts.get("because").map(String::as_str), Some("bc"));
    assert!(shortcuts.contains_key("good morning team"));
    // Grammar is restored on export.
    assert_eq!(shortcuts.get("I don't know").map(String::as_str), Some("idk"));
}

#[test]
fn suggest_json_reports_shortcuts() {
    let corpus = corpus_dir();
    let output = cmd()
        .args([
            "--json",
            "suggest",
            "--no-write",
            "--no-builtin-presets",
            "--data-dir",
            corpus.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lines"], 18);
    assert_eq!(json["files"], 1);
    assert_eq!(json["empty_corpus"], false);
    assert!(json.get("output").is_none());

    let shortcuts = json["shortcuts"].as_array().unwrap();
    let robot = shortcuts
        .iter()
        .find(|s| s["phrase"] == "the robot is ready")
        .expect("frequent phrase should be abbreviated");
    assert_eq!(robot["count"], 6);

    let mut seen = std::collections::HashSet::new();
    for s in shortcuts {
        assert!(seen.insert(s["abbreviation"].as_str().unwrap().to_string()));
    }
}

#[test]
fn suggest_reads_stdin_without_data_dir() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("shortcuts.yaml");

    cmd()
        .args(["suggest", "--output", output.to_str().unwrap()])
        .write_stdin("see you tomorrow\n".repeat(5))
        .assert()
        .success()
        .stdout(predicate::str::contains("see you tomorrow"));

    assert!(read_yaml(&output).contains_key("see you tomorrow"));
}

#[test]
fn suggest_no_write_leaves_no_file() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("shortcuts.yaml");

    cmd()
        .args(["suggest", "--no-write", "--output", output.to_str().unwrap()])
        .write_stdin("see you tomorrow\n".repeat(5))
        .assert()
        .success();

    assert!(!output.exists());
}

#[test]
fn suggest_writes_autokey_phrases() {
    let corpus = corpus_dir();
    let out = TempDir::new().unwrap();
    let autokey = out.path().join("autokey");

    cmd()
        .args([
            "suggest",
            "--data-dir",
            corpus.path().to_str().unwrap(),
            "--output",
            out.path().join("s.yaml").to_str().unwrap(),
            "--autokey-dir",
            autokey.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(autokey.join("because.txt")).unwrap(),
        "because"
    );
    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(autokey.join(".because.json")).unwrap())
            .unwrap();
    assert_eq!(settings["abbreviation"]["abbreviations"][0], "bc");
    assert_eq!(settings["type"], "phrase");
}

#[test]
fn suggest_input_pattern_selects_files() {
    let corpus = corpus_dir();
    let output = cmd()
        .args([
            "--json",
            "suggest",
            "--no-write",
            "--data-dir",
            corpus.path().to_str().unwrap(),
            "--input-file-re",
            r".*\.md$",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lines"], 10);
    let shortcuts = json["shortcuts"].as_array().unwrap();
    assert!(shortcuts.iter().any(|s| s["phrase"] == "ignored ignored"));
}

#[test]
fn suggest_reads_slack_export_for_one_user() {
    let export = TempDir::new().unwrap();
    fs::write(
        export.path().join("users.json"),
        r#"[{"id": "U01", "name": "erik"}, {"id": "U02", "name": "sam"}]"#,
    )
    .unwrap();
    fs::create_dir_all(export.path().join("general")).unwrap();
    let mut day = Vec::new();
    for _ in 0..5 {
        day.push(r#"{"user": "U01", "text": "see you tomorrow :wave:"}"#);
        day.push(r#"{"user": "U02", "text": "other people talking"}"#);
    }
    fs::write(
        export.path().join("general/2021-03-01.json"),
        format!("[{}]", day.join(",")),
    )
    .unwrap();

    let output = cmd()
        .args([
            "--json",
            "suggest",
            "--no-write",
            "--data-dir",
            export.path().to_str().unwrap(),
            "--slack-user",
            "erik",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lines"], 5);
    assert_eq!(json["files"], 1);
    let shortcuts = json["shortcuts"].as_array().unwrap();
    assert!(shortcuts.iter().any(|s| s["phrase"] == "see you tomorrow"));
    assert!(!shortcuts.iter().any(|s| s["phrase"] == "other people talking"));
}

#[test]
fn slack_user_requires_data_dir() {
    cmd()
        .args(["suggest", "--no-write", "--slack-user", "erik"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--data-dir"));
}

#[test]
fn suggest_empty_corpus_warns_and_emits_presets() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("shortcuts.yaml");

    cmd()
        .args([
            "suggest",
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("no corpus files matched"));

    assert_eq!(read_yaml(&output).get("because").map(String::as_str), Some("bc"));
}

#[test]
fn suggest_json_flags_empty_corpus() {
    let tmp = TempDir::new().unwrap();
    let output = cmd()
        .args([
            "--json",
            "suggest",
            "--no-write",
            "--data-dir",
            tmp.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["empty_corpus"], true);
    assert_eq!(json["lines"], 0);
}

#[test]
fn suggest_missing_data_dir_fails() {
    cmd()
        .args(["suggest", "--no-write", "--data-dir", "/nonexistent/squish/corpus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load corpus"));
}

#[test]
fn suggest_invalid_pattern_fails() {
    let corpus = corpus_dir();
    cmd()
        .args([
            "suggest",
            "--no-write",
            "--data-dir",
            corpus.path().to_str().unwrap(),
            "--input-file-re",
            "(",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input file pattern"));
}

// =============================================================================
// Rank Command
// =============================================================================

#[test]
fn rank_json_is_best_first() {
    let corpus = corpus_dir();
    let output = cmd()
        .args([
            "--json",
            "rank",
            "--data-dir",
            corpus.path().to_str().unwrap(),
            "--top-k",
            "5",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let ranked: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ranked.len(), 5);
    let scores: Vec<u64> = ranked.iter().map(|r| r["score"].as_u64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn rank_respects_min_count() {
    let output = cmd()
        .args(["--json", "rank", "--min-count", "10"])
        .write_stdin("see you tomorrow\n".repeat(5))
        .output()
        .unwrap();
    assert!(output.status.success());

    let ranked: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(ranked.is_empty());
}

// =============================================================================
// Candidates Command
// =============================================================================

#[test]
fn candidates_json_marks_reserved() {
    let output = cmd()
        .args(["--json", "candidates", "robot"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["abbreviation"], "r");
    assert_eq!(rows[0]["reserved"], true);
    assert_eq!(rows[1]["abbreviation"], "rt");
    assert_eq!(rows[1]["reserved"], false);
    assert_eq!(rows[1]["saves_enough"], true);
}

#[test]
fn candidates_joins_words() {
    cmd()
        .args(["candidates", "good", "morning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gm"));
}

#[test]
fn candidates_requires_phrase() {
    cmd().arg("candidates").assert().failure();
}

// =============================================================================
// Match Command
// =============================================================================

#[test]
fn match_derives_plural_and_composite() {
    let tmp = TempDir::new().unwrap();
    let shortcuts = tmp.path().join("shortcuts.yaml");
    fs::write(&shortcuts, "robot: r\nthe: t\n").unwrap();

    let output = cmd()
        .args([
            "--json",
            "match",
            shortcuts.to_str().unwrap(),
            "robots",
            "the robot",
            "asdf",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["abbreviation"], "rs");
    assert_eq!(rows[0]["kind"], "plural");
    assert_eq!(rows[1]["abbreviation"], "tr");
    assert_eq!(rows[1]["kind"], "composite");
    assert!(rows[2].get("abbreviation").is_none());
}

#[test]
fn match_text_reports_no_match() {
    let tmp = TempDir::new().unwrap();
    let shortcuts = tmp.path().join("shortcuts.yaml");
    fs::write(&shortcuts, "robot: r\n").unwrap();

    cmd()
        .args(["match", shortcuts.to_str().unwrap(), "asdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("asdf: "))
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn match_missing_file_fails() {
    cmd()
        .args(["match", "/nonexistent/shortcuts.yaml", "robots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load shortcuts"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
