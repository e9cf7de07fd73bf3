//! End-to-end tests for the steam-screenshot-merge binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use steam_screenshot_merge::parse_text_file;

fn cmd() -> Command {
    Command::cargo_bin("steam-screenshot-merge").expect("binary should build")
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}

const TARGET_VDF: &str = r#""screenshots"
{
	"440"
	{
		"0"
		{
			"filename"	"440/screenshots/a.jpg"
		}
	}
}
"#;

const SOURCE_VDF: &str = r#""screenshots"
{
	"440"
	{
		"0"
		{
			"filename"	"440/screenshots/b.jpg"
		}
	}
	"570"
	{
		"0"
		{
			"filename"	"570/screenshots/c.jpg"
		}
	}
}
"#;

#[test]
fn merges_two_files_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_fixture(dir.path(), "target.vdf", TARGET_VDF);
    let source = write_fixture(dir.path(), "source.vdf", SOURCE_VDF);
    let output = dir.path().join("merged.vdf");

    cmd()
        .arg(&target)
        .arg(&source)
        .arg(&output)
        .assert()
        .success();

    let merged = parse_text_file(&output).unwrap();
    assert_eq!(
        merged.get_str(&["screenshots", "440", "0", "filename"]),
        Some("440/screenshots/a.jpg")
    );
    assert_eq!(
        merged.get_str(&["screenshots", "440", "1", "filename"]),
        Some("440/screenshots/b.jpg")
    );
    assert_eq!(
        merged.get_str(&["screenshots", "570", "0", "filename"]),
        Some("570/screenshots/c.jpg")
    );
}

#[test]
fn inputs_are_left_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_fixture(dir.path(), "target.vdf", TARGET_VDF);
    let source = write_fixture(dir.path(), "source.vdf", SOURCE_VDF);
    let output = dir.path().join("merged.vdf");

    cmd()
        .arg(&target)
        .arg(&source)
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&target).unwrap(), TARGET_VDF);
    assert_eq!(fs::read_to_string(&source).unwrap(), SOURCE_VDF);
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_fixture(dir.path(), "target.vdf", TARGET_VDF);
    let missing = dir.path().join("nope.vdf");
    let output = dir.path().join("merged.vdf");

    cmd()
        .arg(&target)
        .arg(&missing)
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!output.exists());
}

#[test]
fn malformed_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_fixture(dir.path(), "target.vdf", "\"screenshots\"\n{\n");
    let source = write_fixture(dir.path(), "source.vdf", SOURCE_VDF);
    let output = dir.path().join("merged.vdf");

    cmd()
        .arg(&target)
        .arg(&source)
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to parse"));

    assert!(!output.exists());
}

#[test]
fn overwrites_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_fixture(dir.path(), "target.vdf", TARGET_VDF);
    let source = write_fixture(dir.path(), "source.vdf", SOURCE_VDF);
    let output = write_fixture(dir.path(), "merged.vdf", "stale contents");

    cmd()
        .arg(&target)
        .arg(&source)
        .arg(&output)
        .assert()
        .success();

    let merged = parse_text_file(&output).unwrap();
    assert!(merged.get_obj(&["screenshots", "570"]).is_some());
}

#[test]
fn missing_arguments_fail_with_usage() {
    cmd()
        .arg("only-one.vdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
