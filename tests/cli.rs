use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn copyproj() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("copyproj"))
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

#[cfg(unix)]
#[test]
fn copies_project_with_renamed_files_and_absolute_paths() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("Proj.txt"), "see ../../inc/Proj.h\n");
    write_file(&source.join("Output/log.txt"), "build log\n");

    let target = temp.path().join("NewProj");
    copyproj().arg(&source).arg(&target).assert().success();

    let expected_header = temp
        .path()
        .parent()
        .unwrap()
        .join("inc")
        .join("NewProj.h");
    assert_eq!(
        fs::read_to_string(target.join("NewProj.txt")).unwrap(),
        format!("see {}\n", expected_header.display())
    );
    assert!(!target.join("Proj.txt").exists());
    assert!(!target.join("Output").exists());
}

#[test]
fn single_path_copies_current_directory() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("Proj.sln"), "Project(\"Proj\")\n");

    copyproj()
        .current_dir(&source)
        .arg(temp.path().join("Game"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("Game/Game.sln")).unwrap(),
        "Project(\"Game\")\n"
    );
}

#[test]
fn refuses_to_overwrite_existing_file() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("Proj.h"), "#define PROJ 1\n");

    let target = temp.path().join("Game");
    write_file(&target.join("Game.h"), "keep me\n");

    copyproj()
        .arg(&source)
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("Game.h"));

    assert_eq!(
        fs::read_to_string(target.join("Game.h")).unwrap(),
        "keep me\n"
    );
}

#[test]
fn no_fix_relative_keeps_relative_paths() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("a.vcxproj"), "<Dir>..\\..\\lib</Dir>\n");

    let target = temp.path().join("Game");
    copyproj()
        .arg("-r")
        .arg(&source)
        .arg(&target)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(target.join("a.vcxproj")).unwrap(),
        "<Dir>..\\..\\lib</Dir>\n"
    );
}

#[test]
fn json_report_lists_files_and_exclusions() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("Proj.txt"), "Proj\n");
    write_file(&source.join("src/main.c"), "int main;\n");
    write_file(&source.join("ipch/x.pch"), "x");

    let assert = copyproj()
        .arg("--format")
        .arg("json")
        .arg(&source)
        .arg(temp.path().join("Game"))
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["source_name"], "Proj");
    assert_eq!(report["target_name"], "Game");

    let destinations: Vec<_> = report["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["destination"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(destinations, vec!["Game.txt", "src/main.c"]);
    assert_eq!(report["excluded_dirs"][0], "ipch");
}

#[test]
fn jsonl_report_has_one_line_per_file() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("a.txt"), "a\n");
    write_file(&source.join("b.txt"), "b\n");

    let assert = copyproj()
        .arg("--format")
        .arg("jsonl")
        .arg(&source)
        .arg(temp.path().join("Game"))
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["source"], "a.txt");
    assert_eq!(items[1]["bytes"], 2);
}

#[test]
fn extra_exclude_prefix_from_flag() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("Debug/app.obj"), "obj");
    write_file(&source.join("main.c"), "int main;\n");

    let target = temp.path().join("Game");
    copyproj()
        .arg("--exclude")
        .arg("debug")
        .arg(&source)
        .arg(&target)
        .assert()
        .success();

    assert!(target.join("main.c").exists());
    assert!(!target.join("Debug").exists());
}

#[test]
fn summary_mentions_project_names() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("a.txt"), "a\n");

    copyproj()
        .arg(&source)
        .arg(temp.path().join("Game"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied Proj -> Game"))
        .stdout(predicate::str::contains("files: 1"));
}

#[test]
fn empty_source_reports_no_files() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("Output/log.txt"), "build log\n");

    copyproj()
        .arg("--no-color")
        .arg(&source)
        .arg(temp.path().join("Game"))
        .assert()
        .success()
        .stdout(predicate::str::contains("files: 0"))
        .stdout(predicate::str::contains("no files copied"));
}

#[test]
fn quiet_prints_nothing() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Proj");
    write_file(&source.join("a.txt"), "a\n");

    copyproj()
        .arg("-q")
        .arg(&source)
        .arg(temp.path().join("Game"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn root_source_is_rejected() {
    let temp = tempdir().unwrap();

    copyproj()
        .arg("/")
        .arg(temp.path().join("Game"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("should not be a root path"));

    assert!(!temp.path().join("Game").exists());
}

#[test]
fn no_arguments_prints_usage() {
    copyproj()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
