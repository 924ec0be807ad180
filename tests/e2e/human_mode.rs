//! Human mode: the main workflows read well on a terminal.

use predicates::prelude::*;
use predicates::str::contains;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{demo_project, TestDir, DEMO_DESCRIPTION};

#[test]
fn quick_start_without_command() {
    CliRunner::new()
        .command()
        .arg("--no-color")
        .assert()
        .success()
        .stdout(contains("QUICK START"))
        .stdout(contains("ltk --help"));
}

#[test]
fn parse_prints_summary() {
    let tmp = TestDir::new();
    let file = tmp.write_file("Setting.txt", DEMO_DESCRIPTION.as_bytes());

    CliRunner::new()
        .command()
        .args(["--no-color", "parse"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Demo"))
        .stdout(contains("360x960"))
        .stdout(contains("BorderLine CpuUsage"));
}

#[test]
fn generate_writes_description_file() {
    let tmp = TestDir::new();
    let project = tmp.write_project("demo", &demo_project());
    let out = tmp.join("out/Setting.txt");

    CliRunner::new()
        .command()
        .args(["--no-color", "generate"])
        .arg(&project)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("[OK]"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("name:Demo\r\n"));
    assert!(text.contains("BorderLine:"));
}

#[test]
fn generate_honors_configured_line_ending() {
    let tmp = TestDir::new();
    let project = tmp.write_project("demo", &demo_project());
    let config = tmp.write_file("ltk.yaml", b"line_ending: lf\n");

    CliRunner::new()
        .command()
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .arg(&project)
        .assert()
        .success()
        .stdout(contains("name:Demo\n"))
        .stdout(contains("\r").not());
}

#[test]
fn validate_lists_findings() {
    let tmp = TestDir::new();
    let project = tmp.write_project("demo", &demo_project());

    // back.png is never written, so the background check warns.
    CliRunner::new()
        .command()
        .args(["--no-color", "validate"])
        .arg(&project)
        .assert()
        .success()
        .stdout(contains("[WARN]"))
        .stdout(contains("back.png"));
}

#[test]
fn export_then_catalog() {
    let tmp = TestDir::new();
    let project = tmp.write_project("demo", &demo_project());
    let folder = tmp.join("resources/Programme/Demo");

    CliRunner::new()
        .command()
        .args(["--no-color", "export"])
        .arg(&project)
        .arg(&folder)
        .assert()
        .success()
        .stdout(contains("Exported"));

    assert!(folder.join("back.png").is_file());
    assert!(folder.join("Setting.txt").is_file());

    let schemes = tmp.join("resources/ThemeScheme");
    std::fs::create_dir_all(&schemes).unwrap();
    std::fs::copy(folder.join("Demo.json"), schemes.join("Demo.json")).unwrap();

    CliRunner::new()
        .command()
        .args(["--no-color", "catalog"])
        .arg(&schemes)
        .assert()
        .success()
        .stdout(contains("Demo"))
        .stdout(contains("360x960"));
}

#[test]
fn pack_and_unpack_round_trip() {
    let tmp = TestDir::new();
    let folder = tmp.theme_folder("Aurora", 24, 64);
    let archive = tmp.join("Aurora.smtheme");
    let dest = tmp.join("installed");

    CliRunner::new()
        .command()
        .args(["--no-color", "pack"])
        .arg(&folder)
        .arg("-o")
        .arg(&archive)
        .assert()
        .success()
        .stdout(contains("Packed 'Aurora'"))
        .stdout(contains("24x64"));

    CliRunner::new()
        .command()
        .args(["--no-color", "unpack"])
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .stdout(contains("Extracted"));

    assert!(dest.join("manifest.json").is_file());
    assert!(dest.join("preview.png").is_file());
}

#[test]
fn missing_archive_shows_suggestion() {
    CliRunner::new()
        .command()
        .args(["--no-color", "inspect", "/nonexistent/theme.smtheme"])
        .assert()
        .code(1)
        .stderr(contains("[ERR]"))
        .stderr(contains("Suggestion:"));
}

#[test]
fn unknown_scheme_type_is_rejected() {
    let tmp = TestDir::new();
    let project = tmp.write_project("demo", &demo_project());

    CliRunner::new()
        .command()
        .arg("scheme")
        .arg(&project)
        .args(["--type", "7"])
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}

#[test]
fn completions_for_bash() {
    CliRunner::new()
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("ltk"));
}
