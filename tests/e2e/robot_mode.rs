//! Robot mode: every command prints parseable JSON and uses documented exit codes.

use serde_json::json;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{TestDir, DEMO_DESCRIPTION};

const BROKEN_COLOR_PROJECT: &str = r##"themeName: Broken
width: 360
height: 960
widgets:
  - name: temp
    dataType: CPUTemp
    kind: Text
    x: 10
    y: 10
    color: "#12345"
"##;

#[test]
fn quick_start_names_the_tool() {
    CliRunner::new()
        .run_robot(&[])
        .assert_success()
        .assert_json_field("/tool", &json!("ltk"))
        .assert_json_field("/version", &json!(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_as_json() {
    let result = CliRunner::new().run(&["--format=json", "version"]);
    result.assert_success();
    assert_eq!(result.json()["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn compact_json_is_one_line() {
    let result = CliRunner::new().run(&["--format=json-compact", "version"]);
    result.assert_success();
    assert_eq!(result.stdout.trim().lines().count(), 1);
}

#[test]
fn parse_demo_description() {
    let tmp = TestDir::new();
    let file = tmp.write_file("Setting.txt", DEMO_DESCRIPTION.as_bytes());

    CliRunner::new()
        .run_robot(&["parse", file.to_str().unwrap()])
        .assert_success()
        .assert_json_field("/name", &json!("Demo"))
        .assert_json_field("/width", &json!(360))
        .assert_json_field("/texts/0/fontFamily", &json!("Impact"))
        .assert_json_field("/bars/0/kind/type", &json!("BorderLine"))
        .assert_json_array_len("/images", 1);
}

#[test]
fn strict_parse_fails_on_unknown_lines() {
    let tmp = TestDir::new();
    let file = tmp.write_file("Setting.txt", b"name:Odd\nSparkle:x@1\n");

    let file = file.to_str().unwrap();
    CliRunner::new().run_robot(&["parse", file]).assert_success();
    CliRunner::new()
        .run_robot(&["parse", "--strict", file])
        .assert_exit_code(2)
        .assert_json_field("/name", &json!("Odd"));
}

#[test]
fn strict_parse_accepts_byte_order_mark() {
    let tmp = TestDir::new();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(DEMO_DESCRIPTION.as_bytes());
    let file = tmp.write_file("Setting.txt", &bytes);

    CliRunner::new()
        .run_robot(&["parse", "--strict", file.to_str().unwrap()])
        .assert_success()
        .assert_json_field("/name", &json!("Demo"));
}

#[test]
fn missing_file_reports_error_envelope() {
    let result = CliRunner::new().run_robot(&["parse", "/nonexistent/Setting.txt"]);
    result.assert_exit_code(1);

    let err = result.stderr_json();
    assert_eq!(err["error"], true);
    assert_eq!(err["kind"], "not_found");
    assert_eq!(err["recoverable"], true);
    assert!(err["suggestion"].is_string());
    assert!(result.stdout.is_empty());
}

#[test]
fn validate_fails_with_exit_code_two_on_bad_color() {
    let tmp = TestDir::new();
    let project = tmp.write_file("broken.yaml", BROKEN_COLOR_PROJECT.as_bytes());

    let result = CliRunner::new().run_robot(&["validate", project.to_str().unwrap()]);
    result
        .assert_exit_code(2)
        .assert_json_field("/valid", &json!(false))
        .assert_json_field("/summary/errors", &json!(1));

    let messages = result.json()["messages"].as_array().unwrap().clone();
    assert!(messages
        .iter()
        .any(|m| m["severity"] == "error" && m["message"].as_str().unwrap().contains("#12345")));
}

#[test]
fn validate_passes_demo_project() {
    let tmp = TestDir::new();
    tmp.write_png("back.png", 36, 96);
    let project = tmp.write_project("demo", &crate::common::fixtures::demo_project());

    CliRunner::new()
        .run_robot(&["validate", project.to_str().unwrap()])
        .assert_success()
        .assert_json_field("/valid", &json!(true))
        .assert_json_field("/summary/warnings", &json!(0));
}

#[test]
fn overlay_scheme_for_project() {
    let tmp = TestDir::new();
    let project = tmp.write_project("demo", &crate::common::fixtures::demo_project());

    CliRunner::new()
        .run_robot(&["scheme", project.to_str().unwrap(), "--type", "0"])
        .assert_success()
        .assert_json_field("/Type", &json!(0))
        .assert_json_field("/Width", &json!(320))
        .assert_json_field("/DisplayTexts/0/Text", &json!("00°C"))
        .assert_json_array_len("/DisplayImages", 1);
}

#[test]
fn pack_then_inspect_check_and_list() {
    let tmp = TestDir::new();
    let folder = tmp.theme_folder("Neon", 36, 96);
    let archive = tmp.join("Neon.smtheme");
    let archive_str = archive.to_str().unwrap();
    let cli = CliRunner::new();

    cli.run_robot(&[
        "pack",
        folder.to_str().unwrap(),
        "-o",
        archive_str,
        "--author",
        "Tester",
        "--theme-version",
        "2.1",
    ])
    .assert_success()
    .assert_json_field("/ok", &json!(true))
    .assert_json_field("/manifest/name", &json!("Neon"))
    .assert_json_field("/manifest/resolution", &json!("36x96"));

    cli.run_robot(&["inspect", archive_str])
        .assert_success()
        .assert_json_field("/author", &json!("Tester"))
        .assert_json_field("/version", &json!("2.1"))
        .assert_json_field("/frameCount", &json!(0));

    cli.run_robot(&["check", archive_str])
        .assert_success()
        .assert_json_field("/passed", &json!(true))
        .assert_json_array_len("/issues", 0);

    let contents = cli.run_robot(&["contents", archive_str]);
    contents.assert_success();
    let names: Vec<String> = serde_json::from_value(contents.json()).unwrap();
    assert_eq!(names[0], "manifest.json");
    assert!(names.contains(&"settings.txt".to_string()));
}

#[test]
fn check_fails_on_non_archive() {
    let tmp = TestDir::new();
    let junk = tmp.write_file("junk.smtheme", b"plain text");

    CliRunner::new()
        .run_robot(&["check", junk.to_str().unwrap()])
        .assert_exit_code(2)
        .assert_json_field("/passed", &json!(false));
}

#[test]
fn config_reads_explicit_file() {
    let tmp = TestDir::new();
    let config = tmp.write_file(
        "ltk.toml",
        b"author = \"Config Author\"\npreview_width = 120\nextra_fonts = [\"Audiowide\"]\n",
    );

    CliRunner::new()
        .run_robot(&["--config", config.to_str().unwrap(), "config"])
        .assert_success()
        .assert_json_field("/config/author", &json!("Config Author"))
        .assert_json_field("/config/preview_width", &json!(120))
        .assert_json_field("/config/line_ending", &json!("crlf"))
        .assert_json_field("/path", &json!(config.to_str().unwrap()));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let tmp = TestDir::new();
    let missing = tmp.join("absent.toml");

    let result = CliRunner::new().run_robot(&["--config", missing.to_str().unwrap(), "config"]);
    result.assert_exit_code(1);
    assert_eq!(result.stderr_json()["kind"], "not_found");
}

#[test]
fn format_env_var_selects_json() {
    let result = CliRunner::new()
        .with_env("LTK_FORMAT", "json")
        .run(&["version"]);
    result.assert_success();
    assert!(result.json()["version"].is_string());
}
