//! Project files on disk and the checks run against them.

use ltk::model::{
    load_project, BarBody, ProjectWidget, TextBody, WidgetBody, WidgetLayoutProject,
};
use ltk::validate::{validate_project, Severity, Validator};
use ltk::ThemeError;

use crate::common::fixtures::{demo_project, TestDir};
use crate::common::init_test_logging;

#[test]
fn saved_project_loads_back_with_resolved_background() {
    init_test_logging();
    let tmp = TestDir::new();
    tmp.write_png("back.png", 36, 96);

    let path = tmp.write_project("demo", &demo_project());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("smtproj"));

    let loaded = load_project(&path).unwrap();
    assert_eq!(loaded.widgets, demo_project().widgets);
    assert_eq!(
        loaded.background.path().map(std::path::PathBuf::from),
        Some(tmp.join("back.png"))
    );

    let report = validate_project(&loaded);
    assert_eq!(report.count(Severity::Warning), 0, "{report:?}");
}

#[test]
fn yaml_and_toml_projects_load() {
    let tmp = TestDir::new();
    let yaml = tmp.write_file(
        "demo.yaml",
        br##"themeName: Yaml
width: 320
height: 240
widgets:
  - name: clock
    dataType: Time
    kind: Text
    x: 10
    y: 20
    color: "#00ff00"
"##,
    );
    let toml = tmp.write_file(
        "demo.toml",
        br##"themeName = "Toml"
width = 480
height = 480

[[widgets]]
name = "load"
dataType = "GpuLoad"
kind = "DefaultLine"
x = 5
y = 6
fill = "#123456"
"##,
    );

    let from_yaml = load_project(&yaml).unwrap();
    assert_eq!(from_yaml.theme_name, "Yaml");
    match &from_yaml.widgets[0].body {
        WidgetBody::Text(text) => {
            assert_eq!(text.color, "#00ff00");
            assert_eq!(text.font_size, 24);
        }
        other => panic!("expected text, got {other:?}"),
    }

    let from_toml = load_project(&toml).unwrap();
    assert_eq!((from_toml.width, from_toml.height), (480, 480));
    assert_eq!(from_toml.widgets[0].body.bar().unwrap().fill, "#123456");
}

#[test]
fn garbage_project_is_invalid_format() {
    let tmp = TestDir::new();
    let path = tmp.write_file("broken.smtproj", b"{ not json");
    assert!(matches!(load_project(&path), Err(ThemeError::InvalidFormat(_))));
}

#[test]
fn out_of_bounds_widget_is_reported() {
    let project = WidgetLayoutProject::new("Bounds", 360, 960).with_widget(
        ProjectWidget::new("Far", WidgetBody::DefaultLine(BarBody::default())).at(400, 10, 0),
    );

    let report = validate_project(&project);
    let warnings: Vec<&str> = report
        .with_severity(Severity::Warning)
        .map(|m| m.message.as_str())
        .collect();
    assert!(
        warnings.iter().any(|m| m.contains("'Far'") && m.contains("out of bounds")),
        "{warnings:?}"
    );
    assert!(!report.has_errors());
}

#[test]
fn valid_colors_produce_no_color_errors() {
    let text = TextBody {
        color: "#A1B2C3".to_string(),
        ..TextBody::default()
    };
    let bar = BarBody {
        fill: "#0F0F0F".to_string(),
        ..BarBody::default()
    };
    let project = WidgetLayoutProject::new("Colors", 360, 960)
        .with_widget(ProjectWidget::new("t", WidgetBody::Text(text)).bound_to("CPUTemp", ""))
        .with_widget(ProjectWidget::new("b", WidgetBody::DefaultLine(bar)));

    let report = validate_project(&project);
    assert_eq!(report.count(Severity::Error), 0, "{report:?}");
    assert_eq!(report.count(Severity::Success), 1);
}

#[test]
fn configured_fonts_are_known() {
    let text = TextBody {
        font_family: "Audiowide".to_string(),
        ..TextBody::default()
    };
    let project = WidgetLayoutProject::new("Fonts", 360, 960)
        .with_widget(ProjectWidget::new("t", WidgetBody::Text(text)).bound_to("CPUTemp", ""));

    assert_eq!(validate_project(&project).count(Severity::Info), 1);
    let report = Validator::new()
        .with_extra_fonts(["Audiowide"])
        .validate(&project);
    assert_eq!(report.count(Severity::Info), 0);
}
