//! Laws of the description format: round trips, normalization, defaults, ordering.

use ltk::description::{
    generate, generate_with, normalize_color, parse_str, GenerateOptions, LineEnding, Params,
};
use ltk::model::{
    BarBody, BarKind, BorderLineBody, GridLineBody, ProjectWidget, TextBody, WidgetBody,
    WidgetKind, WidgetLayoutProject,
};

use crate::common::fixtures::{demo_project, DEMO_DESCRIPTION};
use crate::common::init_test_logging;

fn kind_of(bar: &BarKind) -> WidgetKind {
    match bar {
        BarKind::BorderLine(_) => WidgetKind::BorderLine,
        BarKind::DefaultLine => WidgetKind::DefaultLine,
        BarKind::GridLine(_) => WidgetKind::GridLine,
    }
}

fn mixed_project() -> WidgetLayoutProject {
    let text = TextBody {
        color: "ff8800".to_string(),
        ..TextBody::default()
    };
    let border = BorderLineBody {
        fill: "#abcdef".to_string(),
        ..BorderLineBody::default()
    };
    let line = BarBody {
        fill: "#112233".to_string(),
        ..BarBody::default()
    };

    WidgetLayoutProject::new("Mixed", 480, 480)
        .with_widget(
            ProjectWidget::new("grid", WidgetBody::GridLine(GridLineBody::default()))
                .at(5, 400, 4)
                .bound_to("GpuLoad", ""),
        )
        .with_widget(
            ProjectWidget::new("temp", WidgetBody::Text(text))
                .at(12, 34, 1)
                .bound_to("CPUTemp", "°C"),
        )
        .with_widget(
            ProjectWidget::new("usage", WidgetBody::BorderLine(border))
                .at(40, 200, 2)
                .bound_to("CpuUsage", ""),
        )
        .with_widget(ProjectWidget::new("divider", WidgetBody::DefaultLine(line)).at(0, 300, 3))
}

#[test]
fn round_trip_preserves_positions_kinds_colors_and_bindings() {
    init_test_logging();
    let project = mixed_project();
    let theme = parse_str(&generate(&project));

    assert_eq!(theme.texts.len(), 1);
    let text = &theme.texts[0];
    assert_eq!((text.x, text.y, text.z), (12.0, 34.0, 1));
    assert_eq!(text.foreground_color, "#FF8800");
    assert_eq!(text.data_binding_key, "CPUTemp");
    assert_eq!(text.unit, "°C");

    let mut bars: Vec<&ProjectWidget> = project
        .widgets
        .iter()
        .filter(|w| w.kind() != WidgetKind::Text)
        .collect();
    bars.sort_by_key(|w| w.z);

    assert_eq!(theme.bars.len(), bars.len());
    for (parsed, original) in theme.bars.iter().zip(bars) {
        assert_eq!(kind_of(&parsed.kind), original.kind());
        assert_eq!((parsed.x, parsed.y, parsed.z), (
            f64::from(original.x),
            f64::from(original.y),
            original.z
        ));
        let fill = original.body.bar().map(|b| b.fill).unwrap_or_default();
        assert_eq!(parsed.fill_color, normalize_color(&fill));
        assert_eq!(parsed.data_binding_key, original.data_type);
    }
}

#[test]
fn color_normalization_is_idempotent() {
    for raw in ["ff0000", "#ff0000", "#FF0000", "abc", "", "   ", "#12", "zzzzzz", "#80ff0000"] {
        let once = normalize_color(raw);
        assert_eq!(normalize_color(&once), once, "not idempotent for {raw:?}");
    }
    assert_eq!(normalize_color("ff0000"), "#FF0000");
    assert_eq!(normalize_color("#ff0000"), "#FF0000");
}

#[test]
fn tokenizer_keys_ignore_case() {
    let params = Params::parse("X@5,Y@10");
    assert_eq!(params.get("x"), Some("5"));
    assert_eq!(params.get("Y"), Some("10"));
}

#[test]
fn bare_text_line_gets_defaults() {
    let theme = parse_str("Text:x@10,y@20");
    let text = &theme.texts[0];
    assert_eq!(text.font_size_pixels, 12);
    assert_eq!(text.font_family, "Segoe UI");
    assert_eq!(text.foreground_color, "#FFFFFF");
    assert!((text.opacity - 1.0).abs() < f64::EPSILON);
}

#[test]
fn equal_z_keeps_insertion_order() {
    let bar = |x: i32, z: i32| {
        ProjectWidget::new(format!("bar{x}"), WidgetBody::DefaultLine(BarBody::default()))
            .at(x, 0, z)
    };
    let project = WidgetLayoutProject::new("Z", 360, 960)
        .with_widget(bar(1, 5))
        .with_widget(bar(2, 5))
        .with_widget(bar(3, 1));

    let theme = parse_str(&generate(&project));
    let xs: Vec<f64> = theme.bars.iter().map(|b| b.x).collect();
    assert_eq!(xs, [3.0, 1.0, 2.0]);
}

#[test]
fn demo_scenario_parses() {
    let theme = parse_str(DEMO_DESCRIPTION);

    assert_eq!(theme.name, "Demo");
    assert_eq!((theme.width, theme.height), (360, 960));
    assert_eq!(theme.images.len(), 1);
    assert_eq!(theme.images[0].z, -100);

    let text = &theme.texts[0];
    assert_eq!(text.font_size_pixels, 32);
    assert_eq!(text.font_family, "Impact");
    assert_eq!(text.foreground_color, "#00FFFF");
    assert_eq!(text.data_binding_key, "CPUTemp");
    assert_eq!(text.unit, "°C");

    let bar = &theme.bars[0];
    assert_eq!(bar.fill_color, "#00FFFF");
    match &bar.kind {
        BarKind::BorderLine(style) => assert_eq!(style.max_value, 100),
        other => panic!("expected a BorderLine, got {other:?}"),
    }
}

#[test]
fn demo_project_regenerates_the_demo_layout() {
    let generated = parse_str(&generate(&demo_project()));
    let original = parse_str(DEMO_DESCRIPTION);

    assert_eq!(generated.name, original.name);
    assert_eq!(generated.images[0].file_name, original.images[0].file_name);
    assert_eq!(generated.texts[0].foreground_color, original.texts[0].foreground_color);
    assert_eq!(generated.bars[0].max_width_pixels, 320);
    assert_eq!(generated.bars[0].max_height_pixels, 15);
}

#[test]
fn line_endings_do_not_change_the_parse() {
    let project = demo_project();
    let crlf = generate(&project);
    let lf = generate_with(
        &project,
        GenerateOptions {
            line_ending: LineEnding::Lf,
        },
    );

    assert!(crlf.contains("\r\n"));
    assert!(!lf.contains('\r'));
    assert_eq!(parse_str(&crlf), parse_str(&lf));
}
