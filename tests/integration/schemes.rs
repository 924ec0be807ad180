//! Scheme generation, theme export and scheme catalogs.

use std::fs;

use ltk::export::{export_theme, ExportOptions, BACK_IMAGE_FILE, SOURCE_DIR};
use ltk::image_ops::ResizeStrategy;
use ltk::model::ThemeType;
use ltk::scheme::{build_scheme, list_schemes, load_theme, scheme_json};

use crate::common::fixtures::{demo_project, TestDir};
use crate::common::init_test_logging;

#[test]
fn overlay_scheme_for_demo_project() {
    let scheme = build_scheme(&demo_project(), ThemeType::GifSimple);

    assert_eq!(scheme.scheme_type, 0);
    assert_eq!((scheme.width, scheme.height), (320, 240));

    let texts = scheme.display_texts.as_ref().unwrap();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text_type, "CPUTemp");
    assert_eq!(texts[0].text, "00°C");
    assert_eq!(texts[0].color, "0, 255, 255");
    assert_eq!(texts[0].font_name, "Impact");
    assert!(texts[0].bold);

    assert_eq!(scheme.display_images.len(), 1);
    assert_eq!(scheme.display_images[0].image, r"{PROGRAMME_PATH}\Demo\back.png");
    assert_eq!(scheme.background_video_file, None);
}

#[test]
fn layout_scheme_json_has_vendor_field_names() {
    let json: serde_json::Value =
        serde_json::from_str(&scheme_json(&demo_project(), ThemeType::SettingDescription).unwrap())
            .unwrap();

    assert_eq!(json["Type"], 1);
    assert_eq!(json["Name"], "Demo");
    assert_eq!(json["Width"], 360);
    assert_eq!(json["Height"], 960);
    assert!(json["DisplayTexts"].is_null());
    assert_eq!(json["DisplayImages"], serde_json::json!([]));
}

#[test]
fn exported_theme_is_found_by_the_catalog() {
    init_test_logging();
    let tmp = TestDir::new();
    let mut project = demo_project();
    let background = tmp.write_png("art/wallpaper.png", 90, 240);
    project = project.with_background(background.display().to_string());

    let folder = tmp.join("resources/Programme/Demo");
    let options = ExportOptions {
        theme_type: ThemeType::SettingDescription,
        resize: ResizeStrategy::Fit,
        ..ExportOptions::default()
    };
    let report = export_theme(&project, &folder, &options).unwrap();

    let back = image::open(folder.join(BACK_IMAGE_FILE)).unwrap();
    assert_eq!((back.width(), back.height()), (360, 960));
    assert!(folder.join(SOURCE_DIR).join("Setting.txt").is_file());

    let schemes = tmp.join("resources/ThemeScheme");
    fs::create_dir_all(&schemes).unwrap();
    fs::copy(&report.scheme_path, schemes.join("Demo.json")).unwrap();

    let entries = list_schemes(&schemes).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Demo");
    assert_eq!(entries[0].resolution(), "360x960");
    assert_eq!(entries[0].theme_type, ThemeType::SettingDescription);

    let theme = load_theme(&entries[0].path).unwrap();
    assert_eq!(theme.name, "Demo");
    assert_eq!(theme.images[0].file_name, BACK_IMAGE_FILE);
    assert_eq!(theme.texts.len(), 1);
    assert_eq!(theme.bars.len(), 1);
}

#[test]
fn scheme_without_description_loads_basic_theme() {
    let tmp = TestDir::new();
    let path = tmp.write_file(
        "ThemeScheme/Neon.json",
        br#"{"Type":0,"Name":"Neon","Width":320.0,"Height":240.0}"#,
    );

    let theme = load_theme(&path).unwrap();
    assert_eq!(theme.name, "Neon");
    assert_eq!((theme.width, theme.height), (320, 240));
    assert_eq!(theme.theme_type, ThemeType::GifSimple);
    assert_eq!(theme.element_count(), 0);
}
