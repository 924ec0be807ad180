//! Packing, atomic replacement and extraction of `.smtheme` archives.

use std::fs;

use ltk::archive::{
    self, Packer, ThemeManifest, BACKGROUND_FILE, MANIFEST_FILE, PREVIEW_FILE, SETTINGS_FILE,
};
use ltk::ThemeError;

use crate::common::fixtures::TestDir;
use crate::common::init_test_logging;

fn stale_manifest() -> ThemeManifest {
    let mut manifest = ThemeManifest::new("Demo");
    manifest.resolution = "1x1".to_string();
    manifest.author = "Someone".to_string();
    manifest
}

#[test]
fn unpacked_manifest_reports_measured_resolution() {
    init_test_logging();
    let tmp = TestDir::new();
    let folder = tmp.theme_folder("Demo", 48, 128);
    let output = tmp.join("dist/Demo.smtheme");

    let written = archive::pack(&folder, &output, Some(stale_manifest())).unwrap();
    assert_eq!(written.resolution, "48x128");

    let dest = tmp.join("installed");
    let files = archive::unpack(&output, &dest).unwrap();
    assert!(files.contains(&dest.join(MANIFEST_FILE)));

    let manifest: ThemeManifest =
        serde_json::from_str(&fs::read_to_string(dest.join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(manifest.resolution, "48x128");
    assert_eq!(manifest.author, "Someone");
    assert_eq!(manifest.dimensions(), Some((48, 128)));

    let background = image::open(dest.join(BACKGROUND_FILE)).unwrap();
    assert_eq!((background.width(), background.height()), (48, 128));
    assert_eq!(
        fs::read_to_string(dest.join(SETTINGS_FILE)).unwrap(),
        fs::read_to_string(folder.join("Setting.txt")).unwrap()
    );
}

#[test]
fn uncommitted_stage_keeps_previous_archive() {
    let tmp = TestDir::new();
    let output = tmp.join("Demo.smtheme");

    let old_folder = tmp.theme_folder("Old", 20, 40);
    archive::pack(&old_folder, &output, None).unwrap();
    let previous = fs::read(&output).unwrap();

    let new_folder = tmp.theme_folder("New", 60, 80);
    let staged = Packer::new().stage(&new_folder, &output, None).unwrap();
    let temp = staged.temp_path().to_path_buf();
    assert!(temp.is_file());
    assert_eq!(fs::read(&output).unwrap(), previous);

    // Interrupted before the rename.
    drop(staged);

    assert!(!temp.exists());
    assert_eq!(fs::read(&output).unwrap(), previous);
    assert_eq!(archive::inspect(&output).unwrap().resolution, "20x40");
}

#[test]
fn committed_stage_replaces_previous_archive() {
    let tmp = TestDir::new();
    let output = tmp.join("Demo.smtheme");
    archive::pack(&tmp.theme_folder("Old", 20, 40), &output, None).unwrap();

    let staged = Packer::new()
        .stage(&tmp.theme_folder("New", 60, 80), &output, None)
        .unwrap();
    let manifest = staged.commit().unwrap();

    assert_eq!(manifest.name, "New");
    assert_eq!(archive::inspect(&output).unwrap().resolution, "60x80");
}

#[test]
fn failed_pack_leaves_no_destination() {
    let tmp = TestDir::new();
    let folder = tmp.join("Empty");
    fs::create_dir_all(&folder).unwrap();
    let output = tmp.join("Empty.smtheme");

    let err = archive::pack(&folder, &output, None).unwrap_err();
    assert!(matches!(err, ThemeError::NotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn frames_mark_archive_animated() {
    let tmp = TestDir::new();
    let folder = tmp.theme_folder("Anim", 32, 32);
    for name in ["frames/10.png", "frames/2.png", "frames/1.png"] {
        tmp.write_png(&format!("Anim/{name}"), 8, 8);
    }
    let output = tmp.join("Anim.smtheme");

    let manifest = Packer::new()
        .with_preview_width(16)
        .pack(&folder, &output, None)
        .unwrap();
    assert!(manifest.animated);
    assert_eq!(manifest.frame_count, 3);

    let entries = archive::list_contents(&output).unwrap();
    let frames: Vec<&String> = entries.iter().filter(|e| e.starts_with("frames/")).collect();
    assert_eq!(frames, ["frames/1.png", "frames/2.png", "frames/10.png"]);

    let preview = archive::extract_preview(&output).unwrap().unwrap();
    let preview = image::load_from_memory(&preview).unwrap();
    assert_eq!((preview.width(), preview.height()), (16, 16));
}

#[test]
fn check_passes_packed_archive_and_fails_junk() {
    let tmp = TestDir::new();
    let output = tmp.join("Demo.smtheme");
    archive::pack(&tmp.theme_folder("Demo", 20, 40), &output, None).unwrap();

    let check = archive::validate(&output).unwrap();
    assert!(check.passed, "{check:?}");
    assert!(check.issues.is_empty());

    let junk = tmp.write_file("junk.smtheme", b"not a zip");
    let check = archive::validate(&junk).unwrap();
    assert!(!check.passed);
    assert_eq!(check.issues.len(), 1);
    assert!(check.issues[0].fatal);

    let contents = archive::list_contents(&output).unwrap();
    assert!(contents.iter().any(|e| e == PREVIEW_FILE));
}
