//! Test fixture helpers for creating temporary test data.
//!
//! Everything lives in a [`TestDir`] and is removed when it is dropped.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

use ltk::model::{
    BorderLineBody, ProjectWidget, TextBody, WidgetBody, WidgetLayoutProject,
};

/// The description used by the end-to-end scenario.
pub const DEMO_DESCRIPTION: &str = "name:Demo\n\
width:360\n\
height:960\n\
back.png:x@0,y@0,z@-100\n\
Text:x@20,y@50,z@1,FontSize@32,FontFamily@#Impact,Foreground@#00FFFF,data@CPUTemp,unit@°C\n\
BorderLine:x@20,y@100,z@2,maxwidth@320,maxheight@15,Fill@#00FFFF,data@CpuUsage,MaxNum@100\n";

/// Write a solid-color PNG.
///
/// # Panics
///
/// Panics if the image cannot be written.
pub fn write_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(path)
        .unwrap_or_else(|e| panic!("Failed to save image at {path:?}: {e}"));
}

/// The project behind [`DEMO_DESCRIPTION`].
#[must_use]
pub fn demo_project() -> WidgetLayoutProject {
    let text = TextBody {
        font_size: 32,
        font_family: "Impact".to_string(),
        color: "#00FFFF".to_string(),
        width: 0,
        height: 0,
    };
    let bar = BorderLineBody {
        bar_width: 320,
        bar_height: 15,
        fill: "#00FFFF".to_string(),
        ..BorderLineBody::default()
    };

    WidgetLayoutProject::new("Demo", 360, 960)
        .with_background("back.png")
        .with_widget(
            ProjectWidget::new("CPU", WidgetBody::Text(text))
                .at(20, 50, 1)
                .bound_to("CPUTemp", "°C"),
        )
        .with_widget(
            ProjectWidget::new("Usage", WidgetBody::BorderLine(bar))
                .at(20, 100, 2)
                .bound_to("CpuUsage", ""),
        )
}

/// Temporary directory for general test use.
pub struct TestDir {
    pub dir: TempDir,
}

impl TestDir {
    /// # Panics
    ///
    /// Panics if directory creation fails.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// # Panics
    ///
    /// Panics if the path is not valid UTF-8.
    #[must_use]
    pub fn path_str(&self) -> &str {
        self.dir.path().to_str().expect("Path is not valid UTF-8")
    }

    /// Write a file, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if file writing fails.
    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write a PNG, creating parent directories.
    pub fn write_png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.write_file(name, b"");
        write_png(&path, width, height, [30, 60, 90]);
        path
    }

    /// Save a project file and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the project cannot be saved.
    pub fn write_project(&self, name: &str, project: &WidgetLayoutProject) -> PathBuf {
        let mut project = project.clone();
        ltk::model::save_project(&mut project, self.join(name)).expect("Failed to save project")
    }

    /// A theme folder ready for packing: a background and a description file.
    pub fn theme_folder(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let folder = self.join(name);
        std::fs::create_dir_all(&folder).expect("Failed to create theme folder");
        write_png(&folder.join("background.png"), width, height, [10, 20, 30]);
        std::fs::write(folder.join("Setting.txt"), DEMO_DESCRIPTION)
            .expect("Failed to write description");
        folder
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
