//! Output mode abstraction for robot and human output.

use std::path::{Path, PathBuf};

use crate::archive::{ArchiveCheck, ThemeManifest};
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::ThemeError;
use crate::export::ExportReport;
use crate::model::Theme;
use crate::scheme::{SchemeEntry, VendorScheme};
use crate::validate::ValidationReport;

pub mod human;
pub mod palette;
pub mod robot;

pub use human::HumanOutput;
pub use palette::Palette;
pub use robot::RobotOutput;

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug)]
pub enum OutputMode {
    /// JSON output for agents and scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human(Palette),
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            if cli.no_color {
                console::set_colors_enabled(false);
                console::set_colors_enabled_stderr(false);
            }
            Self::Human(Palette::default())
        }
    }

    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human(palette) => Box::new(HumanOutput::new(palette)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &ThemeError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    // Description files
    fn theme(&self, theme: &Theme);
    /// Generated description text, when printed instead of written.
    fn description(&self, text: &str);
    fn validation(&self, report: &ValidationReport);

    // Vendor schemes
    fn scheme(&self, scheme: &VendorScheme);
    fn catalog(&self, entries: &[SchemeEntry]);
    fn exported(&self, report: &ExportReport);

    // Archives
    fn packed(&self, manifest: &ThemeManifest, archive: &Path);
    fn unpacked(&self, dest: &Path, files: &[PathBuf]);
    fn manifest(&self, manifest: &ThemeManifest);
    fn archive_check(&self, archive: &Path, check: &ArchiveCheck);
    fn contents(&self, entries: &[String]);

    // Metadata
    fn config(&self, config: &AppConfig, path: Option<&Path>);
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>);
}
