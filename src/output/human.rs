//! Human-friendly output implementation using console styling.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use crate::archive::{ArchiveCheck, ThemeManifest};
use crate::config::AppConfig;
use crate::error::ThemeError;
use crate::export::ExportReport;
use crate::model::Theme;
use crate::scheme::{SchemeEntry, VendorScheme};
use crate::validate::ValidationReport;

use super::{Output, Palette};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    palette: Palette,
}

impl HumanOutput {
    #[instrument(skip(palette))]
    pub fn new(palette: Palette) -> Self {
        debug!("Creating HumanOutput");
        Self { palette }
    }

    fn header(&self, title: &str) {
        println!("{}", self.palette.header.apply_to(title));
    }

    fn field(&self, name: &str, value: impl std::fmt::Display) {
        println!(
            "  {}{}",
            self.palette.label.apply_to(format!("{name:<12}")),
            self.palette.value.apply_to(value)
        );
    }

    fn tagged(&self, tag: &str, style: &console::Style, message: &str) {
        println!("{} {message}", style.clone().bold().apply_to(tag));
    }
}

impl Output for HumanOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        debug!(message, "Outputting success");
        self.tagged("[OK]", &self.palette.success, message);
    }

    #[instrument(skip(self))]
    fn error(&self, error: &ThemeError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!(
            "{} {}",
            self.palette.error.clone().bold().apply_to("[ERR]"),
            console::style(error).bold()
        );
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            eprintln!(
                "  {} {}",
                self.palette.label.apply_to("Suggestion:"),
                self.palette.muted.apply_to(suggestion)
            );
        }
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        debug!(message, "Outputting warning");
        self.tagged("[WARN]", &self.palette.warning, message);
    }

    #[instrument(skip(self))]
    fn info(&self, message: &str) {
        debug!(message, "Outputting info");
        self.tagged("[INFO]", &self.palette.accent, message);
    }

    #[instrument(skip_all, fields(elements = theme.element_count()))]
    fn theme(&self, theme: &Theme) {
        debug!("Outputting parsed theme");
        let title = if theme.name.is_empty() { "(unnamed)" } else { theme.name.as_str() };
        self.header(title);
        self.field("Size", format!("{}x{}", theme.width, theme.height));
        self.field("Images", theme.images.len() + theme.animated_images.len());
        self.field("Texts", theme.texts.len());
        self.field("Bars", theme.bars.len());

        for image in &theme.images {
            println!(
                "    {} at {},{}",
                self.palette.path.apply_to(&image.file_name),
                image.x,
                image.y
            );
        }
        for text in &theme.texts {
            let label = if text.data_binding_key.is_empty() {
                "static"
            } else {
                text.data_binding_key.as_str()
            };
            println!(
                "    {} {} at {},{} z{} {}px {}",
                self.palette.label.apply_to("Text"),
                self.palette.widget_name.apply_to(label),
                text.x,
                text.y,
                text.z,
                text.font_size_pixels,
                text.foreground_color
            );
        }
        for bar in &theme.bars {
            println!(
                "    {} {} at {},{} z{} {}x{} {}",
                self.palette.label.apply_to(bar.directive()),
                self.palette.widget_name.apply_to(&bar.data_binding_key),
                bar.x,
                bar.y,
                bar.z,
                bar.max_width_pixels,
                bar.max_height_pixels,
                bar.fill_color
            );
        }
    }

    fn description(&self, text: &str) {
        print!("{text}");
    }

    #[instrument(skip_all, fields(messages = report.len()))]
    fn validation(&self, report: &ValidationReport) {
        debug!("Outputting validation report");
        for message in report.iter() {
            let (tag, style) = self.palette.severity(message.severity);
            self.tagged(tag, style, &message.message);
        }
    }

    #[instrument(skip_all, fields(name = %scheme.name))]
    fn scheme(&self, scheme: &VendorScheme) {
        debug!("Outputting scheme");
        match serde_json::to_string_pretty(scheme) {
            Ok(json) => println!("{json}"),
            Err(e) => self.warning(&format!("Could not render scheme: {e}")),
        }
    }

    #[instrument(skip_all, fields(count = entries.len()))]
    fn catalog(&self, entries: &[SchemeEntry]) {
        debug!("Outputting scheme catalog");
        if entries.is_empty() {
            self.warning("No schemes found");
            return;
        }
        self.header("Schemes:");
        for entry in entries {
            println!(
                "  {:<24} {:>9}  type {}{}",
                self.palette.widget_name.apply_to(&entry.name),
                entry.resolution(),
                entry.theme_type.scheme_code(),
                if entry.has_thumbnail { "  [thumb]" } else { "" }
            );
        }
    }

    #[instrument(skip_all, fields(files = report.files.len()))]
    fn exported(&self, report: &ExportReport) {
        self.success(&format!(
            "Exported {} files to {}",
            report.files.len(),
            report.folder.display()
        ));
        self.field("Scheme", report.scheme_path.display());
    }

    #[instrument(skip_all, fields(archive = %archive.display()))]
    fn packed(&self, manifest: &ThemeManifest, archive: &Path) {
        self.success(&format!("Packed '{}' into {}", manifest.name, archive.display()));
        self.field("Resolution", &manifest.resolution);
        if manifest.animated {
            self.field("Frames", manifest.frame_count);
        }
    }

    #[instrument(skip_all, fields(dest = %dest.display(), count = files.len()))]
    fn unpacked(&self, dest: &Path, files: &[PathBuf]) {
        self.success(&format!("Extracted {} files to {}", files.len(), dest.display()));
    }

    #[instrument(skip_all, fields(name = %manifest.name))]
    fn manifest(&self, manifest: &ThemeManifest) {
        debug!("Outputting manifest");
        self.header(&manifest.name);
        self.field("Version", &manifest.version);
        self.field("Author", &manifest.author);
        self.field("Resolution", &manifest.resolution);
        self.field("Animated", manifest.animated);
        if manifest.animated {
            self.field("Frames", manifest.frame_count);
        }
        self.field("Source", &manifest.source);
        self.field("Created", &manifest.created);
        if !manifest.description.is_empty() {
            self.field("Description", &manifest.description);
        }
    }

    #[instrument(skip_all, fields(passed = check.passed))]
    fn archive_check(&self, archive: &Path, check: &ArchiveCheck) {
        for issue in &check.issues {
            let message = format!("{}: {}", issue.entry, issue.message);
            if issue.fatal {
                self.tagged("[ERR]", &self.palette.error, &message);
            } else {
                self.warning(&message);
            }
        }
        if check.passed {
            self.success(&format!("{} is a valid theme archive", archive.display()));
        }
    }

    fn contents(&self, entries: &[String]) {
        for entry in entries {
            println!("  {entry}");
        }
    }

    #[instrument(skip_all)]
    fn config(&self, config: &AppConfig, path: Option<&Path>) {
        self.header("Configuration");
        match path {
            Some(path) => self.field("File", path.display()),
            None => self.field("File", "(defaults)"),
        }
        self.field("Author", &config.author);
        self.field("Version", &config.version);
        self.field("Preview", format!("{}px", config.preview_width));
        self.field("Line ending", config.line_ending.as_str().escape_default());
        if !config.extra_fonts.is_empty() {
            self.field("Fonts", config.extra_fonts.join(", "));
        }
    }

    #[instrument(skip(self))]
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        debug!(version, ?git_sha, ?build_time, "Outputting version info");
        self.header("ltk");
        self.field("Version", version);
        if let Some(sha) = git_sha {
            let dirty = matches!(option_env!("VERGEN_GIT_DIRTY"), Some("true"));
            let suffix = if dirty { " (dirty)" } else { "" };
            self.field("Git SHA", format!("{sha}{suffix}"));
        }
        if let Some(time) = build_time {
            self.field("Built", time);
        }
        if let Some(rustc) = option_env!("VERGEN_RUSTC_SEMVER") {
            self.field("Rust", rustc);
        }
        if let Some(target) = option_env!("VERGEN_CARGO_TARGET_TRIPLE") {
            self.field("Target", target);
        }
    }
}
