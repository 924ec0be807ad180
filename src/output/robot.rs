//! Robot mode JSON output implementation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument, trace};

use crate::archive::{ArchiveCheck, ThemeManifest};
use crate::config::AppConfig;
use crate::error::ThemeError;
use crate::export::ExportReport;
use crate::model::Theme;
use crate::scheme::{SchemeEntry, VendorScheme};
use crate::validate::{Severity, ValidationReport};

use super::{Output, RobotFormat};

/// JSON output implementation for agents and scripting.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> String {
        let rendered = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        rendered.unwrap_or_else(|e| json!({ "error": true, "message": e.to_string() }).to_string())
    }

    /// Output any serializable data as JSON to stdout.
    #[instrument(skip(self, data), fields(format = ?self.format))]
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = self.render(data);
        trace!(json_len = json.len(), "JSON serialized");
        println!("{json}");
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        debug!(message, "Robot: success");
        self.output_json(&json!({ "success": true, "message": message }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &ThemeError) {
        debug!(error = %error, "Robot: error");
        let body = json!({
            "error": true,
            "kind": error.kind(),
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", self.render(&body));
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        debug!(message, "Robot: warning");
        self.output_json(&json!({ "warning": true, "message": message }));
    }

    #[instrument(skip(self))]
    fn info(&self, message: &str) {
        debug!(message, "Robot: info");
        self.output_json(&json!({ "info": true, "message": message }));
    }

    fn theme(&self, theme: &Theme) {
        debug!("Robot: theme");
        self.output_json(theme);
    }

    fn description(&self, text: &str) {
        self.output_json(&json!({ "description": text }));
    }

    #[instrument(skip_all, fields(messages = report.len()))]
    fn validation(&self, report: &ValidationReport) {
        debug!("Robot: validation");
        self.output_json(&json!({
            "valid": !report.has_errors(),
            "messages": report.messages,
            "summary": {
                "errors": report.count(Severity::Error),
                "warnings": report.count(Severity::Warning),
                "info": report.count(Severity::Info),
            }
        }));
    }

    fn scheme(&self, scheme: &VendorScheme) {
        debug!("Robot: scheme");
        self.output_json(scheme);
    }

    fn catalog(&self, entries: &[SchemeEntry]) {
        debug!(count = entries.len(), "Robot: catalog");
        self.output_json(entries);
    }

    fn exported(&self, report: &ExportReport) {
        debug!("Robot: exported");
        self.output_json(&json!({ "ok": true, "export": report }));
    }

    fn packed(&self, manifest: &ThemeManifest, archive: &Path) {
        debug!("Robot: packed");
        self.output_json(&json!({
            "ok": true,
            "archive": archive.display().to_string(),
            "manifest": manifest,
        }));
    }

    fn unpacked(&self, dest: &Path, files: &[PathBuf]) {
        debug!("Robot: unpacked");
        self.output_json(&json!({
            "ok": true,
            "destination": dest.display().to_string(),
            "files": files,
        }));
    }

    fn manifest(&self, manifest: &ThemeManifest) {
        debug!("Robot: manifest");
        self.output_json(manifest);
    }

    fn archive_check(&self, archive: &Path, check: &ArchiveCheck) {
        debug!(passed = check.passed, "Robot: archive_check");
        self.output_json(&json!({
            "archive": archive.display().to_string(),
            "passed": check.passed,
            "issues": check.issues,
        }));
    }

    fn contents(&self, entries: &[String]) {
        self.output_json(entries);
    }

    fn config(&self, config: &AppConfig, path: Option<&Path>) {
        self.output_json(&json!({
            "path": path.map(|p| p.display().to_string()),
            "config": config,
        }));
    }

    #[instrument(skip(self))]
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        debug!(version, ?git_sha, ?build_time, "Robot: version_info");
        self.output_json(&json!({
            "version": version,
            "git_sha": git_sha,
            "build_time": build_time,
            "rustc": option_env!("VERGEN_RUSTC_SEMVER"),
            "target": option_env!("VERGEN_CARGO_TARGET_TRIPLE"),
        }));
    }
}
