//! Validation of widget-layout projects.
//!
//! Validation never fails: problems are collected as [`ValidationMessage`]s and
//! callers decide which severities block a save.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::description::is_valid_hex_color;
use crate::model::{WidgetBody, WidgetLayoutProject};

/// Fonts the vendor software ships with or that themes commonly bundle.
pub const KNOWN_FONTS: &[&str] = &[
    "Impact",
    "Consolas",
    "Arial",
    "Tahoma",
    "Verdana",
    "Segoe UI",
    "Comic Sans MS",
    "Courier New",
    "Times New Roman",
    "Georgia",
    "Trebuchet MS",
    "Lucida Console",
    "Palatino Linotype",
    "Microsoft YaHei",
    "SimHei",
    "KaiTi",
    "FangSong",
    "Orbitron",
    "Rajdhani",
    "Russo One",
    "Bebas Neue",
];

/// Smallest and largest font size accepted without a warning.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<i32> = 6..=200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub message: String,
}

/// Ordered list of validation findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub messages: Vec<ValidationMessage>,
}

impl ValidationReport {
    fn push(&mut self, severity: Severity, message: String) {
        self.messages.push(ValidationMessage { severity, message });
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Messages of one severity, in report order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(move |m| m.severity == severity)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Project validator. Holds the accepted font list.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    extra_fonts: Vec<String>,
}

impl Validator {
    pub const fn new() -> Self {
        Self {
            extra_fonts: Vec::new(),
        }
    }

    /// Accept additional font families.
    pub fn with_extra_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_fonts.extend(fonts.into_iter().map(Into::into));
        self
    }

    fn is_known_font(&self, family: &str) -> bool {
        KNOWN_FONTS.contains(&family) || self.extra_fonts.iter().any(|f| f == family)
    }

    /// Check a project. Rules accumulate; a clean project yields one success message.
    #[instrument(skip_all, fields(theme = %project.theme_name, widgets = project.widgets.len()))]
    pub fn validate(&self, project: &WidgetLayoutProject) -> ValidationReport {
        let mut report = ValidationReport::default();

        if project.width <= 0 || project.height <= 0 {
            report.push(
                Severity::Error,
                format!("Invalid dimensions: {}x{}", project.width, project.height),
            );
        }

        if let Some(path) = project.background.path() {
            let embedded = project.background.background_embedded
                && project.background.background_base64.is_some();
            if !embedded && std::fs::File::open(path).is_err() {
                report.push(
                    Severity::Warning,
                    format!(
                        "Background image not found: {}",
                        project.background.file_name().unwrap_or(path)
                    ),
                );
            }
        }

        for widget in &project.widgets {
            let name = &widget.name;

            if widget.x < 0 || widget.x >= project.width {
                report.push(
                    Severity::Warning,
                    format!(
                        "Widget '{name}' out of bounds on X: {} (max: {})",
                        widget.x, project.width
                    ),
                );
            }
            if widget.y < 0 || widget.y >= project.height {
                report.push(
                    Severity::Warning,
                    format!(
                        "Widget '{name}' out of bounds on Y: {} (max: {})",
                        widget.y, project.height
                    ),
                );
            }

            match &widget.body {
                WidgetBody::Text(text) => {
                    if !self.is_known_font(&text.font_family) {
                        report.push(
                            Severity::Info,
                            format!(
                                "Font '{}' is not in the list of known fonts",
                                text.font_family
                            ),
                        );
                    }
                    if !FONT_SIZE_RANGE.contains(&text.font_size) {
                        report.push(
                            Severity::Warning,
                            format!("Unusual font size in '{name}': {}px", text.font_size),
                        );
                    }
                    if !is_valid_hex_color(&text.color) {
                        report.push(
                            Severity::Error,
                            format!("Invalid color in '{name}': {}", text.color),
                        );
                    }
                }
                body => {
                    if let Some(bar) = body.bar() {
                        if !is_valid_hex_color(&bar.fill) {
                            report.push(
                                Severity::Error,
                                format!("Invalid fill color in '{name}': {}", bar.fill),
                            );
                        }
                    }
                }
            }

            if widget.data_type.is_empty() && !matches!(widget.body, WidgetBody::DefaultLine(_)) {
                report.push(
                    Severity::Warning,
                    format!("Widget '{name}' has no data binding"),
                );
            }
        }

        if report.is_empty() {
            report.push(
                Severity::Success,
                format!(
                    "Theme is valid: {} widgets, no issues",
                    project.widgets.len()
                ),
            );
        }

        debug!(
            errors = report.count(Severity::Error),
            warnings = report.count(Severity::Warning),
            "Validation finished"
        );
        report
    }
}

/// Validate with the built-in font list.
pub fn validate_project(project: &WidgetLayoutProject) -> ValidationReport {
    Validator::new().validate(project)
}
