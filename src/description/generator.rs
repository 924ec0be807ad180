//! Serializes a widget-layout project back into description text.
//!
//! The generator emits a subset of what the parser reads: optional fields such
//! as `Opacity`, `Title` or `BorderThicknes` are never written.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::color::normalize_or_default;
use crate::error::Result;
use crate::model::{ProjectWidget, WidgetBody, WidgetLayoutProject, DEFAULT_BACK_COLOR};

/// Z value of the implicit background image line. Keeps it behind every widget.
pub const BACKGROUND_Z_SENTINEL: i32 = -100;

/// Line terminator used in generated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n`, what the vendor software writes.
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Options for [`generate_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub line_ending: LineEnding,
}

/// Generate description text with default options (CRLF line endings).
pub fn generate(project: &WidgetLayoutProject) -> String {
    generate_with(project, GenerateOptions::default())
}

/// Generate description text.
///
/// Widgets are stable-sorted by `z`, so equal values keep their list order.
#[instrument(skip_all, fields(theme = %project.theme_name, widgets = project.widgets.len()))]
pub fn generate_with(project: &WidgetLayoutProject, options: GenerateOptions) -> String {
    let mut out = Lines::new(options.line_ending);

    out.line(&format!("name:{}", project.theme_name));
    out.line(&format!("width:{}", project.width));
    out.line(&format!("height:{}", project.height));
    out.blank();

    if let Some(file_name) = project.background.file_name() {
        out.line("# Background");
        out.line(&format!("{file_name}:x@0,y@0,z@{BACKGROUND_Z_SENTINEL}"));
        out.blank();
    }

    let mut sorted: Vec<&ProjectWidget> = project.widgets.iter().collect();
    sorted.sort_by_key(|w| w.z);

    let (texts, bars): (Vec<&ProjectWidget>, Vec<&ProjectWidget>) = sorted
        .into_iter()
        .partition(|w| matches!(w.body, WidgetBody::Text(_)));

    if !texts.is_empty() {
        out.line("# Text Widgets");
        for widget in &texts {
            out.line(&widget_line(widget));
        }
        out.blank();
    }

    if !bars.is_empty() {
        out.line("# Bar Widgets");
        for widget in &bars {
            out.line(&widget_line(widget));
        }
        out.blank();
    }

    debug!(texts = texts.len(), bars = bars.len(), "Generated description");
    out.finish()
}

/// Generate and write a description file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_description<P: AsRef<Path>>(
    project: &WidgetLayoutProject,
    path: P,
    options: GenerateOptions,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_with(project, options))?;
    info!("Description file written");
    Ok(())
}

/// The single directive line for one widget.
pub fn widget_line(widget: &ProjectWidget) -> String {
    let mut parts = vec![
        format!("x@{}", widget.x),
        format!("y@{}", widget.y),
        format!("z@{}", widget.z),
    ];

    match &widget.body {
        WidgetBody::Text(text) => {
            parts.push(format!("FontSize@{}", text.font_size));
            parts.push(format!("FontFamily@{}", text.font_family));
            parts.push(format!("Foreground@{}", normalize_or_default(&text.color)));
            push_data(&mut parts, widget);
            if !widget.unit.is_empty() {
                parts.push(format!("unit@{}", widget.unit));
            }
            if text.width > 0 {
                parts.push(format!("maxwidth@{}", text.width));
            }
            if text.height > 0 {
                parts.push(format!("maxheight@{}", text.height));
            }
        }
        WidgetBody::BorderLine(bar) => {
            push_bar(&mut parts, bar.bar_width, bar.bar_height, &bar.fill);
            push_data(&mut parts, widget);
            parts.push(format!("MaxNum@{}", bar.max_num));
            parts.push(format!("CornerRadius@{}", bar.corner_radius));
            if !bar.back_color.is_empty() && bar.back_color != DEFAULT_BACK_COLOR {
                parts.push(format!("BackColor@{}", normalize_or_default(&bar.back_color)));
            }
        }
        WidgetBody::DefaultLine(bar) => {
            push_bar(&mut parts, bar.bar_width, bar.bar_height, &bar.fill);
            push_data(&mut parts, widget);
        }
        WidgetBody::GridLine(bar) => {
            push_bar(&mut parts, bar.bar_width, bar.bar_height, &bar.fill);
            push_data(&mut parts, widget);
        }
    }

    format!("{}:{}", widget.kind().as_str(), parts.join(","))
}

fn push_bar(parts: &mut Vec<String>, width: i32, height: i32, fill: &str) {
    parts.push(format!("maxwidth@{width}"));
    parts.push(format!("maxheight@{height}"));
    parts.push(format!("Fill@{}", normalize_or_default(fill)));
}

fn push_data(parts: &mut Vec<String>, widget: &ProjectWidget) {
    if !widget.data_type.is_empty() {
        parts.push(format!("data@{}", widget.data_type));
    }
}

struct Lines {
    buf: String,
    eol: &'static str,
}

impl Lines {
    const fn new(ending: LineEnding) -> Self {
        Self {
            buf: String::new(),
            eol: ending.as_str(),
        }
    }

    fn line(&mut self, text: &str) {
        let _ = write!(self.buf, "{text}{}", self.eol);
    }

    fn blank(&mut self) {
        self.buf.push_str(self.eol);
    }

    fn finish(self) -> String {
        self.buf
    }
}
