//! Editable widget-layout project, plus loading and saving project files.
//!
//! Project files are JSON with camelCase field names (`.smtproj`), compatible
//! with the files written by the desktop editor. YAML and TOML are accepted on
//! load for hand-written projects.

use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument};

use crate::config::{resolve_path, ConfigFormat};
use crate::error::{Result, ThemeError};

use super::theme::Orientation;

/// Extension appended to saved projects that have none.
pub const PROJECT_EXTENSION: &str = "smtproj";

/// A theme being edited: canvas, background and an ordered widget list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLayoutProject {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "Utc::now", deserialize_with = "lenient_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "lenient_datetime")]
    pub modified_at: DateTime<Utc>,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(flatten)]
    pub background: BackgroundRef,
    #[serde(default)]
    pub widgets: Vec<ProjectWidget>,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_theme_name() -> String {
    "NuevoTema".to_string()
}

const fn default_width() -> i32 {
    360
}

const fn default_height() -> i32 {
    960
}

impl Default for WidgetLayoutProject {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            version: default_version(),
            created_at: now,
            modified_at: now,
            theme_name: default_theme_name(),
            width: default_width(),
            height: default_height(),
            background: BackgroundRef::default(),
            widgets: Vec::new(),
        }
    }
}

impl WidgetLayoutProject {
    /// Create an empty project with the given canvas.
    pub fn new(theme_name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            theme_name: theme_name.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the background path.
    pub fn with_background(mut self, path: impl Into<String>) -> Self {
        self.background.background_path = Some(path.into());
        self
    }

    /// Append a widget.
    pub fn with_widget(mut self, widget: ProjectWidget) -> Self {
        self.widgets.push(widget);
        self
    }
}

/// Where the theme background comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_path: Option<String>,
    pub is_video_background: bool,
    pub background_embedded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_base64: Option<String>,
}

impl BackgroundRef {
    /// The background path, if set and non-empty.
    pub fn path(&self) -> Option<&str> {
        self.background_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }

    /// Final component of the path. Both `/` and `\` count as separators
    /// since project files travel between Windows and other systems.
    pub fn file_name(&self) -> Option<&str> {
        self.path()
            .and_then(|p| p.rsplit(['/', '\\']).next())
            .filter(|name| !name.is_empty())
    }

    /// Lowercased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        self.file_name()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Decode the embedded base64 payload, if the project carries one.
    pub fn decode_embedded(&self) -> Result<Option<Vec<u8>>> {
        let Some(payload) = self
            .background_base64
            .as_deref()
            .filter(|_| self.background_embedded)
        else {
            return Ok(None);
        };

        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map(Some)
            .map_err(|e| ThemeError::InvalidFormat(format!("Embedded background is not base64: {e}")))
    }
}

/// Discriminator for the four widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    Text,
    BorderLine,
    DefaultLine,
    GridLine,
}

impl WidgetKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::BorderLine => "BorderLine",
            Self::DefaultLine => "DefaultLine",
            Self::GridLine => "GridLine",
        }
    }
}

/// One widget in a project: common placement and binding plus a kind-specific body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWidget {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub z: i32,
    #[serde(flatten)]
    pub body: WidgetBody,
}

impl ProjectWidget {
    /// New widget at the origin with no data binding.
    pub fn new(name: impl Into<String>, body: WidgetBody) -> Self {
        Self {
            name: name.into(),
            data_type: String::new(),
            unit: String::new(),
            x: 0,
            y: 0,
            z: 0,
            body,
        }
    }

    pub fn at(mut self, x: i32, y: i32, z: i32) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn bound_to(mut self, data_type: impl Into<String>, unit: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self.unit = unit.into();
        self
    }

    pub const fn kind(&self) -> WidgetKind {
        self.body.kind()
    }
}

/// Kind-specific widget fields. Each variant carries only what applies to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WidgetBody {
    Text(TextBody),
    BorderLine(BorderLineBody),
    DefaultLine(BarBody),
    GridLine(GridLineBody),
}

impl WidgetBody {
    pub const fn kind(&self) -> WidgetKind {
        match self {
            Self::Text(_) => WidgetKind::Text,
            Self::BorderLine(_) => WidgetKind::BorderLine,
            Self::DefaultLine(_) => WidgetKind::DefaultLine,
            Self::GridLine(_) => WidgetKind::GridLine,
        }
    }

    /// Bar dimensions and fill, for the three bar kinds.
    pub fn bar(&self) -> Option<BarBody> {
        match self {
            Self::Text(_) => None,
            Self::BorderLine(b) => Some(BarBody {
                bar_width: b.bar_width,
                bar_height: b.bar_height,
                fill: b.fill.clone(),
            }),
            Self::DefaultLine(b) => Some(b.clone()),
            Self::GridLine(g) => Some(BarBody {
                bar_width: g.bar_width,
                bar_height: g.bar_height,
                fill: g.fill.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBody {
    pub font_size: i32,
    pub font_family: String,
    pub color: String,
    /// Maximum text box width; 0 disables the clamp.
    pub width: i32,
    /// Maximum text box height; 0 disables the clamp.
    pub height: i32,
}

impl Default for TextBody {
    fn default() -> Self {
        Self {
            font_size: 24,
            font_family: "Impact".to_string(),
            color: "#FFFFFF".to_string(),
            width: 100,
            height: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarBody {
    pub bar_width: i32,
    pub bar_height: i32,
    pub fill: String,
}

impl Default for BarBody {
    fn default() -> Self {
        Self {
            bar_width: 100,
            bar_height: 10,
            fill: "#00FF00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderLineBody {
    pub bar_width: i32,
    pub bar_height: i32,
    pub fill: String,
    pub max_num: i32,
    pub corner_radius: i32,
    pub back_color: String,
}

impl Default for BorderLineBody {
    fn default() -> Self {
        let bar = BarBody::default();
        Self {
            bar_width: bar.bar_width,
            bar_height: bar.bar_height,
            fill: bar.fill,
            max_num: 100,
            corner_radius: 5,
            back_color: DEFAULT_BACK_COLOR.to_string(),
        }
    }
}

/// Track color the vendor software draws when `BackColor` is omitted.
pub const DEFAULT_BACK_COLOR: &str = "#333333";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridLineBody {
    pub bar_width: i32,
    pub bar_height: i32,
    pub fill: String,
    pub margin: i32,
    pub max_count: i32,
    pub orientation: Orientation,
}

impl Default for GridLineBody {
    fn default() -> Self {
        let bar = BarBody::default();
        Self {
            bar_width: bar.bar_width,
            bar_height: bar.bar_height,
            fill: bar.fill,
            margin: 5,
            max_count: 10,
            orientation: Orientation::Horizontal,
        }
    }
}

/// Accept RFC 3339 timestamps with or without an offset (naive ones are taken as UTC).
fn lenient_datetime<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Load a project file, detecting the format from its extension.
///
/// A relative background path is resolved against the project file's directory.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_project<P: AsRef<Path>>(path: P) -> Result<WidgetLayoutProject> {
    let path = path.as_ref();
    info!("Loading project file");

    let format = ConfigFormat::from_extension(path).unwrap_or(ConfigFormat::Json);
    debug!(format = ?format, "Detected project format");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ThemeError::not_found(path)
        } else {
            ThemeError::Io(e)
        }
    })?;

    let mut project: WidgetLayoutProject = format.deserialize(&content).map_err(|e| {
        ThemeError::InvalidFormat(format!("Invalid project {}: {e}", path.display()))
    })?;

    if let (Some(bg), Some(dir)) = (project.background.path(), path.parent()) {
        if !bg.contains(crate::scheme::PLACEHOLDER_TOKEN) {
            let resolved = resolve_path(Path::new(bg), dir)?;
            debug!(background = %resolved.display(), "Resolved background path");
            project.background.background_path = Some(resolved.display().to_string());
        }
    }

    info!(
        theme = %project.theme_name,
        widgets = project.widgets.len(),
        "Project loaded"
    );
    Ok(project)
}

/// Save a project as indented JSON, appending `.smtproj` when the path has no extension.
///
/// Updates `modified_at` and returns the path actually written.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_project<P: AsRef<Path>>(project: &mut WidgetLayoutProject, path: P) -> Result<PathBuf> {
    let mut path = path.as_ref().to_path_buf();
    if path.extension().is_none() {
        path.set_extension(PROJECT_EXTENSION);
    }

    project.modified_at = Utc::now();
    let json = serde_json::to_string_pretty(project)?;
    std::fs::write(&path, json)?;

    info!(path = %path.display(), "Project saved");
    Ok(path)
}
