//! Vendor JSON scheme files.
//!
//! Field names and order are fixed by the vendor's control application, so
//! every struct here serializes with explicit PascalCase names in declaration
//! order.
//!
//! Overlay text is always written white (`"255, 255, 255"`), whatever the
//! widget color.

mod catalog;

pub use catalog::{list_schemes, load_theme, SchemeEntry};

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{ThemeType, WidgetBody, WidgetLayoutProject};

/// Marker the installer replaces with the vendor program directory.
pub const PLACEHOLDER_TOKEN: &str = "{PROGRAMME_PATH}";

/// Canvas size the vendor firmware expects for overlay-on-animation schemes.
pub const LEGACY_OVERLAY_WIDTH: i32 = 320;
pub const LEGACY_OVERLAY_HEIGHT: i32 = 240;

/// Data binding used for text overlays without one.
pub const DEFAULT_TEXT_TYPE: &str = "CPUTemp";

const DEFAULT_FONT_NAME: &str = "Segoe UI";
/// `Color` of every overlay text.
pub const OVERLAY_TEXT_COLOR: &str = "255, 255, 255";

/// How the vendor application treats a background file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Played from `BackgroundVideoFile`.
    Video,
    /// Shown through a `DisplayImages` entry.
    Image,
}

impl MediaKind {
    /// Classify a lowercase extension without the dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "mp4" | "avi" | "webm" | "mov" => Some(Self::Video),
            "gif" | "png" | "jpg" | "jpeg" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Top-level scheme object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VendorScheme {
    #[serde(rename = "Type")]
    pub scheme_type: u8,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub fill_mode: i32,
    pub crop_area: String,
    pub thumbnail_image_data: Option<String>,
    pub display_direction: i32,
    pub font_direction: i32,
    pub background_image: Option<String>,
    pub background_video_file: Option<String>,
    pub display_texts: Option<Vec<DisplayText>>,
    pub display_images: Vec<DisplayImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayText {
    pub id: String,
    pub left: i32,
    pub top: i32,
    pub z_index: i32,
    pub text_type: String,
    pub text: String,
    pub color: String,
    pub font_name: String,
    pub font_size: i32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub title_visibility: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayImage {
    pub left: i32,
    pub top: i32,
    pub z_index: i32,
    pub image_file_name: Option<String>,
    pub image: String,
    pub width: i32,
    pub height: i32,
}

/// Map a project into a scheme.
///
/// `SettingDescription` schemes carry only the canvas; the layout lives in the
/// paired description file. `GifSimple` schemes turn text widgets into
/// `DisplayTexts` (bars have no counterpart) and always use the legacy 320x240 canvas.
#[instrument(skip_all, fields(theme = %project.theme_name, theme_type = ?theme_type))]
pub fn build_scheme(project: &WidgetLayoutProject, theme_type: ThemeType) -> VendorScheme {
    let mut scheme = VendorScheme {
        scheme_type: theme_type.scheme_code(),
        name: project.theme_name.clone(),
        width: project.width,
        height: project.height,
        fill_mode: 0,
        crop_area: "0, 0, 0, 0".to_string(),
        thumbnail_image_data: None,
        display_direction: 0,
        font_direction: 0,
        background_image: None,
        background_video_file: None,
        display_texts: None,
        display_images: Vec::new(),
    };

    if theme_type == ThemeType::SettingDescription {
        return scheme;
    }

    scheme.width = LEGACY_OVERLAY_WIDTH;
    scheme.height = LEGACY_OVERLAY_HEIGHT;
    scheme.display_texts = Some(display_texts(project));

    if let Some(placeholder) = background_placeholder(project) {
        let kind = project
            .background
            .extension()
            .as_deref()
            .and_then(MediaKind::from_extension);
        match kind {
            Some(MediaKind::Video) => scheme.background_video_file = Some(placeholder),
            Some(MediaKind::Image) => scheme.display_images.push(DisplayImage {
                left: 0,
                top: 0,
                z_index: 0,
                image_file_name: None,
                image: placeholder,
                width: project.width,
                height: project.height,
            }),
            None => debug!("Background extension not usable in a scheme, skipping"),
        }
    }

    scheme
}

fn display_texts(project: &WidgetLayoutProject) -> Vec<DisplayText> {
    project
        .widgets
        .iter()
        .filter_map(|widget| match &widget.body {
            WidgetBody::Text(text) => Some((widget, text)),
            _ => None,
        })
        .zip(0..)
        .map(|((widget, text), z_index)| DisplayText {
            id: Uuid::new_v4().to_string(),
            left: widget.x,
            top: widget.y,
            z_index,
            text_type: if widget.data_type.is_empty() {
                DEFAULT_TEXT_TYPE.to_string()
            } else {
                widget.data_type.clone()
            },
            text: if widget.unit.is_empty() {
                widget.name.clone()
            } else {
                format!("00{}", widget.unit)
            },
            color: OVERLAY_TEXT_COLOR.to_string(),
            font_name: if text.font_family.is_empty() {
                DEFAULT_FONT_NAME.to_string()
            } else {
                text.font_family.clone()
            },
            font_size: text.font_size,
            bold: true,
            italic: false,
            underline: false,
            title_visibility: false,
        })
        .collect()
}

/// Installer-relative path of the background.
///
/// A path that already contains [`PLACEHOLDER_TOKEN`] is kept verbatim.
fn background_placeholder(project: &WidgetLayoutProject) -> Option<String> {
    let path = project.background.path()?;
    if path.contains(PLACEHOLDER_TOKEN) {
        return Some(path.to_string());
    }
    let file_name = project.background.file_name()?;
    Some(format!(
        "{PLACEHOLDER_TOKEN}\\{}\\{file_name}",
        project.theme_name
    ))
}

/// Scheme as indented JSON.
pub fn scheme_json(project: &WidgetLayoutProject, theme_type: ThemeType) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build_scheme(project, theme_type))?)
}

/// Build a scheme and write it to `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_scheme<P: AsRef<Path>>(
    project: &WidgetLayoutProject,
    theme_type: ThemeType,
    path: P,
) -> Result<()> {
    let json = scheme_json(project, theme_type)?;
    std::fs::write(path.as_ref(), json)?;
    info!("Scheme written");
    Ok(())
}
