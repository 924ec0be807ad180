//! Parsed theme snapshot, as read from a description file or a scheme JSON.

use serde::Serialize;

/// Canvas size assumed when a description omits its `width:`/`height:` header.
pub const DEFAULT_WIDTH: u32 = 360;
pub const DEFAULT_HEIGHT: u32 = 960;

/// How the theme's visuals are defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ThemeType {
    /// Animation with a few text overlays, described only by the scheme JSON.
    GifSimple,
    /// Full layout described by a description file.
    #[default]
    SettingDescription,
}

impl ThemeType {
    /// Numeric discriminator used by the vendor scheme's `Type` field.
    pub const fn scheme_code(self) -> u8 {
        match self {
            Self::GifSimple => 0,
            Self::SettingDescription => 1,
        }
    }

    pub const fn from_scheme_code(code: i64) -> Self {
        if code == 1 {
            Self::SettingDescription
        } else {
            Self::GifSimple
        }
    }
}

/// Root result of parsing a description file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    pub images: Vec<ImagePlacement>,
    pub animated_images: Vec<AnimatedImagePlacement>,
    pub texts: Vec<TextWidget>,
    pub bars: Vec<BarWidget>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            theme_type: ThemeType::SettingDescription,
            images: Vec::new(),
            animated_images: Vec::new(),
            texts: Vec::new(),
            bars: Vec::new(),
        }
    }
}

impl Theme {
    /// Total number of placed elements of any kind.
    pub fn element_count(&self) -> usize {
        self.images.len() + self.animated_images.len() + self.texts.len() + self.bars.len()
    }
}

/// A static raster placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePlacement {
    pub file_name: String,
    pub x: f64,
    pub y: f64,
    pub z: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
}

/// A GIF placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedImagePlacement {
    #[serde(flatten)]
    pub placement: ImagePlacement,
    /// Sits behind every other layer regardless of `z`.
    pub is_background: bool,
}

/// Text bound to a sensor metric, or a static label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextWidget {
    pub x: f64,
    pub y: f64,
    pub z: i32,
    pub font_size_pixels: i32,
    pub font_family: String,
    pub foreground_color: String,
    pub data_binding_key: String,
    pub unit: String,
    pub opacity: f64,
    pub is_static_label: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<i32>,
}

/// Progress or indicator bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarWidget {
    pub x: f64,
    pub y: f64,
    pub z: i32,
    pub max_width_pixels: i32,
    pub max_height_pixels: i32,
    pub fill_color: String,
    pub data_binding_key: String,
    pub kind: BarKind,
}

impl BarWidget {
    /// Directive name used in the description format.
    pub const fn directive(&self) -> &'static str {
        self.kind.directive()
    }
}

/// Kind-specific bar data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum BarKind {
    /// Dynamic outlined bar whose length follows the bound value.
    BorderLine(BorderLineStyle),
    /// Static background bar.
    DefaultLine,
    /// Segmented bar.
    GridLine(GridLineStyle),
}

impl BarKind {
    pub const fn directive(&self) -> &'static str {
        match self {
            Self::BorderLine(_) => "BorderLine",
            Self::DefaultLine => "DefaultLine",
            Self::GridLine(_) => "GridLine",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderLineStyle {
    /// Raw value; may encode several corner radii.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<String>,
    pub max_value: i32,
    pub opacity: f64,
    pub border_thickness_pixels: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLineStyle {
    pub margin: i32,
    pub max_segment_count: i32,
    pub orientation: Orientation,
}

/// Direction in which a segmented bar grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Lenient parse; anything other than `vertical` (any case) is horizontal.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("vertical") {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }
}
