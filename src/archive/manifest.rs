//! Archive metadata record (`manifest.json`).

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Provenance tag for themes built with this tool.
pub const SOURCE_CUSTOM: &str = "custom";
/// Provenance tag for bundles that carry a `theme.yaml`.
pub const SOURCE_PYTHON: &str = "python";

/// Metadata describing an archive's contents.
///
/// Written in camelCase. PascalCase names from older bundles are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeManifest {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default = "default_version", alias = "Version")]
    pub version: String,
    #[serde(default = "default_author", alias = "Author")]
    pub author: String,
    /// `WxH` of the packed background. Always measured at pack time.
    #[serde(default, alias = "Resolution")]
    pub resolution: String,
    #[serde(default, alias = "Animated")]
    pub animated: bool,
    #[serde(default, alias = "FrameCount")]
    pub frame_count: u32,
    #[serde(default = "default_source", alias = "Source")]
    pub source: String,
    /// `yyyy-MM-dd`
    #[serde(default = "today", alias = "Created")]
    pub created: String,
    #[serde(default, alias = "Description")]
    pub description: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_author() -> String {
    "SnakeMars".to_string()
}

fn default_source() -> String {
    SOURCE_CUSTOM.to_string()
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

impl Default for ThemeManifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: default_version(),
            author: default_author(),
            resolution: String::new(),
            animated: false,
            frame_count: 0,
            source: default_source(),
            created: today(),
            description: String::new(),
        }
    }
}

impl ThemeManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parsed `(width, height)` from [`ThemeManifest::resolution`].
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let (w, h) = self.resolution.split_once('x')?;
        Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
    }
}
