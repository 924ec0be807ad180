//! Serialization formats for configuration and project files.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::trace;

/// Supported structured file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON (.json, .smtproj).
    Json,
    /// YAML (.yaml, .yml).
    Yaml,
    /// TOML (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting format from extension");
        match ext.to_lowercase().as_str() {
            "json" | "smtproj" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    /// Deserialize `content`, returning a message prefixed with the format name on failure.
    pub fn deserialize<T: DeserializeOwned>(self, content: &str) -> Result<T, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| format!("JSON: {e}")),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| format!("YAML: {e}")),
            Self::Toml => toml::from_str(content).map_err(|e| format!("TOML: {e}")),
        }
    }
}
