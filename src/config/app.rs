//! User configuration for the `ltk` tool.
//!
//! # Example TOML
//!
//! ```toml
//! author = "SnakeMars"
//! version = "1.0"
//! preview_width = 200
//! extra_fonts = ["Orbitron Light"]
//! line_ending = "crlf"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::ConfigFormat;
use crate::description::LineEnding;
use crate::error::{Result, ThemeError};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "LTK_CONFIG";

/// Settings applied across commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Author written into archive manifests when none is given.
    pub author: String,
    /// Manifest version when none is given.
    pub version: String,
    /// Width of generated archive previews.
    pub preview_width: u32,
    /// Fonts accepted by validation on top of the built-in list.
    pub extra_fonts: Vec<String>,
    /// Line terminator for generated description files.
    pub line_ending: LineEnding,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            author: "SnakeMars".to_string(),
            version: "1.0".to_string(),
            preview_width: crate::archive::PREVIEW_WIDTH,
            extra_fonts: Vec::new(),
            line_ending: LineEnding::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Lookup order: `explicit`, then `$LTK_CONFIG`, then the per-user default
    /// location. A missing explicit file is an error; a missing default file
    /// yields [`AppConfig::default`].
    #[instrument(skip_all)]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::source_path(explicit) {
            Some(path) => Self::load_file(&path),
            None => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The file [`AppConfig::load`] reads for `explicit`, if any.
    pub fn source_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| default_config_path().filter(|p| p.exists()))
    }

    /// Load a specific configuration file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_extension(path)
            .filter(|f| *f != ConfigFormat::Json)
            .ok_or_else(|| {
                ThemeError::ConfigParse(format!(
                    "Unknown config format for '{}': expected .yaml, .yml, or .toml",
                    path.display()
                ))
            })?;

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ThemeError::ConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ThemeError::Io(e)
            }
        })?;

        let config: Self = format.deserialize(&content).map_err(ThemeError::ConfigParse)?;
        config.validate()?;

        info!(author = %config.author, "Configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.preview_width == 0 {
            return Err(ThemeError::ConfigParse(
                "preview_width must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// `<config dir>/ltk/config.toml`, when the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ltk").join("config.toml"))
}
