//! Reading installed schemes back.
//!
//! The vendor layout keeps scheme files in `resources/ThemeScheme/*.json` and
//! theme media in `resources/Programme/<name>/`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::description::{parse_file, DESCRIPTION_FILE_NAME};
use crate::error::{Result, ThemeError};
use crate::model::{Theme, ThemeType, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Summary of one scheme file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeEntry {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub theme_type: ThemeType,
    pub path: PathBuf,
    pub has_thumbnail: bool,
}

impl SchemeEntry {
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Subset of scheme fields needed for listing. Vendor files use fractional
/// numbers for sizes, so they are read as floats.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct SchemeHeader {
    name: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    #[serde(rename = "Type")]
    scheme_type: Option<i64>,
    thumbnail_image_data: Option<String>,
}

impl SchemeHeader {
    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ThemeError::not_found(path)
            } else {
                ThemeError::Io(e)
            }
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ThemeError::InvalidFormat(format!("Invalid scheme {}: {e}", path.display()))
        })
    }

    fn dimension(value: Option<f64>, default: u32) -> u32 {
        value
            .filter(|v| v.is_finite() && *v >= 1.0 && *v <= f64::from(u32::MAX))
            .map_or(default, |v| v as u32)
    }
}

/// List the scheme files in `dir`, sorted by name.
///
/// Files that are not valid JSON or have no name are skipped.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn list_schemes<P: AsRef<Path>>(dir: P) -> Result<Vec<SchemeEntry>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ThemeError::not_found(dir));
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if !is_json || !path.is_file() {
            continue;
        }

        let header = match SchemeHeader::read(&path) {
            Ok(header) => header,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable scheme");
                continue;
            }
        };

        let Some(name) = header.name.filter(|n| !n.trim().is_empty()) else {
            debug!(path = %path.display(), "Skipping scheme without a name");
            continue;
        };

        entries.push(SchemeEntry {
            name,
            width: SchemeHeader::dimension(header.width, DEFAULT_WIDTH),
            height: SchemeHeader::dimension(header.height, DEFAULT_HEIGHT),
            theme_type: ThemeType::from_scheme_code(header.scheme_type.unwrap_or(0)),
            has_thumbnail: header.thumbnail_image_data.is_some_and(|t| !t.is_empty()),
            path,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    info!(count = entries.len(), "Listed schemes");
    Ok(entries)
}

/// Load the theme behind a scheme file.
///
/// When `<scheme dir>/../Programme/<file stem>/Setting.txt` exists it is
/// parsed; otherwise a theme with only the scheme's name, canvas and type is returned.
#[instrument(skip_all, fields(path = %scheme_path.as_ref().display()))]
pub fn load_theme<P: AsRef<Path>>(scheme_path: P) -> Result<Theme> {
    let scheme_path = scheme_path.as_ref();
    let header = SchemeHeader::read(scheme_path)?;

    let stem = scheme_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(resources) = scheme_path.parent().and_then(Path::parent) {
        let description = resources
            .join("Programme")
            .join(&stem)
            .join(DESCRIPTION_FILE_NAME);
        if description.is_file() {
            debug!(description = %description.display(), "Using description file");
            return parse_file(&description);
        }
    }

    warn!("No description file next to scheme, using scheme fields only");
    Ok(Theme {
        name: header.name.unwrap_or(stem),
        width: SchemeHeader::dimension(header.width, DEFAULT_WIDTH),
        height: SchemeHeader::dimension(header.height, DEFAULT_HEIGHT),
        theme_type: ThemeType::from_scheme_code(header.scheme_type.unwrap_or(0)),
        ..Theme::default()
    })
}
