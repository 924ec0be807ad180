//! Portable theme archives (`.smtheme`).
//!
//! An archive is a plain ZIP with fixed entry names:
//!
//! | Entry | Required | Content |
//! |-------|----------|---------|
//! | `manifest.json` | yes | [`ThemeManifest`] |
//! | `background.png` | yes | background raster |
//! | `preview.png` | yes (generated when missing) | downscaled background |
//! | `settings.txt` | no | description text |
//! | `theme.yaml` | no | external project description |
//! | `frames/*.png` | no | animation frames |
//!
//! Packing writes to a temporary file next to the destination and renames it
//! into place only once the archive is complete.

mod frames;
mod manifest;

pub use frames::{extract_frame_index, scan_frames, Frame, FrameScan, ScanError};
pub use manifest::{ThemeManifest, SOURCE_CUSTOM, SOURCE_PYTHON};

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::description::DESCRIPTION_FILE_NAME;
use crate::error::{Result, ThemeError};
use crate::image_ops;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const BACKGROUND_FILE: &str = "background.png";
pub const PREVIEW_FILE: &str = "preview.png";
pub const SETTINGS_FILE: &str = "settings.txt";
pub const THEME_YAML_FILE: &str = "theme.yaml";
pub const FRAMES_DIR: &str = "frames";

/// Width of generated previews.
pub const PREVIEW_WIDTH: u32 = 200;

/// Builds archives from theme folders.
#[derive(Debug, Clone)]
pub struct Packer {
    preview_width: u32,
}

impl Default for Packer {
    fn default() -> Self {
        Self {
            preview_width: PREVIEW_WIDTH,
        }
    }
}

impl Packer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preview_width(mut self, width: u32) -> Self {
        self.preview_width = width.max(1);
        self
    }

    /// Pack `source_dir` into `output`.
    ///
    /// Returns the manifest as written, with `resolution`, `animated`,
    /// `frame_count` and `source` filled in from the folder contents.
    pub fn pack(
        &self,
        source_dir: &Path,
        output: &Path,
        manifest: Option<ThemeManifest>,
    ) -> Result<ThemeManifest> {
        self.stage(source_dir, output, manifest)?.commit()
    }

    /// Build the complete archive in a temporary file without touching `output`.
    #[instrument(skip_all, fields(source = %source_dir.display(), output = %output.display()))]
    pub fn stage(
        &self,
        source_dir: &Path,
        output: &Path,
        manifest: Option<ThemeManifest>,
    ) -> Result<StagedArchive> {
        if !source_dir.is_dir() {
            return Err(ThemeError::not_found(source_dir));
        }

        let mut manifest = manifest.unwrap_or_else(|| {
            ThemeManifest::new(
                source_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        });

        let background = find_background(source_dir)?;
        let (width, height) = image_ops::image_dimensions(&background)?;
        manifest.resolution = format!("{width}x{height}");
        debug!(background = %background.display(), resolution = %manifest.resolution, "Background found");

        let preview = self.preview_bytes(source_dir, &background)?;

        let settings = [SETTINGS_FILE, DESCRIPTION_FILE_NAME]
            .iter()
            .map(|name| source_dir.join(name))
            .find(|p| p.is_file());

        let theme_yaml = Some(source_dir.join(THEME_YAML_FILE)).filter(|p| p.is_file());
        if theme_yaml.is_some() {
            manifest.source = SOURCE_PYTHON.to_string();
        }

        let frames_dir = source_dir.join(FRAMES_DIR);
        let frames = if frames_dir.is_dir() {
            let scan = scan_frames(&frames_dir)?;
            manifest.animated = true;
            manifest.frame_count = u32::try_from(scan.len()).unwrap_or(u32::MAX);
            Some(scan)
        } else {
            None
        };

        let staged = StagedArchive::create(output, manifest)?;
        let file = File::create(&staged.temp_path)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let manifest_json = serde_json::to_vec_pretty(&staged.manifest)?;
        add_bytes(&mut zip, MANIFEST_FILE, &manifest_json, options)?;
        add_bytes(&mut zip, BACKGROUND_FILE, &fs::read(&background)?, options)?;
        add_bytes(&mut zip, PREVIEW_FILE, &preview, options)?;
        if let Some(path) = &settings {
            add_bytes(&mut zip, SETTINGS_FILE, &fs::read(path)?, options)?;
        }
        if let Some(path) = &theme_yaml {
            add_bytes(&mut zip, THEME_YAML_FILE, &fs::read(path)?, options)?;
        }
        if let Some(scan) = &frames {
            for frame in &scan.frames {
                let entry = format!("{FRAMES_DIR}/{}", frame.file_name());
                add_bytes(&mut zip, &entry, &fs::read(&frame.path)?, options)?;
            }
        }

        let mut file = zip.finish().map_err(archive_error)?;
        file.flush()?;
        file.sync_all()?;

        info!(
            name = %staged.manifest.name,
            resolution = %staged.manifest.resolution,
            frames = staged.manifest.frame_count,
            "Archive staged"
        );
        Ok(staged)
    }

    fn preview_bytes(&self, source_dir: &Path, background: &Path) -> Result<Vec<u8>> {
        let existing = source_dir.join(PREVIEW_FILE);
        if existing.is_file() && existing != background {
            debug!("Using preview from source folder");
            return Ok(fs::read(existing)?);
        }
        let img = image_ops::open_image(background)?;
        image_ops::make_preview(&img, self.preview_width)
    }
}

/// Pack with default settings.
pub fn pack(source_dir: &Path, output: &Path, manifest: Option<ThemeManifest>) -> Result<ThemeManifest> {
    Packer::new().pack(source_dir, output, manifest)
}

/// A fully written archive waiting in its temporary file.
///
/// Dropping it without [`StagedArchive::commit`] deletes the temporary file
/// and leaves the destination untouched.
#[derive(Debug)]
pub struct StagedArchive {
    temp_path: PathBuf,
    destination: PathBuf,
    manifest: ThemeManifest,
    committed: bool,
}

impl StagedArchive {
    fn create(destination: &Path, manifest: ThemeManifest) -> Result<Self> {
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "theme.smtheme".to_string());
        let temp_path = parent.join(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

        Ok(Self {
            temp_path,
            destination: destination.to_path_buf(),
            manifest,
            committed: false,
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub const fn manifest(&self) -> &ThemeManifest {
        &self.manifest
    }

    /// Move the archive to its destination, replacing any existing file.
    pub fn commit(mut self) -> Result<ThemeManifest> {
        if let Err(e) = fs::rename(&self.temp_path, &self.destination) {
            if !self.destination.exists() {
                return Err(e.into());
            }
            // Platforms where rename does not replace an existing file.
            fs::remove_file(&self.destination)?;
            fs::rename(&self.temp_path, &self.destination)?;
        }
        self.committed = true;
        info!(path = %self.destination.display(), "Archive written");
        Ok(std::mem::take(&mut self.manifest))
    }
}

impl Drop for StagedArchive {
    fn drop(&mut self) {
        if !self.committed && self.temp_path.exists() {
            if let Err(e) = fs::remove_file(&self.temp_path) {
                warn!(path = %self.temp_path.display(), error = %e, "Failed to remove temporary archive");
            }
        }
    }
}

/// Pick the background raster of a theme folder.
///
/// `background.png` wins; otherwise the first PNG by name, passing over
/// `preview.png` unless it is the only one.
pub fn find_background(source_dir: &Path) -> Result<PathBuf> {
    let conventional = source_dir.join(BACKGROUND_FILE);
    if conventional.is_file() {
        return Ok(conventional);
    }

    let mut pngs: Vec<PathBuf> = fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        })
        .collect();
    pngs.sort();

    let is_preview = |p: &PathBuf| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(PREVIEW_FILE))
    };
    let pick = pngs
        .iter()
        .find(|p| !is_preview(p))
        .or_else(|| pngs.first())
        .cloned();

    pick.ok_or_else(|| ThemeError::not_found(&conventional))
}

fn add_bytes(
    zip: &mut ZipWriter<File>,
    name: &str,
    bytes: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options).map_err(archive_error)?;
    zip.write_all(bytes)?;
    Ok(())
}

fn archive_error(err: zip::result::ZipError) -> ThemeError {
    ThemeError::Archive(err.to_string())
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ThemeError::not_found(path)
        } else {
            ThemeError::Io(e)
        }
    })?;
    ZipArchive::new(file)
        .map_err(|e| ThemeError::InvalidFormat(format!("{} is not a valid archive: {e}", path.display())))
}

/// Extract every entry of `archive_path` into `dest_dir`, overwriting existing files.
///
/// Returns the extracted file paths in archive order. Entries whose names
/// would escape `dest_dir` are rejected.
#[instrument(skip_all, fields(archive = %archive_path.display(), dest = %dest_dir.display()))]
pub fn unpack(archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = open_archive(archive_path)?;
    fs::create_dir_all(dest_dir)?;

    let mut written = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_error)?;
        let relative = entry.enclosed_name().ok_or_else(|| {
            ThemeError::InvalidFormat(format!("Unsafe entry name in archive: {}", entry.name()))
        })?;
        let target = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&target)?;
        std::io::copy(&mut entry, &mut out)?;
        debug!(entry = %entry.name(), "Extracted");
        written.push(target);
    }

    info!(files = written.len(), "Archive extracted");
    Ok(written)
}

/// Read the manifest without extracting anything else.
#[instrument(skip_all, fields(archive = %archive_path.display()))]
pub fn inspect(archive_path: &Path) -> Result<ThemeManifest> {
    let mut archive = open_archive(archive_path)?;
    let mut entry = archive.by_name(MANIFEST_FILE).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => {
            ThemeError::InvalidFormat(format!("Archive has no {MANIFEST_FILE}"))
        }
        other => archive_error(other),
    })?;

    let mut json = String::new();
    entry.read_to_string(&mut json)?;
    serde_json::from_str(&json)
        .map_err(|e| ThemeError::InvalidFormat(format!("Invalid {MANIFEST_FILE}: {e}")))
}

/// Names of all entries, in archive order.
pub fn list_contents(archive_path: &Path) -> Result<Vec<String>> {
    let mut archive = open_archive(archive_path)?;
    (0..archive.len())
        .map(|i| {
            archive
                .by_index(i)
                .map(|entry| entry.name().to_string())
                .map_err(archive_error)
        })
        .collect()
}

/// Bytes of `preview.png`, or `None` when the archive has none.
pub fn extract_preview(archive_path: &Path) -> Result<Option<Vec<u8>>> {
    let mut archive = open_archive(archive_path)?;
    let mut entry = match archive.by_name(PREVIEW_FILE) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(archive_error(e)),
    };
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(Some(bytes))
}

/// A missing or unreadable part of an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveIssue {
    pub entry: String,
    pub message: String,
    /// `false` when the problem is fixed automatically on install.
    pub fatal: bool,
}

/// Structural check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveCheck {
    pub passed: bool,
    pub issues: Vec<ArchiveIssue>,
}

/// Check that an archive carries its required entries.
///
/// A missing preview is reported but does not fail the check. An archive that
/// cannot be opened as ZIP fails with a single issue.
#[instrument(skip_all, fields(archive = %archive_path.display()))]
pub fn validate(archive_path: &Path) -> Result<ArchiveCheck> {
    let archive = match open_archive(archive_path) {
        Ok(archive) => archive,
        Err(ThemeError::InvalidFormat(message)) => {
            return Ok(ArchiveCheck {
                passed: false,
                issues: vec![ArchiveIssue {
                    entry: String::new(),
                    message,
                    fatal: true,
                }],
            });
        }
        Err(e) => return Err(e),
    };

    let mut issues = Vec::new();
    for (entry, fatal) in [
        (MANIFEST_FILE, true),
        (BACKGROUND_FILE, true),
        (PREVIEW_FILE, false),
    ] {
        if archive.index_for_name(entry).is_none() {
            let message = if fatal {
                format!("Missing {entry}")
            } else {
                format!("Missing {entry} (will be generated automatically)")
            };
            issues.push(ArchiveIssue {
                entry: entry.to_string(),
                message,
                fatal,
            });
        }
    }

    let passed = !issues.iter().any(|i| i.fatal);
    debug!(passed, issues = issues.len(), "Archive checked");
    Ok(ArchiveCheck { passed, issues })
}
