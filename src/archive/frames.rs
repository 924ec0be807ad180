//! Directory scanning for animation frame sequences.
//!
//! Frames are PNG files named by their position (`1.png`, `frame_002.png`).
//! They are ordered by that number, so `10.png` sorts after `9.png`.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, trace};

use crate::error::ThemeError;

/// Result of scanning a frame directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameScan {
    /// PNG frames in playback order.
    pub frames: Vec<Frame>,
    /// Non-PNG files and subdirectories that were ignored.
    pub skipped: Vec<PathBuf>,
}

impl FrameScan {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.frames.iter().map(|f| f.path.as_path())
    }
}

/// One frame file.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Number taken from the file name, if it has one.
    pub index: Option<u32>,
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl Frame {
    /// File name as stored in an archive entry.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Errors that can occur while scanning for frames.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {0}: {1}")]
    ReadError(PathBuf, #[source] io::Error),

    #[error("failed to get file metadata for {0}: {1}")]
    MetadataError(PathBuf, #[source] io::Error),
}

impl From<ScanError> for ThemeError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::DirectoryNotFound(path) => Self::not_found(&path),
            other => Self::Other(other.to_string()),
        }
    }
}

/// Scan `dir` for PNG frames.
///
/// Numbered frames come first in numeric order, then unnumbered ones by name.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn scan_frames(dir: &Path) -> Result<FrameScan, ScanError> {
    if !dir.exists() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| ScanError::ReadError(dir.to_path_buf(), e))?
        .collect::<Result<Vec<_>, io::Error>>()
        .map_err(|e| ScanError::ReadError(dir.to_path_buf(), e))?;

    let mut scan = FrameScan::default();
    for entry in entries {
        let path = entry.path();

        if path.is_dir() || !is_png(&path) {
            trace!(path = %path.display(), "Skipping non-frame entry");
            scan.skipped.push(path);
            continue;
        }

        let metadata =
            std::fs::metadata(&path).map_err(|e| ScanError::MetadataError(path.clone(), e))?;
        let index = extract_frame_index(&path);
        debug!(index = ?index, path = %path.display(), "Found frame");

        scan.frames.push(Frame {
            index,
            path,
            size_bytes: metadata.len(),
        });
    }

    scan.frames.sort_by(|a, b| {
        let key = |f: &Frame| (f.index.is_none(), f.index, f.file_name());
        key(a).cmp(&key(b))
    });
    scan.skipped.sort();

    info!(
        frames = scan.frames.len(),
        skipped = scan.skipped.len(),
        "Frame scan complete"
    );
    Ok(scan)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Trailing decimal number of the file stem: `12.png` and `frame_012.png` both give 12.
pub fn extract_frame_index(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let digits_start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    stem[digits_start..].parse().ok()
}
