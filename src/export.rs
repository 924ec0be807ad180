//! Writes a project out as an installable theme folder.
//!
//! Layout produced in `folder`:
//!
//! ```text
//! <folder>/
//!   <theme>.json        scheme
//!   Setting.txt         layout themes only
//!   back.png            layout themes only, always rendered
//!   <media>             overlay themes without frames: the background file
//!   1.png .. n.png      when frames are supplied
//!   source/             copy of the media, description and frames
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::description::{generate_with, GenerateOptions, DESCRIPTION_FILE_NAME};
use crate::error::{Result, ResultExt, ThemeError};
use crate::image_ops::{self, ResizeStrategy};
use crate::model::{ThemeType, WidgetLayoutProject};
use crate::scheme::{write_scheme, MediaKind};

/// Name of the rendered background for layout themes.
pub const BACK_IMAGE_FILE: &str = "back.png";
/// Subfolder holding a copy of the theme sources.
pub const SOURCE_DIR: &str = "source";

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub theme_type: ThemeType,
    pub resize: ResizeStrategy,
    pub generate: GenerateOptions,
    /// Animation frames, copied in order as `1.png`, `2.png`, ...
    pub frames: Vec<PathBuf>,
}

/// What an export produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub folder: PathBuf,
    pub scheme_path: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Export `project` into `folder`.
#[instrument(skip_all, fields(theme = %project.theme_name, folder = %folder.display(), theme_type = ?options.theme_type))]
pub fn export_theme(
    project: &WidgetLayoutProject,
    folder: &Path,
    options: &ExportOptions,
) -> Result<ExportReport> {
    let (width, height) = canvas_size(project)?;
    let scheme_file = scheme_file_name(&project.theme_name)?;
    let source = folder.join(SOURCE_DIR);
    fs::create_dir_all(&source)?;

    let mut files = Vec::new();
    let mut write_both = |name: &str, bytes: &[u8]| -> Result<()> {
        for dir in [source.as_path(), folder] {
            let path = dir.join(name);
            fs::write(&path, bytes)?;
            files.push(path);
        }
        Ok(())
    };

    if !options.frames.is_empty() {
        for (i, frame) in options.frames.iter().enumerate() {
            if !frame.is_file() {
                warn!(frame = %frame.display(), "Frame not found, skipping");
                continue;
            }
            let bytes = fs::read(frame)
                .with_context(|| format!("Reading frame {}", frame.display()))?;
            write_both(&format!("{}.png", i + 1), &bytes)?;
        }
    } else if options.theme_type == ThemeType::GifSimple {
        if let Some((name, bytes)) = overlay_media(project)? {
            write_both(&name, &bytes)?;
        }
    }

    if options.theme_type == ThemeType::SettingDescription {
        let back = render_background(project, width, height, options.resize)?;
        write_both(BACK_IMAGE_FILE, &image_ops::encode_png(&back)?)?;

        let mut layout = project.clone();
        layout.background.background_path = Some(BACK_IMAGE_FILE.to_string());
        let text = generate_with(&layout, options.generate);
        write_both(DESCRIPTION_FILE_NAME, text.as_bytes())?;
    }

    let scheme_path = folder.join(scheme_file);
    write_scheme(project, options.theme_type, &scheme_path)?;
    files.push(scheme_path.clone());

    info!(files = files.len(), "Theme exported");
    Ok(ExportReport {
        folder: folder.to_path_buf(),
        scheme_path,
        files,
    })
}

fn canvas_size(project: &WidgetLayoutProject) -> Result<(u32, u32)> {
    match (u32::try_from(project.width), u32::try_from(project.height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(ThemeError::InvalidFormat(format!(
            "Invalid dimensions: {}x{}",
            project.width, project.height
        ))),
    }
}

/// `<theme>.json`, refusing names that would leave the export folder.
fn scheme_file_name(theme_name: &str) -> Result<String> {
    let name = theme_name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ThemeError::InvalidFormat(format!(
            "Theme name '{theme_name}' cannot be used as a file name"
        )));
    }
    Ok(format!("{name}.json"))
}

/// Background resized to the canvas. Black when missing or undecodable.
fn render_background(
    project: &WidgetLayoutProject,
    width: u32,
    height: u32,
    strategy: ResizeStrategy,
) -> Result<image::DynamicImage> {
    let decoded = if let Some(bytes) = project.background.decode_embedded()? {
        image::load_from_memory(&bytes).map_err(|e| e.to_string())
    } else if let Some(path) = project.background.path() {
        image_ops::open_image(Path::new(path)).map_err(|e| e.to_string())
    } else {
        debug!("No background, using black canvas");
        return Ok(image_ops::black_canvas(width, height));
    };

    match decoded {
        Ok(img) => Ok(image_ops::resize_to_canvas(&img, width, height, strategy)),
        Err(e) => {
            warn!(error = %e, "Background unusable, using black canvas");
            Ok(image_ops::black_canvas(width, height))
        }
    }
}

/// The background media file for an overlay theme, if it is a supported type.
fn overlay_media(project: &WidgetLayoutProject) -> Result<Option<(String, Vec<u8>)>> {
    let Some(name) = project.background.file_name() else {
        return Ok(None);
    };
    let supported = project
        .background
        .extension()
        .as_deref()
        .and_then(MediaKind::from_extension)
        .is_some();
    if !supported {
        warn!(file = name, "Background type not supported by the vendor software");
        return Ok(None);
    }

    if let Some(bytes) = project.background.decode_embedded()? {
        return Ok(Some((name.to_string(), bytes)));
    }

    let path = project.background.path().map(Path::new);
    match path.filter(|p| p.is_file()) {
        Some(path) => Ok(Some((name.to_string(), fs::read(path)?))),
        None => {
            warn!(file = name, "Background file not found, skipping");
            Ok(None)
        }
    }
}
