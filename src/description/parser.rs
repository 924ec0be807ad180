//! Lenient line-oriented parser for description files.
//!
//! Every line is classified independently. Lines that match no directive are
//! dropped and missing or malformed parameters take their defaults, so parsing
//! a string never fails. Only reading a file from disk can return an error.

use std::path::Path;

use tracing::{debug, info, instrument, trace};

use super::color::{normalize_color, normalize_or_default};
use super::params::Params;
use crate::error::{Result, ThemeError};
use crate::model::{
    AnimatedImagePlacement, BarKind, BarWidget, BorderLineStyle, GridLineStyle, ImagePlacement,
    Orientation, TextWidget, Theme,
};

/// Written at the start of description files by the vendor tooling.
const UTF8_BOM: char = '\u{FEFF}';

/// One classified description line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive<'a> {
    Name(&'a str),
    Width(u32),
    Height(u32),
    Image { file_name: &'a str, params: Params },
    AnimatedImage { file_name: &'a str, params: Params },
    Text(Params),
    BorderLine(Params),
    DefaultLine(Params),
    GridLine(Params),
}

/// Classify a trimmed, non-empty line. `None` means the line is ignored.
pub(crate) fn classify(line: &str) -> Option<Directive<'_>> {
    if line.starts_with('#') {
        return None;
    }

    if let Some(rest) = line.strip_prefix("name:") {
        if !rest.is_empty() {
            return Some(Directive::Name(rest.trim()));
        }
    }
    if let Some(value) = line.strip_prefix("width:").and_then(leading_dimension) {
        return Some(Directive::Width(value));
    }
    if let Some(value) = line.strip_prefix("height:").and_then(leading_dimension) {
        return Some(Directive::Height(value));
    }

    if let Some((file_name, rest)) = split_file_directive(line, ".png:") {
        return Some(Directive::Image {
            file_name,
            params: Params::parse(rest),
        });
    }
    if let Some((file_name, rest)) = split_file_directive(line, ".gif:") {
        return Some(Directive::AnimatedImage {
            file_name,
            params: Params::parse(rest),
        });
    }

    let (directive, rest) = line.split_once(':')?;
    if rest.is_empty() {
        return None;
    }
    let params = Params::parse(rest);
    match directive {
        "Text" => Some(Directive::Text(params)),
        "BorderLine" => Some(Directive::BorderLine(params)),
        "DefaultLine" => Some(Directive::DefaultLine(params)),
        "GridLine" => Some(Directive::GridLine(params)),
        _ => None,
    }
}

/// Leading decimal digits as a positive dimension. Trailing text is ignored.
fn leading_dimension(rest: &str) -> Option<u32> {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<u32>().ok().filter(|v| *v > 0)
}

/// Split `<file><ext>:<params>` on the last case-insensitive `ext` occurrence
/// that leaves both a file stem and a parameter segment.
fn split_file_directive<'a>(line: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let lower = line.to_ascii_lowercase();
    let colon = marker.len() - 1;

    lower
        .match_indices(marker)
        .map(|(i, _)| i)
        .filter(|&i| i > 0 && i + marker.len() < line.len())
        .last()
        .map(|i| (&line[..i + colon], &line[i + marker.len()..]))
}

/// Read a description file as text.
///
/// Invalid UTF-8 is replaced and a leading byte order mark is dropped.
///
/// # Errors
///
/// Returns [`ThemeError::NotFound`] when the file does not exist and
/// [`ThemeError::Io`] for other read failures.
pub fn read_description<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ThemeError::not_found(path)
        } else {
            ThemeError::Io(e)
        }
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(&text[..]).to_string())
}

/// Parse a description file from disk.
///
/// # Errors
///
/// See [`read_description`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Theme> {
    let theme = parse_str(&read_description(path)?);

    info!(
        name = %theme.name,
        elements = theme.element_count(),
        "Parsed description file"
    );
    Ok(theme)
}

/// Parse description text.
pub fn parse_str(text: &str) -> Theme {
    parse_str_with_hook(text, |_, _| {})
}

/// Parse description text, calling `on_ignored(line_number, line)` for every
/// non-blank, non-comment line that matched no directive. Line numbers are 1-based.
pub fn parse_str_with_hook<F>(text: &str, mut on_ignored: F) -> Theme
where
    F: FnMut(usize, &str),
{
    let mut theme = Theme::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match classify(line) {
            Some(directive) => apply(&mut theme, directive),
            None if line.starts_with('#') => {}
            None => {
                trace!(line_no = index + 1, line, "Ignoring unrecognized description line");
                on_ignored(index + 1, line);
            }
        }
    }

    debug!(
        images = theme.images.len(),
        animated = theme.animated_images.len(),
        texts = theme.texts.len(),
        bars = theme.bars.len(),
        "Description parsed"
    );
    theme
}

fn apply(theme: &mut Theme, directive: Directive<'_>) {
    match directive {
        Directive::Name(name) => theme.name = name.to_string(),
        Directive::Width(width) => theme.width = width,
        Directive::Height(height) => theme.height = height,
        Directive::Image { file_name, params } => {
            theme.images.push(image_placement(file_name, &params));
        }
        Directive::AnimatedImage { file_name, params } => {
            theme.animated_images.push(AnimatedImagePlacement {
                placement: image_placement(file_name, &params),
                is_background: params.get_bool("IsBack"),
            });
        }
        Directive::Text(params) => theme.texts.push(text_widget(&params)),
        Directive::BorderLine(params) => {
            let kind = BarKind::BorderLine(BorderLineStyle {
                corner_radius: params.get("CornerRadius").map(str::to_string),
                max_value: params.get_i32("MaxNum", 100),
                opacity: params.get_f64("Opacity", 1.0),
                border_thickness_pixels: params.get_i32("BorderThicknes", 0),
                border_color: params.get("BorderFill").map(normalize_color),
                background_color: params.get("BackColor").map(normalize_color),
            });
            theme.bars.push(bar_widget(&params, 100, kind));
        }
        Directive::DefaultLine(params) => {
            theme.bars.push(bar_widget(&params, 100, BarKind::DefaultLine));
        }
        Directive::GridLine(params) => {
            let kind = BarKind::GridLine(GridLineStyle {
                margin: params.get_i32("Margin", 5),
                max_segment_count: params.get_i32("maxcount", 10),
                orientation: Orientation::parse_lenient(&params.get_str("Orientation", "Horizontal")),
            });
            theme.bars.push(bar_widget(&params, 20, kind));
        }
    }
}

fn image_placement(file_name: &str, params: &Params) -> ImagePlacement {
    ImagePlacement {
        file_name: file_name.to_string(),
        x: params.get_f64("x", 0.0),
        y: params.get_f64("y", 0.0),
        z: params.get_i32("z", 0),
        width: params.get_opt_i32("width"),
        height: params.get_opt_i32("height"),
    }
}

fn text_widget(params: &Params) -> TextWidget {
    TextWidget {
        x: params.get_f64("x", 0.0),
        y: params.get_f64("y", 0.0),
        z: params.get_i32("z", 0),
        font_size_pixels: params.get_i32("FontSize", 12),
        font_family: params
            .get_str("FontFamily", "Segoe UI")
            .trim_start_matches('#')
            .to_string(),
        foreground_color: normalize_or_default(&params.get_str("Foreground", "")),
        data_binding_key: params.get_str("data", ""),
        unit: params.get_str("unit", ""),
        opacity: params.get_f64("Opacity", 1.0),
        is_static_label: params.get_bool("IsDefaultText"),
        title: params.get("Title").map(str::to_string),
        max_width: params.get_opt_i32("maxwidth"),
        max_height: params.get_opt_i32("maxheight"),
    }
}

fn bar_widget(params: &Params, default_width: i32, kind: BarKind) -> BarWidget {
    BarWidget {
        x: params.get_f64("x", 0.0),
        y: params.get_f64("y", 0.0),
        z: params.get_i32("z", 0),
        max_width_pixels: params.get_i32("maxwidth", default_width),
        max_height_pixels: params.get_i32("maxheight", 10),
        fill_color: normalize_or_default(&params.get_str("Fill", "")),
        data_binding_key: params.get_str("data", ""),
        kind,
    }
}
