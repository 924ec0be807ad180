//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::image_ops::ResizeStrategy;
use crate::model::ThemeType;

/// LCD theme toolkit - parse, generate, validate and package sensor-panel themes.
///
/// Robot Mode: Use --robot or --format json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "ltk", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "LTK_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (TOML or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Description files ===
    /// Parse a description file (Setting.txt) and show its elements
    Parse(ParseArgs),

    /// Generate a description file from a project
    Generate(GenerateArgs),

    /// Check a project for layout and style problems
    Validate(ValidateArgs),

    // === Vendor schemes ===
    /// Build the vendor JSON scheme for a project
    Scheme(SchemeArgs),

    /// Write an installable theme folder for a project
    Export(ExportArgs),

    /// List the schemes in a vendor theme directory
    Catalog(CatalogArgs),

    // === Archives ===
    /// Package a theme folder into a .smtheme archive
    Pack(PackArgs),

    /// Extract an archive into a directory
    Unpack(UnpackArgs),

    /// Show an archive's manifest
    Inspect(ArchiveArgs),

    /// Check an archive for required entries
    Check(ArchiveArgs),

    /// List the entries of an archive
    Contents(ArchiveArgs),

    // === Utilities ===
    /// Show the effective configuration
    Config(ConfigArgs),

    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Scheme `Type` selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum SchemeType {
    /// Type 0: animation with text overlays
    #[value(name = "0", alias = "gif")]
    Gif,
    /// Type 1: layout driven by Setting.txt
    #[default]
    #[value(name = "1", alias = "setting")]
    Setting,
}

impl From<SchemeType> for ThemeType {
    fn from(value: SchemeType) -> Self {
        match value {
            SchemeType::Gif => Self::GifSimple,
            SchemeType::Setting => Self::SettingDescription,
        }
    }
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Description file to parse
    pub file: PathBuf,

    /// Report lines that were not understood
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Project file (.smtproj, .json, .yaml, .toml)
    pub project: PathBuf,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Project file to check
    pub project: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SchemeArgs {
    /// Project file
    pub project: PathBuf,

    /// Scheme type
    #[arg(long = "type", short = 't', default_value = "1")]
    pub scheme_type: SchemeType,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for exporting a theme folder.
///
/// # Examples
///
/// ```bash
/// # Layout theme with a stretched background
/// ltk export demo.smtproj themes/Demo --type 1
///
/// # Overlay theme from an animation
/// ltk export demo.smtproj themes/Demo --type 0 --frames renders/
/// ```
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Project file
    pub project: PathBuf,

    /// Destination folder (created if missing)
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Scheme type
    #[arg(long = "type", short = 't', default_value = "1")]
    pub scheme_type: SchemeType,

    /// Resize strategy for the background
    #[arg(long, default_value = "stretch")]
    pub resize: ResizeStrategy,

    /// Directory of PNG animation frames
    #[arg(long, value_name = "DIR")]
    pub frames: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Directory holding scheme JSON files
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Theme folder to package
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Archive to write
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    /// Theme name (defaults to the folder name)
    #[arg(long)]
    pub name: Option<String>,

    /// Author (defaults to the configured author)
    #[arg(long)]
    pub author: Option<String>,

    /// Theme version (defaults to the configured version)
    #[arg(long = "theme-version", value_name = "VERSION")]
    pub theme_version: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Provenance tag
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UnpackArgs {
    /// Archive to extract
    pub archive: PathBuf,

    /// Destination directory
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ArchiveArgs {
    /// Archive file (.smtheme)
    pub archive: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Only print the configuration file path
    #[arg(long)]
    pub path: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
