//! LCD theme toolkit CLI.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use console::style;
use serde::Serialize;
use tracing::{debug, warn};

use ltk::archive::{self, Packer, ThemeManifest};
use ltk::cli::{self, Cli, Commands};
use ltk::config::{default_config_path, AppConfig};
use ltk::description::{self, GenerateOptions};
use ltk::error::Result;
use ltk::export::{export_theme, ExportOptions};
use ltk::logging::init_logging;
use ltk::model::{load_project, ThemeType};
use ltk::output::{Output, OutputMode};
use ltk::scheme;
use ltk::validate::Validator;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> Option<&'static str> {
        option_env!("VERGEN_GIT_SHA")
    }

    pub fn build_timestamp() -> Option<&'static str> {
        option_env!("VERGEN_BUILD_TIMESTAMP")
    }
}

/// Exit status of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Passed,
    /// The command worked but the checked input did not pass.
    Failed,
}

fn main() {
    let cli = Cli::parse();
    let mode = OutputMode::from_cli(&cli);
    init_logging(mode.is_robot(), cli.verbose, cli.quiet);

    let output = mode.into_output();
    match run(&cli, output.as_ref()) {
        Ok(Status::Passed) => {}
        Ok(Status::Failed) => std::process::exit(2),
        Err(e) => {
            output.error(&e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, output: &dyn Output) -> Result<Status> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Parse(args)) => cmd_parse(args, output),
        Some(Commands::Generate(args)) => cmd_generate(cli, args, output),
        Some(Commands::Validate(args)) => cmd_validate(cli, args, output),
        Some(Commands::Scheme(args)) => cmd_scheme(args, output),
        Some(Commands::Export(args)) => cmd_export(cli, args, output),
        Some(Commands::Catalog(args)) => cmd_catalog(args, output),
        Some(Commands::Pack(args)) => cmd_pack(cli, args, output),
        Some(Commands::Unpack(args)) => cmd_unpack(args, output),
        Some(Commands::Inspect(args)) => cmd_inspect(args, output),
        Some(Commands::Check(args)) => cmd_check(args, output),
        Some(Commands::Contents(args)) => cmd_contents(args, output),
        Some(Commands::Config(args)) => cmd_config(cli, args, output),
        Some(Commands::Version) => cmd_version(output),
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    AppConfig::load(cli.config.as_deref())
}

// === Quick Start ===

fn print_quick_start(cli: &Cli) -> Result<Status> {
    if cli.use_json() {
        let help = RobotQuickStart {
            tool: "ltk",
            version: build_info::VERSION,
            description: "Parse, generate, validate and package LCD sensor-panel themes",
            commands: RobotCommands {
                parse: "ltk parse <Setting.txt>",
                generate: "ltk generate <project> [-o Setting.txt]",
                validate: "ltk validate <project>",
                scheme: "ltk scheme <project> --type 0|1",
                export: "ltk export <project> <dir> --type 0|1",
                pack: "ltk pack <dir> -o <theme.smtheme>",
                inspect: "ltk inspect <theme.smtheme>",
                check: "ltk check <theme.smtheme>",
            },
            output_modes: OutputModes {
                human: "--format=text (default)",
                robot: "--robot or --format=json",
                compact: "--format=json-compact",
            },
            exit_codes: "0 ok, 1 error, 2 validation or check failed",
        };
        println!("{}", serde_json::to_string_pretty(&help)?);
    } else {
        println!(
            "{} {} - LCD theme toolkit\n",
            style("ltk").bold().cyan(),
            build_info::VERSION
        );
        println!("{}", style("QUICK START").bold().underlined());
        println!();
        println!("  {}  Inspect a description", style("ltk parse Setting.txt").green());
        println!("  {}  Check a project", style("ltk validate demo.smtproj").green());
        println!("  {}  Export a theme", style("ltk export demo.smtproj out/Demo").green());
        println!("  {}  Build an archive", style("ltk pack out/Demo -o Demo.smtheme").green());
        println!();
        println!("{}", style("ROBOT MODE").bold().underlined());
        println!();
        println!("  {}  JSON output", style("ltk --robot <command>").cyan());
        println!();
        println!("Run {} for full help", style("ltk --help").yellow());
    }
    Ok(Status::Passed)
}

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    commands: RobotCommands,
    output_modes: OutputModes,
    exit_codes: &'static str,
}

#[derive(Serialize)]
struct RobotCommands {
    parse: &'static str,
    generate: &'static str,
    validate: &'static str,
    scheme: &'static str,
    export: &'static str,
    pack: &'static str,
    inspect: &'static str,
    check: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Description Commands ===

fn cmd_parse(args: &cli::ParseArgs, output: &dyn Output) -> Result<Status> {
    if !args.strict {
        output.theme(&description::parse_file(&args.file)?);
        return Ok(Status::Passed);
    }

    let text = description::read_description(&args.file)?;
    let mut ignored = 0usize;
    let theme = description::parse_str_with_hook(&text, |line, content| {
        warn!(line, content, "Line not understood");
        ignored += 1;
    });
    output.theme(&theme);

    if ignored > 0 {
        debug!(ignored, "Strict parse failed");
        return Ok(Status::Failed);
    }
    Ok(Status::Passed)
}

fn cmd_generate(cli: &Cli, args: &cli::GenerateArgs, output: &dyn Output) -> Result<Status> {
    let config = load_config(cli)?;
    let project = load_project(&args.project)?;
    let options = GenerateOptions {
        line_ending: config.line_ending,
    };

    match &args.output {
        Some(path) => {
            description::write_description(&project, path, options)?;
            output.success(&format!("Wrote {}", path.display()));
        }
        None => output.description(&description::generate_with(&project, options)),
    }
    Ok(Status::Passed)
}

fn cmd_validate(cli: &Cli, args: &cli::ValidateArgs, output: &dyn Output) -> Result<Status> {
    let config = load_config(cli)?;
    let project = load_project(&args.project)?;
    let report = Validator::new()
        .with_extra_fonts(config.extra_fonts)
        .validate(&project);
    output.validation(&report);

    Ok(if report.has_errors() {
        Status::Failed
    } else {
        Status::Passed
    })
}

// === Scheme Commands ===

fn cmd_scheme(args: &cli::SchemeArgs, output: &dyn Output) -> Result<Status> {
    let project = load_project(&args.project)?;
    let theme_type = ThemeType::from(args.scheme_type);

    match &args.output {
        Some(path) => {
            scheme::write_scheme(&project, theme_type, path)?;
            output.success(&format!("Wrote {}", path.display()));
        }
        None => output.scheme(&scheme::build_scheme(&project, theme_type)),
    }
    Ok(Status::Passed)
}

fn cmd_export(cli: &Cli, args: &cli::ExportArgs, output: &dyn Output) -> Result<Status> {
    let config = load_config(cli)?;
    let project = load_project(&args.project)?;

    let frames = match &args.frames {
        Some(dir) => archive::scan_frames(dir)?
            .paths()
            .map(Path::to_path_buf)
            .collect(),
        None => Vec::new(),
    };

    let options = ExportOptions {
        theme_type: args.scheme_type.into(),
        resize: args.resize,
        generate: GenerateOptions {
            line_ending: config.line_ending,
        },
        frames,
    };
    output.exported(&export_theme(&project, &args.dir, &options)?);
    Ok(Status::Passed)
}

fn cmd_catalog(args: &cli::CatalogArgs, output: &dyn Output) -> Result<Status> {
    output.catalog(&scheme::list_schemes(&args.dir)?);
    Ok(Status::Passed)
}

// === Archive Commands ===

fn cmd_pack(cli: &Cli, args: &cli::PackArgs, output: &dyn Output) -> Result<Status> {
    let config = load_config(cli)?;

    let name = args
        .name
        .clone()
        .or_else(|| folder_name(&args.dir))
        .unwrap_or_default();
    let mut manifest = ThemeManifest::new(name);
    manifest.author = args.author.clone().unwrap_or(config.author);
    manifest.version = args.theme_version.clone().unwrap_or(config.version);
    if let Some(description) = &args.description {
        manifest.description.clone_from(description);
    }
    if let Some(source) = &args.source {
        manifest.source.clone_from(source);
    }

    let manifest = Packer::new()
        .with_preview_width(config.preview_width)
        .pack(&args.dir, &args.output, Some(manifest))?;
    output.packed(&manifest, &args.output);
    Ok(Status::Passed)
}

/// Last component of `dir`, resolving `.` and `..` first.
fn folder_name(dir: &Path) -> Option<String> {
    let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    dir.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn cmd_unpack(args: &cli::UnpackArgs, output: &dyn Output) -> Result<Status> {
    let files = archive::unpack(&args.archive, &args.dir)?;
    output.unpacked(&args.dir, &files);
    Ok(Status::Passed)
}

fn cmd_inspect(args: &cli::ArchiveArgs, output: &dyn Output) -> Result<Status> {
    output.manifest(&archive::inspect(&args.archive)?);
    Ok(Status::Passed)
}

fn cmd_check(args: &cli::ArchiveArgs, output: &dyn Output) -> Result<Status> {
    let check = archive::validate(&args.archive)?;
    output.archive_check(&args.archive, &check);
    Ok(if check.passed {
        Status::Passed
    } else {
        Status::Failed
    })
}

fn cmd_contents(args: &cli::ArchiveArgs, output: &dyn Output) -> Result<Status> {
    output.contents(&archive::list_contents(&args.archive)?);
    Ok(Status::Passed)
}

// === Utility Commands ===

fn cmd_config(cli: &Cli, args: &cli::ConfigArgs, output: &dyn Output) -> Result<Status> {
    let path = AppConfig::source_path(cli.config.as_deref());

    if args.path {
        let shown: Option<PathBuf> = path.or_else(default_config_path);
        match shown {
            Some(path) => output.info(&path.display().to_string()),
            None => output.warning("No configuration directory on this platform"),
        }
        return Ok(Status::Passed);
    }

    let config = load_config(cli)?;
    output.config(&config, path.as_deref());
    Ok(Status::Passed)
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_version(output: &dyn Output) -> Result<Status> {
    output.version_info(
        build_info::VERSION,
        build_info::git_sha(),
        build_info::build_timestamp(),
    );
    Ok(Status::Passed)
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_completions(args: &cli::CompletionsArgs) -> Result<Status> {
    clap_complete::generate(args.shell, &mut Cli::command(), "ltk", &mut io::stdout());
    Ok(Status::Passed)
}
