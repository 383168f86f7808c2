// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;

use glsmark::app_config::{self, Config};
use glsmark::app_controller::{Controller, RunOptions};
use glsmark::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite glossary terms into references (default command)
    Rewrite(RewriteArgs),

    /// List the glossary entries defined in a document
    Terms(TermsArgs),

    /// Write a default configuration file
    Init {
        /// Configuration file path
        #[arg(short, long, default_value = "glsmark.json")]
        config_path: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Generate shell completions for glsmark
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that reads a document
#[derive(Args, Debug, Clone)]
struct SharedArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "glsmark.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Command that declares glossary entries (without backslash)
    #[arg(long)]
    definition_command: Option<String>,

    /// Command used for references (without backslash)
    #[arg(long)]
    reference_command: Option<String>,
}

#[derive(Args, Debug)]
struct RewriteArgs {
    /// Input .tex file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (single-file mode only)
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Report replacements without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Number of replacements listed in the summary
    #[arg(short, long)]
    preview: Option<usize>,

    #[command(flatten)]
    shared: SharedArgs,
}

#[derive(Args, Debug)]
struct TermsArgs {
    /// Input .tex file
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Print entries as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    shared: SharedArgs,
}

/// glsmark - glossary cross-references for LaTeX
///
/// Finds \newglossaryentry definitions and replaces plain occurrences of
/// their names with \gls{key} references.
#[derive(Parser, Debug)]
#[command(name = "glsmark")]
#[command(version)]
#[command(about = "Turn glossary terms in LaTeX sources into \\gls references")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "glsmark discovers glossary definitions in a LaTeX source and rewrites plain
occurrences of their display names into references to their keys.

EXAMPLES:
    glsmark thesis.tex                          # Write thesis.gls.tex
    glsmark thesis.tex -o out.tex               # Choose the output file
    glsmark -f thesis.tex -o thesis.tex         # Rewrite in place
    glsmark -n thesis.tex --log-level debug     # Dry run with details
    glsmark chapters/                           # Process every .tex file below chapters/
    glsmark terms thesis.tex --json             # List the discovered glossary
    glsmark init                                # Write glsmark.json with defaults
    glsmark completions bash > glsmark.bash     # Generate bash completions

CONFIGURATION:
    Settings are read from glsmark.json when it exists. Use --config to point
    at another file. Command line flags override file settings.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    rewrite: RewriteArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Color code and prefix for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, prefix) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Accept everything here, the effective level is set once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "glsmark", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Init {
            config_path,
            force_overwrite,
        }) => run_init(config_path, force_overwrite),
        Some(Commands::Terms(args)) => run_terms(args),
        Some(Commands::Rewrite(args)) => run_rewrite(args),
        None => run_rewrite(cli.rewrite),
    }
}

/// Load the config file, apply command line overrides and the log level
fn load_config(shared: &SharedArgs) -> Result<Config> {
    let mut config = Config::load_or_default(&shared.config_path)?;

    if let Some(command) = &shared.definition_command {
        config.markup.definition_command = command.clone();
    }
    if let Some(command) = &shared.reference_command {
        config.markup.reference_command = command.clone();
    }
    if let Some(level) = shared.log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

fn run_rewrite(args: RewriteArgs) -> Result<()> {
    let input_path = args
        .input_path
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let mut config = load_config(&args.shared)?;
    if let Some(preview) = args.preview {
        config.output.preview_limit = preview;
    }

    let controller = Controller::with_config(config)?;
    let options = RunOptions {
        force_overwrite: args.force_overwrite,
        dry_run: args.dry_run,
    };

    if input_path.is_dir() {
        if args.output_path.is_some() {
            return Err(anyhow!("--output-path cannot be used with a directory input"));
        }
        controller.run_folder(&input_path, options)?;
    } else if input_path.is_file() {
        controller.run(&input_path, args.output_path.as_deref(), options)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

fn run_terms(args: TermsArgs) -> Result<()> {
    let config = load_config(&args.shared)?;
    let controller = Controller::with_config(config)?;
    let glossary = controller.list_terms(&args.input_path)?;

    let mut stdout = std::io::stdout();
    if args.json {
        let json = serde_json::to_string_pretty(glossary.entries())
            .context("Failed to serialize glossary to JSON")?;
        writeln!(stdout, "{}", json)?;
    } else {
        for entry in glossary.iter() {
            writeln!(stdout, "{}\t{}", entry.key, entry.name)?;
        }
    }

    info!("Found {} glossary terms.", glossary.len());
    Ok(())
}

fn run_init(config_path: PathBuf, force_overwrite: bool) -> Result<()> {
    if FileManager::file_exists(&config_path) && !force_overwrite {
        warn!("Config file already exists at {:?} (use -f to overwrite)", config_path);
        return Ok(());
    }

    Config::default().save(&config_path)?;
    info!("Default configuration written to {:?}", config_path);
    Ok(())
}
