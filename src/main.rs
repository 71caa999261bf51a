// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::orchestrator::Orchestrator;

mod app_config;
mod catalog;
mod errors;
mod file_utils;
mod language;
mod orchestrator;
mod pacing;
mod placeholder;
mod providers;
mod session;
mod tree;
mod triage;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate localization catalogs into the configured target languages
    Translate(TranslateArgs),

    /// Generate shell completions for loctree
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct TranslateArgs {
    /// Root directory of the per-language catalog tree
    #[arg(short = 'r', long)]
    locales_root: Option<PathBuf>,

    /// Source language code (e.g. 'en', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language codes, in order (e.g. -t de -t es)
    #[arg(short, long)]
    target_language: Vec<String>,

    /// Catalog file names to process (default: all *.json in the source dir)
    #[arg(long = "file")]
    files: Vec<String>,

    /// Translation backend endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// loctree - structure-preserving localization catalog translation
///
/// Walks a nested JSON string catalog, translates every string leaf through
/// a machine-translation backend while protecting {placeholder} tokens,
/// tags right-to-left languages, and never overwrites an existing output
/// file, so re-runs are always safe.
#[derive(Parser, Debug)]
#[command(name = "loctree")]
#[command(version = "0.1.0")]
#[command(about = "Structure-preserving localization catalog translator")]
#[command(
    long_about = "loctree translates nested JSON localization catalogs into a configured list of target languages.

EXAMPLES:
    loctree                                  # Translate using conf.json defaults
    loctree -s en -t de -t es                # Translate English catalogs to German and Spanish
    loctree -r ./locales --file common.json  # Restrict to one catalog file
    loctree --log-level debug                # Verbose run
    loctree completions bash > loctree.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

OUTPUT RULES:
    Destination files that already exist are never modified. Delete a
    destination file to have it translated again."
)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: Marker for log level
    fn get_marker_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "✗ ",
            Level::Warn => "! ",
            Level::Info => "  ",
            Level::Debug => "· ",
            Level::Trace => ": ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let marker = Self::get_marker_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {}{}\x1B[0m",
                color,
                now,
                marker,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "loctree", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        // Default behavior - use top-level args
        None => run_translate(cli.translate).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        apply_overrides(&mut config, &options);
        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();
        apply_overrides(&mut config, &options);

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create the orchestrator and run the full translation pass.
    // Only the fatal precondition (missing source directory) propagates out
    // of run(); every smaller failure is contained and reported.
    let orchestrator = Orchestrator::new(config)?;
    orchestrator.run().await?;

    Ok(())
}

/// Apply command line overrides onto the loaded configuration
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(root) = &options.locales_root {
        config.locales_root = root.clone();
    }

    if let Some(source) = &options.source_language {
        config.source_language = source.clone();
    }

    if !options.target_language.is_empty() {
        config.target_languages = options.target_language.clone();
    }

    if !options.files.is_empty() {
        config.catalog_files = options.files.clone();
    }

    if let Some(endpoint) = &options.endpoint {
        config.translation.endpoint = endpoint.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
