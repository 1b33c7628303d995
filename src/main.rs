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

use carryover::app_config::{self, Config};
use carryover::app_controller::Controller;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract text from a data folder, carrying prior translations forward
    Extract(ExtractArgs),

    /// Generate shell completions for carryover
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Data folder holding the current JSON files
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Translated data folder of the previous revision
    #[arg(short, long, value_name = "PRIOR_DIR")]
    prior_dir: Option<PathBuf>,

    /// Output folder for the TM files (defaults to the input folder)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Source language code (e.g., 'ja', 'zh', 'ko')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Merge multi-line dialogue into a single unit
    #[arg(short, long)]
    merge_lines: bool,

    /// Include rarely used opcodes, notes and system terms
    #[arg(short, long)]
    rare_codes: bool,

    /// Comma separated words that exclude scripts and plugin commands
    #[arg(long, value_delimiter = ',')]
    stop_words: Option<Vec<String>>,

    /// Minimum similarity (0-100) a fuzzy match must exceed
    #[arg(long)]
    fuzzy_threshold: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "carryover.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// carryover - translation carry-forward for RPG Maker MV/MZ
///
/// Extracts translatable text from RPG Maker MV/MZ data files and keeps
/// existing translations attached to it across game updates.
#[derive(Parser, Debug)]
#[command(name = "carryover")]
#[command(version = "0.1.0")]
#[command(about = "Translation carry-forward for RPG Maker MV/MZ event data")]
#[command(long_about = "carryover extracts dialogue and other text from RPG Maker MV/MZ data files into
translation memory files and carries existing translations over to the new revision.

EXAMPLES:
    carryover extract www/data                          # Extract into the data folder
    carryover extract data -p old_translated/data       # Carry translations from a translated tree
    carryover extract data -o tl -r                     # Include rare codes, write to tl/
    carryover extract data --stop-words live2d,effekseer
    carryover completions bash > carryover.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in carryover.json by default. You can specify a
    different config file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.

OUTPUT:
    <name>_strings.csv      dialogue rows (source→translation→speaker)
    <name>_attributes.csv   names, choices, scripts and other short strings

    Existing output files are read back first, so translations entered in them
    survive the next extraction.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
// The level is read from `log::max_level` so it can change after init
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger);
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn colour_for_level(level: Level) -> &'static str {
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let colour = Self::colour_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {:<5} {}\x1B[0m", colour, now, record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "carryover", &mut std::io::stdout());
            Ok(())
        }
        Commands::Extract(args) => run_extract(args),
    }
}

fn run_extract(options: ExtractArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path, &options)?;
    apply_overrides(&mut config, &options);

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let output_dir = options
        .output_dir
        .clone()
        .or_else(|| config.output_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| options.input_dir.clone());

    let controller = Controller::with_config(config)?;
    let summary = controller.run_folder(&options.input_dir, options.prior_dir.as_deref(), &output_dir)?;

    if summary.failed > 0 {
        warn!("{} file(s) failed, see the log above", summary.failed);
    }

    Ok(())
}

/// Load the config file, writing a default one when it does not exist
fn load_or_create_config(config_path: &str, options: &ExtractArgs) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path).context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config =
            serde_json::from_reader(reader).context(format!("Failed to parse config file: {}", config_path))?;

        return Ok(config);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);

    let mut config = Config::default();

    // Apply command line log level to default config if specified
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    let config_json =
        serde_json::to_string_pretty(&config).context("Failed to serialize default config to JSON")?;

    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(config)
}

// Override config with CLI options if provided
fn apply_overrides(config: &mut Config, options: &ExtractArgs) {
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if options.merge_lines {
        config.extraction.merge_lines = true;
    }
    if options.rare_codes {
        config.extraction.skip_rare = false;
    }
    if let Some(stop_words) = &options.stop_words {
        config.extraction.stop_words = stop_words.iter().map(|w| w.trim().to_string()).collect();
    }
    if let Some(threshold) = options.fuzzy_threshold {
        config.fuzzy_threshold = threshold;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
