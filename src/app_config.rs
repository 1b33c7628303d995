use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::ConfigError;
use crate::extraction::options::{ExtractOptions, PluginArgument, ScriptMode, default_plugin_arguments};
use crate::reconcile::DEFAULT_THRESHOLD;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Extraction config
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Minimum similarity a fuzzy match must exceed (0-100)
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Combined translation memory file, relative to the input folder
    #[serde(default = "default_combined_file")]
    pub combined_file: String,

    /// Output folder; the input folder when unset
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Extraction settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    // @field: Merge multi-line dialogue into one unit
    #[serde(default)]
    pub merge_lines: bool,

    // @field: Joiner for merged lines
    #[serde(default)]
    pub line_join: String,

    // @field: Skip rarely used opcodes
    #[serde(default = "default_true")]
    pub skip_rare: bool,

    // @field: Script stop words
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,

    // @field: Script literal export mode
    #[serde(default)]
    pub script_mode: ScriptMode,

    // @field: MZ plugin command text arguments
    #[serde(default = "default_plugin_arguments")]
    pub plugin_arguments: Vec<PluginArgument>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            merge_lines: false,
            line_join: String::new(),
            skip_rare: true,
            stop_words: default_stop_words(),
            script_mode: ScriptMode::default(),
            plugin_arguments: default_plugin_arguments(),
        }
    }
}

impl ExtractionConfig {
    /// Options handed to the extractor
    pub fn to_extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            merge_lines: self.merge_lines,
            line_join: self.line_join.clone(),
            skip_rare: self.skip_rare,
            stop_words: self.stop_words.clone(),
            script_mode: self.script_mode,
            plugin_arguments: self.plugin_arguments.clone(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "ja".to_string()
}

fn default_fuzzy_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_combined_file() -> String {
    "_combined.csv".to_string()
}

fn default_stop_words() -> Vec<String> {
    vec!["live2d".to_string(), "audiosource".to_string()]
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if crate::language_utils::get_language_name(&self.source_language).is_err() {
            return Err(ConfigError::InvalidLanguage(self.source_language.clone()).into());
        }

        if !(0.0..=100.0).contains(&self.fuzzy_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.fuzzy_threshold).into());
        }

        for entry in &self.extraction.plugin_arguments {
            if entry.plugin.is_empty() || entry.command.is_empty() || entry.argument.is_empty() {
                let described = format!("{}/{}/{}", entry.plugin, entry.command, entry.argument);
                return Err(ConfigError::IncompletePluginArgument(described).into());
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            extraction: ExtractionConfig::default(),
            fuzzy_threshold: default_fuzzy_threshold(),
            combined_file: default_combined_file(),
            output_dir: None,
            log_level: LogLevel::default(),
        }
    }
}
