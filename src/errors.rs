/*!
 * Error types for the carryover application.
 *
 * Library-facing failures are thiserror enums. The application layer
 * (controller, config, CLI) carries them through `anyhow` with context.
 */

use thiserror::Error;

/// Errors that can occur while loading a content file
#[derive(Error, Debug)]
pub enum ContentError {
    /// The file could not be read
    #[error("Failed to read content file {file}: {source}")]
    Io {
        /// File name as given to the loader
        file: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for its content kind
    #[error("Failed to parse content file {file}: {message}")]
    Unparseable {
        /// File name as given to the loader
        file: String,
        /// Parser message
        message: String,
    },

    /// The file name does not map to a known content kind
    #[error("Unsupported content file: {0}")]
    Unsupported(String),
}

/// Errors that can occur when reading or writing translation memory files
#[derive(Error, Debug)]
pub enum TmFormatError {
    /// The file could not be read or written
    #[error("Translation memory I/O failed for {path}: {source}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by configuration validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Source language is not a known ISO 639 code
    #[error("Invalid source language code: {0}")]
    InvalidLanguage(String),

    /// Fuzzy threshold outside 0..=100
    #[error("Fuzzy threshold must be between 0 and 100, got {0}")]
    ThresholdOutOfRange(f64),

    /// A plugin argument entry has an empty field
    #[error("Plugin argument entry is incomplete: {0}")]
    IncompletePluginArgument(String),
}
