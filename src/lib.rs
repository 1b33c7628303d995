/*!
 * # carryover - translation carry-forward for RPG Maker MV/MZ data
 *
 * Extracts translatable text from RPG Maker MV/MZ JSON data and keeps
 * earlier translations attached to it when the game data is revised.
 *
 * ## Features
 *
 * - Dialogue, choices, scripts, comments, plugin commands and database
 *   fields are extracted as translation memory rows
 * - Prior translations follow their text through inserted, deleted,
 *   reordered and edited events, pages and commands
 * - A combined translation memory and the previous run's output are
 *   applied as exact-match overlays
 * - Leftover translations are reused once each for close fuzzy matches
 * - ISO 639-1 and ISO 639-2 source language codes select the script filter
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `content`: Content tree model, command blocks and file loading
 * - `alignment`: Core alignment primitives:
 *   - `alignment::sequence`: LCS edit scripts
 *   - `alignment::signature`: Per-level node signatures
 *   - `alignment::similarity`: Normalized edit-distance similarity
 * - `extraction`: Text and attribute extraction
 * - `reconcile`: Carry-forward pipeline:
 *   - `reconcile::hierarchy`: Recursive structural reconciliation
 *   - `reconcile::memory`: Flat translation memory
 *   - `reconcile::overlay`: Exact-match overlays
 *   - `reconcile::fuzzy`: Single-use fuzzy pass
 * - `tm_format`: Translation memory file codec
 * - `app_config`: Configuration management
 * - `app_controller`: Folder runs
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language codes and writing scripts
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod content;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod language_utils;
pub mod reconcile;
pub mod tm_format;

// Re-export main types for easier usage
pub use app_config::Config;
pub use content::{ContentFile, ContentKind, load_content};
pub use errors::{ConfigError, ContentError, TmFormatError};
pub use extraction::{ExtractContext, ExtractOptions, Extraction, TextUnit};
pub use language_utils::{get_language_name, normalize_to_part2t};
pub use reconcile::{HistoricalPool, ReconcileStats, TranslationMemory, reconcile, reconcile_file};
pub use tm_format::TmRow;
