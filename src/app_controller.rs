use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::content::loader::{ContentKind, load_content};
use crate::content::model::ContentFile;
use crate::errors::ContentError;
use crate::extraction::names::NameTable;
use crate::extraction::options::{ExtractContext, ExtractOptions};
use crate::extraction::predicate::ScriptPredicate;
use crate::extraction::units::Extraction;
use crate::file_utils::FileManager;
use crate::reconcile::{PriorOutput, ReconcileStats, TranslationMemory, reconcile_file};
use crate::tm_format::{TmRow, read_tm_file, write_tm_file};

// @module: Application controller for folder extraction

/// Suffix of the text unit file written for each content file
pub const STRINGS_SUFFIX: &str = "_strings.csv";

/// Suffix of the attribute file written for each content file
pub const ATTRIBUTES_SUFFIX: &str = "_attributes.csv";

/// Run summary file written to the output folder
pub const RUN_LOG_FILE: &str = "carryover.log";

/// Outcome of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub stats: ReconcileStats,
}

/// Read-only state shared by every file of a run
struct RunContext<'a> {
    ctx: ExtractContext<'a>,
    memory: &'a TranslationMemory,
    prior_dir: Option<&'a Path>,
    output_dir: &'a Path,
}

/// Main application controller for extraction runs
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Extract and reconcile every content file of a data folder
    ///
    /// `prior_dir` holds the translated data tree of the previous revision.
    /// The previous run's output is read from `output_dir` before it is
    /// overwritten.
    pub fn run_folder(&self, input_dir: &Path, prior_dir: Option<&Path>, output_dir: &Path) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }
        if let Some(prior) = prior_dir {
            if !FileManager::dir_exists(prior) {
                return Err(anyhow!("Prior directory does not exist: {:?}", prior));
            }
        }
        FileManager::ensure_dir(output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

        let content_files = FileManager::find_files(input_dir, "json")?;
        if content_files.is_empty() {
            return Err(anyhow!("No JSON files found in directory: {:?}", input_dir));
        }

        let names = self.load_name_table(input_dir);
        let memory = self.load_memory(input_dir)?;
        let predicate = ScriptPredicate::for_language(&self.config.source_language)?;
        let options: ExtractOptions = self.config.extraction.to_extract_options();

        let run = RunContext {
            ctx: ExtractContext::new(&options, &predicate, &names),
            memory: &memory,
            prior_dir,
            output_dir,
        };

        let progress_bar = ProgressBar::new(content_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| {
                ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            })
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Processing files");

        let mut summary = RunSummary::default();

        for path in &content_files {
            let file_name = path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress_bar.set_message(format!("Processing: {}", file_name));

            match self.process_file(path, &file_name, &run) {
                Ok(Some(stats)) => {
                    summary.processed += 1;
                    summary.stats.absorb(&stats);
                }
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        let duration = start_time.elapsed();
        let stats = &summary.stats;
        let summary_message = format!(
            "Extraction completed: {} processed, {} skipped, {} errors. {} texts ({} carried, {} memory, {} prior, {} fuzzy, {} blank), {} attributes",
            summary.processed,
            summary.skipped,
            summary.failed,
            stats.text_units,
            stats.carried,
            stats.dictionary_hits,
            stats.prior_hits,
            stats.fuzzy_filled,
            stats.blank,
            stats.attributes
        );
        info!("{}", summary_message);

        let (hits, misses, hit_rate) = memory.stats();
        debug!("Translation memory: {} hits, {} misses ({:.1}%)", hits, misses, hit_rate);

        let log_file_path = output_dir.join(RUN_LOG_FILE);
        let entry = format!(
            "{} ({}) - Duration: {}",
            summary_message,
            input_dir.display(),
            Self::format_duration(duration)
        );
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &entry) {
            warn!("Failed to write run summary to {:?}: {}", log_file_path, e);
        }

        Ok(summary)
    }

    /// Reconcile one file and write its outputs; `None` when skipped
    fn process_file(&self, path: &Path, file_name: &str, run: &RunContext) -> Result<Option<ReconcileStats>> {
        let kind = ContentKind::from_file_name(file_name);
        if kind == ContentKind::Unsupported {
            debug!("Skipping unsupported file {}", file_name);
            return Ok(None);
        }

        let current = match load_content(path) {
            Ok(content) => content,
            Err(e @ ContentError::Unparseable { .. }) => {
                warn!("Skipping {}: {}", file_name, e);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let prior_tree = run.prior_dir.and_then(|dir| Self::load_prior_tree(&dir.join(file_name)));

        let strings_path = FileManager::generate_output_path(path, run.output_dir, STRINGS_SUFFIX);
        let attributes_path = FileManager::generate_output_path(path, run.output_dir, ATTRIBUTES_SUFFIX);
        let prior_output = PriorOutput {
            strings: read_tm_file(&strings_path)?,
            attributes: read_tm_file(&attributes_path)?,
        };

        let threshold = self.config.fuzzy_threshold;
        let (extraction, stats) = reconcile_file(
            &current,
            prior_tree.as_ref(),
            run.memory,
            prior_output,
            &run.ctx,
            threshold,
        );

        Self::write_outputs(&extraction, &strings_path, &attributes_path)?;
        debug!(
            "{} ({}): {} texts, {} attributes",
            file_name, kind, stats.text_units, stats.attributes
        );

        Ok(Some(stats))
    }

    /// Translated tree of the previous revision, when readable
    fn load_prior_tree(path: &Path) -> Option<ContentFile> {
        if !FileManager::file_exists(path) {
            return None;
        }
        match load_content(path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Ignoring prior file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Actor names from `Actors.json`, empty when missing or unreadable
    fn load_name_table(&self, input_dir: &Path) -> NameTable {
        let actors_path = input_dir.join("Actors.json");
        if !FileManager::file_exists(&actors_path) {
            return NameTable::default();
        }
        match load_content(&actors_path) {
            Ok(ContentFile::Database(actors)) => NameTable::from_actors(&actors),
            Ok(_) => NameTable::default(),
            Err(e) => {
                warn!("Actor names unavailable: {}", e);
                NameTable::default()
            }
        }
    }

    fn load_memory(&self, input_dir: &Path) -> Result<TranslationMemory> {
        let combined_path: PathBuf = input_dir.join(&self.config.combined_file);
        let rows = read_tm_file(&combined_path)?;
        Ok(TranslationMemory::from_combined_rows(&rows))
    }

    fn write_outputs(extraction: &Extraction, strings_path: &Path, attributes_path: &Path) -> Result<()> {
        if !extraction.texts.is_empty() {
            let rows: Vec<TmRow> = extraction
                .texts
                .iter()
                .map(|u| TmRow::new(u.source.as_str(), u.translation.as_str(), u.context.as_str()))
                .collect();
            write_tm_file(strings_path, &rows)?;
        }
        if !extraction.attributes.is_empty() {
            let rows: Vec<TmRow> = extraction
                .attributes
                .iter()
                .map(|(source, entry)| TmRow::new(source, entry.translation.as_str(), entry.context.as_str()))
                .collect();
            write_tm_file(attributes_path, &rows)?;
        }
        Ok(())
    }

    // Format duration in a human-readable format
    pub fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
