/*!
 * Reconciliation of a re-extracted content file with earlier translations.
 *
 * Precedence, later steps overwriting earlier ones:
 * 1. structural carry-forward from the prior translated tree (`hierarchy`)
 * 2. the flat translation memory (`memory`, `overlay`)
 * 3. the previous run's output for the same file (`overlay`)
 * 4. fuzzy matches from unconsumed previous rows, blanks only (`fuzzy`)
 */

pub mod fuzzy;
pub mod hierarchy;
pub mod memory;
pub mod overlay;

use log::debug;

use crate::content::model::ContentFile;
use crate::extraction::options::ExtractContext;
use crate::extraction::units::Extraction;
use crate::tm_format::TmRow;

pub use fuzzy::{DEFAULT_THRESHOLD, FuzzyStats, HistoricalPool, PoolEntry, reconcile_fuzzy};
pub use hierarchy::{pair_nodes, reconcile};
pub use memory::TranslationMemory;
pub use overlay::{
    PriorRows, apply_dictionary, apply_dictionary_to_attributes, apply_prior_attributes, apply_prior_output,
};

/// Previous run's exported rows for one file
#[derive(Debug, Clone, Default)]
pub struct PriorOutput {
    pub strings: Vec<TmRow>,
    pub attributes: Vec<TmRow>,
}

/// Counters for one reconciled file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub text_units: usize,
    pub attributes: usize,
    /// Text units filled by structural carry-forward
    pub carried: usize,
    pub dictionary_hits: usize,
    pub prior_hits: usize,
    pub fuzzy_filled: usize,
    /// Text units still without a translation
    pub blank: usize,
}

impl ReconcileStats {
    /// Add another file's counters
    pub fn absorb(&mut self, other: &ReconcileStats) {
        self.text_units += other.text_units;
        self.attributes += other.attributes;
        self.carried += other.carried;
        self.dictionary_hits += other.dictionary_hits;
        self.prior_hits += other.prior_hits;
        self.fuzzy_filled += other.fuzzy_filled;
        self.blank += other.blank;
    }
}

/// Run every reconciliation step for one file
pub fn reconcile_file(
    current: &ContentFile,
    prior_tree: Option<&ContentFile>,
    memory: &TranslationMemory,
    prior_output: PriorOutput,
    ctx: &ExtractContext,
    threshold: f64,
) -> (Extraction, ReconcileStats) {
    let mut extraction = reconcile(current, prior_tree, ctx);
    let mut stats = ReconcileStats {
        carried: extraction.texts.iter().filter(|u| !u.is_blank()).count(),
        ..ReconcileStats::default()
    };

    stats.dictionary_hits = apply_dictionary(&mut extraction.texts, memory)
        + apply_dictionary_to_attributes(&mut extraction.attributes, memory);

    let mut prior_rows = PriorRows::new(prior_output.strings);
    stats.prior_hits = apply_prior_output(&mut extraction.texts, &mut prior_rows)
        + apply_prior_attributes(&mut extraction.attributes, &prior_output.attributes);

    let mut pool = prior_rows.into_pool();
    let fuzzy = reconcile_fuzzy(&mut extraction.texts, &mut pool, threshold);
    stats.fuzzy_filled = fuzzy.filled;

    stats.text_units = extraction.texts.len();
    stats.attributes = extraction.attributes.len();
    stats.blank = extraction.texts.iter().filter(|u| u.is_blank()).count();

    debug!(
        "Reconciled {} texts and {} attributes: {} carried, {} memory, {} prior, {} fuzzy, {} blank",
        stats.text_units,
        stats.attributes,
        stats.carried,
        stats.dictionary_hits,
        stats.prior_hits,
        stats.fuzzy_filled,
        stats.blank
    );

    (extraction, stats)
}
