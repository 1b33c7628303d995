/*!
 * Flat translation memory built from the combined TM file.
 *
 * The memory is an exact-match dictionary shared read-only by every file
 * of a run. Hit and miss counters are kept for the run summary.
 */

use std::cell::Cell;
use std::collections::HashMap;

use log::debug;

use crate::tm_format::TmRow;

/// Escaped line break used inside combined TM records
const LITERAL_NEWLINE: &str = "\\n";

/// Exact source-to-translation dictionary
#[derive(Debug, Default)]
pub struct TranslationMemory {
    entries: HashMap<String, String>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl TranslationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from combined TM rows
    ///
    /// Each record contributes its whole source, with escaped line breaks
    /// restored, and every line of the source paired with the same line of
    /// the translation. Later records overwrite earlier ones and empty
    /// translations are never stored.
    pub fn from_combined_rows(rows: &[TmRow]) -> Self {
        let mut memory = Self::new();
        for row in rows {
            let translation_lines: Vec<&str> = row.translation.split(LITERAL_NEWLINE).collect();
            for (i, line) in row.source.split(LITERAL_NEWLINE).enumerate() {
                memory.insert(line, translation_lines.get(i).copied().unwrap_or_default());
            }
            memory.insert(
                &row.source.replace(LITERAL_NEWLINE, "\n"),
                &row.translation.replace(LITERAL_NEWLINE, "\n"),
            );
        }
        debug!("Loaded {} translation memory entries from {} rows", memory.len(), rows.len());
        memory
    }

    /// Store a translation; empty sources and translations are ignored
    pub fn insert(&mut self, source: &str, translation: &str) {
        if source.is_empty() || translation.is_empty() {
            return;
        }
        self.entries.insert(source.to_string(), translation.to_string());
    }

    /// Look up a translation
    pub fn get(&self, source: &str) -> Option<&str> {
        match self.entries.get(source) {
            Some(translation) => {
                self.hits.set(self.hits.get() + 1);
                debug!("Memory hit for '{}'", truncate_text(source, 30));
                Some(translation.as_str())
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Hits, misses and hit rate in percent
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.get();
        let misses = self.misses.get();
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        (hits, misses, hit_rate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shorten text for log output
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
