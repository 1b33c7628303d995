/*!
 * Fuzzy reconciliation of still-blank text units against leftover prior
 * pairs.
 */

use log::debug;

use crate::alignment::similarity::{similarity_bound, similarity_chars};
use crate::extraction::units::TextUnit;

/// Default minimum score a fuzzy match must exceed
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// One leftover `(source, translation)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    pub source: String,
    pub translation: String,
    chars: Vec<char>,
}

impl PoolEntry {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        let source = source.into();
        let chars = source.chars().collect();
        Self {
            source,
            translation: translation.into(),
            chars,
        }
    }
}

/// Prior pairs that no exact overlay consumed
///
/// Entries keep their insertion order and each one can be used at most
/// once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalPool {
    entries: Vec<PoolEntry>,
}

impl HistoricalPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair; pairs with an empty side are ignored
    pub fn push(&mut self, source: impl Into<String>, translation: impl Into<String>) {
        let entry = PoolEntry::new(source, translation);
        if entry.source.is_empty() || entry.translation.is_empty() {
            return;
        }
        self.entries.push(entry);
    }

    /// Index and score of the best entry strictly above `threshold`
    ///
    /// The first entry wins ties. Entries whose length alone keeps them at
    /// or below the running best are not scored.
    pub fn best_match(&self, text: &str, threshold: f64) -> Option<(usize, f64)> {
        let chars: Vec<char> = text.chars().collect();
        let mut best: Option<(usize, f64)> = None;

        for (index, entry) in self.entries.iter().enumerate() {
            let floor = best.map_or(threshold, |(_, score)| score.max(threshold));
            if similarity_bound(chars.len(), entry.chars.len()) <= floor {
                continue;
            }
            let score = similarity_chars(&chars, &entry.chars);
            if score > floor {
                best = Some((index, score));
            }
        }

        best
    }

    /// Remove and return the entry at `index`
    pub fn take(&mut self, index: usize) -> Option<PoolEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of one fuzzy pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuzzyStats {
    /// Blank units before the pass
    pub considered: usize,
    /// Units filled from the pool
    pub filled: usize,
}

/// Fill blank units from the pool, in unit order
///
/// Units that already carry a translation are never touched.
pub fn reconcile_fuzzy(units: &mut [TextUnit], pool: &mut HistoricalPool, threshold: f64) -> FuzzyStats {
    let mut stats = FuzzyStats::default();

    for unit in units.iter_mut().filter(|u| u.is_blank()) {
        stats.considered += 1;
        if pool.is_empty() {
            continue;
        }
        let Some((index, score)) = pool.best_match(&unit.source, threshold) else {
            continue;
        };
        if let Some(entry) = pool.take(index) {
            debug!("Fuzzy match {:.1} for '{}' from '{}'", score, unit.source, entry.source);
            unit.translation = entry.translation;
            stats.filled += 1;
        }
    }

    stats
}
