/*!
 * Exact-match overlays applied after structural carry-forward.
 *
 * The flat translation memory is applied first, then the previous run's
 * output for the same file. Each overlay overwrites what came before it.
 */

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::extraction::units::{AttributeMap, TextUnit};
use crate::tm_format::TmRow;

use super::fuzzy::HistoricalPool;
use super::memory::TranslationMemory;

/// Previous run's text rows for one file
///
/// Rows sharing a source are handed out in order: the k-th unit with that
/// source takes the k-th row. Once the rows for a source run out, later
/// units repeat the last translation handed out. Rows with an empty
/// translation are dropped on construction.
#[derive(Debug, Default)]
pub struct PriorRows {
    rows: Vec<TmRow>,
    queues: HashMap<String, VecDeque<usize>>,
    consumed: Vec<bool>,
    last_used: HashMap<String, String>,
}

impl PriorRows {
    pub fn new(rows: Vec<TmRow>) -> Self {
        let rows: Vec<TmRow> = rows
            .into_iter()
            .filter(|r| !r.source.is_empty() && !r.translation.is_empty())
            .collect();
        let mut queues: HashMap<String, VecDeque<usize>> = HashMap::new();
        for (index, row) in rows.iter().enumerate() {
            queues.entry(row.source.clone()).or_default().push_back(index);
        }
        let consumed = vec![false; rows.len()];
        Self {
            rows,
            queues,
            consumed,
            last_used: HashMap::new(),
        }
    }

    /// Translation for the next unit with `source`
    pub fn take(&mut self, source: &str) -> Option<String> {
        if let Some(index) = self.queues.get_mut(source).and_then(VecDeque::pop_front) {
            self.consumed[index] = true;
            let translation = self.rows[index].translation.clone();
            self.last_used.insert(source.to_string(), translation.clone());
            return Some(translation);
        }
        self.last_used.get(source).cloned()
    }

    /// Rows nobody took, in file order
    pub fn into_pool(self) -> HistoricalPool {
        let mut pool = HistoricalPool::new();
        for (row, consumed) in self.rows.into_iter().zip(self.consumed) {
            if !consumed {
                pool.push(row.source, row.translation);
            }
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Overwrite text units found in the memory; returns the number applied
pub fn apply_dictionary(units: &mut [TextUnit], memory: &TranslationMemory) -> usize {
    let mut applied = 0;
    for unit in units.iter_mut() {
        if let Some(translation) = memory.get(&unit.source) {
            unit.translation = translation.to_string();
            applied += 1;
        }
    }
    applied
}

/// Overwrite attributes found in the memory; returns the number applied
pub fn apply_dictionary_to_attributes(attributes: &mut AttributeMap, memory: &TranslationMemory) -> usize {
    let mut applied = 0;
    for (source, entry) in attributes.iter_mut() {
        if let Some(translation) = memory.get(source) {
            entry.translation = translation.to_string();
            applied += 1;
        }
    }
    applied
}

/// Overwrite text units from the previous run's rows; returns the number
/// applied
pub fn apply_prior_output(units: &mut [TextUnit], prior: &mut PriorRows) -> usize {
    if prior.is_empty() {
        return 0;
    }
    let mut applied = 0;
    for unit in units.iter_mut() {
        if let Some(translation) = prior.take(&unit.source) {
            unit.translation = translation;
            applied += 1;
        }
    }
    debug!("Applied {} of {} prior text rows", applied, prior.len());
    applied
}

/// Overwrite attributes from the previous run's attribute rows; the last
/// row for a source wins
pub fn apply_prior_attributes(attributes: &mut AttributeMap, rows: &[TmRow]) -> usize {
    let lookup: HashMap<&str, &str> = rows
        .iter()
        .filter(|r| !r.translation.is_empty())
        .map(|r| (r.source.as_str(), r.translation.as_str()))
        .collect();
    if lookup.is_empty() {
        return 0;
    }

    let mut applied = 0;
    for (source, entry) in attributes.iter_mut() {
        if let Some(translation) = lookup.get(source) {
            entry.translation = translation.to_string();
            applied += 1;
        }
    }
    applied
}
