/*!
 * Extraction output: ordered text units and key-unique attribute units.
 */

use std::collections::HashMap;

/// One dialogue fragment, in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextUnit {
    pub source: String,
    pub translation: String,
    /// Speaker label or other positional context
    pub context: String,
}

impl TextUnit {
    pub fn new(source: impl Into<String>, translation: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            context: context.into(),
        }
    }

    /// Whether no translation has been found yet
    pub fn is_blank(&self) -> bool {
        self.translation.is_empty()
    }
}

/// Translation and context stored under an attribute key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeEntry {
    pub translation: String,
    pub context: String,
}

/// Attribute units keyed by source text
///
/// Keys keep the position of their first insertion. Values follow
/// last-write-wins: a later `insert` or `merge` of an existing key replaces
/// its translation and context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, AttributeEntry)>,
    index: HashMap<String, usize>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `source`; empty keys are ignored
    pub fn insert(&mut self, source: impl Into<String>, translation: impl Into<String>, context: impl Into<String>) {
        let source = source.into();
        if source.is_empty() {
            return;
        }
        let entry = AttributeEntry {
            translation: translation.into(),
            context: context.into(),
        };
        match self.index.get(&source) {
            Some(&slot) => self.entries[slot].1 = entry,
            None => {
                self.index.insert(source.clone(), self.entries.len());
                self.entries.push((source, entry));
            }
        }
    }

    /// Apply every entry of `other` in its order, overwriting on collision
    pub fn merge(&mut self, other: AttributeMap) {
        for (source, entry) in other.entries {
            self.insert(source, entry.translation, entry.context);
        }
    }

    pub fn get(&self, source: &str) -> Option<&AttributeEntry> {
        self.index.get(source).map(|&slot| &self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeEntry)> {
        self.entries.iter().map(|(source, entry)| (source.as_str(), entry))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut AttributeEntry)> {
        self.entries.iter_mut().map(|(source, entry)| (source.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text units and attribute units produced for one subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub texts: Vec<TextUnit>,
    pub attributes: AttributeMap,
}

impl Extraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a later subtree: texts keep order, attributes merge
    pub fn append(&mut self, other: Extraction) {
        self.texts.extend(other.texts);
        self.attributes.merge(other.attributes);
    }

    /// Fold text units into the attribute map
    pub fn into_attributes_only(self) -> Extraction {
        let mut attributes = AttributeMap::new();
        for unit in self.texts {
            attributes.insert(unit.source, unit.translation, unit.context);
        }
        attributes.merge(self.attributes);
        Extraction {
            texts: Vec::new(),
            attributes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.attributes.is_empty()
    }
}
