/*!
 * Actor name lookup used to label dialogue.
 *
 * Built once per run from `Actors.json` before any other file is
 * processed, then shared read-only.
 */

use crate::content::model::Entity;

/// Actor names indexed by their position in the actor collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Position-indexed names; empty slots stay empty
    pub fn from_actors(actors: &[Option<Entity>]) -> Self {
        let names = actors
            .iter()
            .map(|actor| actor.as_ref().map(|a| a.text("name").to_string()).unwrap_or_default())
            .collect();
        Self { names }
    }

    /// Non-empty name at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str).filter(|name| !name.is_empty())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
