/*!
 * Translatable-content predicate.
 */

use anyhow::Result;

use crate::language_utils::{WritingScript, script_for_language};

/// Decides whether a string is worth extracting
pub trait TextPredicate {
    fn is_translatable(&self, text: &str) -> bool;
}

/// Accepts text containing at least one character of the source
/// language's script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptPredicate {
    script: WritingScript,
}

impl ScriptPredicate {
    pub fn new(script: WritingScript) -> Self {
        Self { script }
    }

    /// Predicate for an ISO 639 language code
    pub fn for_language(code: &str) -> Result<Self> {
        Ok(Self::new(script_for_language(code)?))
    }
}

impl TextPredicate for ScriptPredicate {
    fn is_translatable(&self, text: &str) -> bool {
        if text.trim().is_empty() || looks_numeric(text) {
            return false;
        }
        text.chars().any(|c| self.script.contains(c))
    }
}

/// True when the text is all digits once `-`, `,` and `.` are removed
pub fn looks_numeric(text: &str) -> bool {
    let mut digits = text.chars().filter(|c| !matches!(c, '-' | ',' | '.')).peekable();
    digits.peek().is_some() && digits.all(|c| c.is_numeric())
}

/// Minimum bar for attribute keys: non-blank and not numeric-looking
pub fn accepts_attribute(text: &str) -> bool {
    !text.trim().is_empty() && !looks_numeric(text)
}
