/*!
 * Extraction options and the per-run extraction context.
 */

use serde::{Deserialize, Serialize};

use super::names::NameTable;
use super::predicate::TextPredicate;

/// How script literals are exported
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptMode {
    /// Each translatable quoted literal is its own attribute
    #[default]
    Literals,
    /// The whole script line is the attribute
    WholeLines,
}

/// Text-bearing argument of an MZ plugin command
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PluginArgument {
    pub plugin: String,
    pub command: String,
    pub argument: String,
}

impl PluginArgument {
    pub fn new(plugin: &str, command: &str, argument: &str) -> Self {
        Self {
            plugin: plugin.to_string(),
            command: command.to_string(),
            argument: argument.to_string(),
        }
    }
}

/// Known MZ plugin commands with a text argument
pub fn default_plugin_arguments() -> Vec<PluginArgument> {
    vec![
        PluginArgument::new("TextPicture", "set", "text"),
        PluginArgument::new("DestinationWindow", "SET_DESTINATION", "destination"),
        PluginArgument::new("TorigoyaMZ_NotifyMessage", "notify", "message"),
        PluginArgument::new("TorigoyaMZ_NotifyMessage", "notifyWithVariableIcon", "message"),
    ]
}

/// Options controlling what the extractor emits
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Emit each dialogue block as one unit
    pub merge_lines: bool,
    /// Joiner for merged dialogue lines
    pub line_join: String,
    /// Skip opcodes that rarely carry displayed text
    pub skip_rare: bool,
    /// Script-bearing commands containing any of these are skipped
    pub stop_words: Vec<String>,
    pub script_mode: ScriptMode,
    pub plugin_arguments: Vec<PluginArgument>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            merge_lines: false,
            line_join: String::new(),
            skip_rare: true,
            stop_words: vec!["live2d".to_string(), "audiosource".to_string()],
            script_mode: ScriptMode::Literals,
            plugin_arguments: default_plugin_arguments(),
        }
    }
}

impl ExtractOptions {
    /// Options for troop battle events: every opcode, no stop words
    pub fn for_troops(&self) -> Self {
        Self {
            skip_rare: false,
            stop_words: Vec::new(),
            ..self.clone()
        }
    }

    /// Argument key holding text for an MZ plugin command
    pub fn plugin_argument(&self, plugin: &str, command: &str) -> Option<&str> {
        self.plugin_arguments
            .iter()
            .find(|entry| entry.plugin == plugin && entry.command == command)
            .map(|entry| entry.argument.as_str())
    }

    /// Whether `text` contains a stop word, ignoring case
    pub fn hits_stop_word(&self, text: &str) -> bool {
        if self.stop_words.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.stop_words
            .iter()
            .filter(|word| !word.is_empty())
            .any(|word| lowered.contains(&word.to_lowercase()))
    }
}

/// Everything the extractor reads besides the nodes themselves
#[derive(Clone, Copy)]
pub struct ExtractContext<'a> {
    pub options: &'a ExtractOptions,
    pub predicate: &'a dyn TextPredicate,
    pub names: &'a NameTable,
}

impl<'a> ExtractContext<'a> {
    pub fn new(options: &'a ExtractOptions, predicate: &'a dyn TextPredicate, names: &'a NameTable) -> Self {
        Self { options, predicate, names }
    }

    pub fn is_translatable(&self, text: &str) -> bool {
        self.predicate.is_translatable(text)
    }
}
