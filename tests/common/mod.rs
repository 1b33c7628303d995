/*!
 * Common test utilities for the carryover test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use carryover::content::{ContentFile, ContentKind, parse_content};
use carryover::extraction::{ExtractContext, ExtractOptions, NameTable, ScriptPredicate};
use carryover::language_utils::WritingScript;

/// Route library logs to the test harness
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Owned extraction settings that hand out an `ExtractContext`
pub struct TestContext {
    pub options: ExtractOptions,
    pub predicate: ScriptPredicate,
    pub names: NameTable,
}

impl TestContext {
    /// Japanese source text, default options
    pub fn japanese() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Latin source text, default options
    pub fn alphabetic() -> Self {
        Self {
            predicate: ScriptPredicate::new(WritingScript::Alphabetic),
            ..Self::japanese()
        }
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            options,
            predicate: ScriptPredicate::new(WritingScript::Japanese),
            names: NameTable::new(vec![String::new(), "ハロルド".to_string()]),
        }
    }

    pub fn ctx(&self) -> ExtractContext<'_> {
        ExtractContext::new(&self.options, &self.predicate, &self.names)
    }
}

/// One event command
pub fn cmd(code: i64, indent: i64, parameters: Value) -> Value {
    json!({"code": code, "indent": indent, "parameters": parameters})
}

/// Show-text header without a face image, then one 401 line per entry
pub fn dialogue(face_index: i64, lines: &[&str]) -> Vec<Value> {
    let mut list = vec![cmd(101, 0, json!(["", face_index, 0, 2]))];
    for line in lines {
        list.push(cmd(401, 0, json!([line])));
    }
    list
}

/// Page with the given self-switch condition and command list
pub fn page(self_switch: Option<&str>, character_index: i64, mut list: Vec<Value>) -> Value {
    list.push(cmd(0, 0, json!([])));
    let conditions = match self_switch {
        Some(ch) => json!({"selfSwitchValid": true, "selfSwitchCh": ch, "switch1Valid": false}),
        None => json!({"selfSwitchValid": false, "switch1Valid": false}),
    };
    json!({
        "conditions": conditions,
        "image": {"characterName": "People1", "characterIndex": character_index},
        "list": list
    })
}

/// Map event
pub fn event(id: i64, name: &str, pages: Vec<Value>) -> Value {
    json!({"id": id, "name": name, "note": "", "pages": pages})
}

/// Map file text with a leading null slot, as the editor writes it
pub fn map_json(display_name: &str, events: Vec<Value>) -> String {
    let mut slots = vec![Value::Null];
    slots.extend(events);
    json!({"displayName": display_name, "note": "", "events": slots}).to_string()
}

/// Parse map text into a content tree
pub fn parse_map(text: &str) -> ContentFile {
    parse_content(ContentKind::Map, "Map001.json", text).expect("map fixture should parse")
}
