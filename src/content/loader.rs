/*!
 * Content file classification and parsing.
 */

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::model::{ContentFile, SystemData, slot_from_value};
use crate::errors::ContentError;

static MAP_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Map\d+\.json$").unwrap());

/// Database collections whose records carry translatable fields
pub const DATABASE_FILES: [&str; 8] = [
    "Actors.json",
    "Armors.json",
    "Classes.json",
    "Enemies.json",
    "Items.json",
    "Skills.json",
    "States.json",
    "Weapons.json",
];

/// Kind of a content file, decided by its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Database,
    System,
    Troops,
    CommonEvents,
    Map,
    Unsupported,
}

impl ContentKind {
    /// Classify a file by its name (not its path)
    pub fn from_file_name(name: &str) -> Self {
        if DATABASE_FILES.contains(&name) {
            Self::Database
        } else if name == "System.json" {
            Self::System
        } else if name == "Troops.json" {
            Self::Troops
        } else if name == "CommonEvents.json" {
            Self::CommonEvents
        } else if MAP_FILE.is_match(name) {
            Self::Map
        } else {
            Self::Unsupported
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Database => "database",
            Self::System => "system",
            Self::Troops => "troops",
            Self::CommonEvents => "common events",
            Self::Map => "map",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{}", name)
    }
}

/// Parse the text of a content file of the given kind
pub fn parse_content(kind: ContentKind, file_name: &str, text: &str) -> Result<ContentFile, ContentError> {
    let unparseable = |e: serde_json::Error| ContentError::Unparseable {
        file: file_name.to_string(),
        message: e.to_string(),
    };

    let root: Value = serde_json::from_str(text.trim_start_matches('\u{feff}')).map_err(unparseable)?;

    match kind {
        ContentKind::Database => Ok(ContentFile::Database(slots(root, file_name)?)),
        ContentKind::Troops => Ok(ContentFile::Troops(slots(root, file_name)?)),
        ContentKind::CommonEvents => Ok(ContentFile::CommonEvents(slots(root, file_name)?)),
        ContentKind::System => {
            let system: SystemData = serde_json::from_value(root).map_err(unparseable)?;
            Ok(ContentFile::System(system))
        }
        ContentKind::Map => Ok(ContentFile::Map(serde_json::from_value(root).map_err(unparseable)?)),
        ContentKind::Unsupported => Err(ContentError::Unsupported(file_name.to_string())),
    }
}

/// Read and parse a content file from disk
pub fn load_content(path: &Path) -> Result<ContentFile, ContentError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let kind = ContentKind::from_file_name(&file_name);
    if kind == ContentKind::Unsupported {
        return Err(ContentError::Unsupported(file_name));
    }

    let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        file: file_name.clone(),
        source,
    })?;

    parse_content(kind, &file_name, &text)
}

/// Top-level array of nodes, keeping null and malformed slots
fn slots<T: DeserializeOwned>(root: Value, file_name: &str) -> Result<Vec<Option<T>>, ContentError> {
    match root {
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(slot, value)| slot_from_value(slot, value))
            .collect()),
        _ => Err(ContentError::Unparseable {
            file: file_name.to_string(),
            message: "expected a top-level array".to_string(),
        }),
    }
}
